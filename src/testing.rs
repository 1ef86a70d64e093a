//! Assertion helpers for testing stream output.
//!
//! Floating-point sequence comparison needs more care than `assert_eq!`
//! gives: NaN never equals itself, while test expectations routinely
//! want "both NaN" to pass, and many expected values are exact while
//! others need an epsilon. These helpers encode those rules with
//! detailed failure messages.

use std::fmt::Debug;

/// Assert two element sequences are equal in order and content.
///
/// # Panics
/// Panics with an index-annotated message on the first difference.
pub fn assert_elements_eq<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "sequence length mismatch:\n  expected ({}): {expected:?}\n  actual   ({}): {actual:?}",
        expected.len(),
        actual.len()
    );
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "sequence mismatch at index {i}:\n  expected: {expected:?}\n  actual:   {actual:?}"
        );
    }
}

/// Whether two doubles match under test semantics: bitwise-tolerant
/// equality (`==`, so `-0.0` matches `+0.0`), both-NaN, or within
/// `eps`.
#[must_use]
pub fn f64_matches(a: f64, e: f64, eps: f64) -> bool {
    a == e || (a.is_nan() && e.is_nan()) || (a - e).abs() <= eps
}

/// Assert two `f64` sequences are equal in order, element-wise within
/// `eps` (use `0.0` for exact comparison; NaN matches NaN).
///
/// # Panics
/// Panics with an index-annotated message on the first difference.
pub fn assert_f64_seq_eq(actual: &[f64], expected: &[f64], eps: f64) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "sequence length mismatch:\n  expected ({}): {expected:?}\n  actual   ({}): {actual:?}",
        expected.len(),
        actual.len()
    );
    for (i, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            f64_matches(a, e, eps),
            "sequence mismatch at index {i} (eps {eps}):\n  expected: {expected:?}\n  actual:   {actual:?}"
        );
    }
}

/// Assert a single `f64` value matches within `eps`.
///
/// # Panics
/// Panics when the values differ by more than `eps`.
pub fn assert_f64_eq(actual: f64, expected: f64, eps: f64) {
    assert!(
        f64_matches(actual, expected, eps),
        "value mismatch (eps {eps}): expected {expected}, got {actual}"
    );
}

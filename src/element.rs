//! The [`Element`] bound trait shared by every stream flavor.
//!
//! `NumStream<T>` is generic over exactly three element types — `f64`,
//! `i32`, and `i64` — and this trait is what unifies them: a total
//! ordering (floats order via `total_cmp`, so `-0.0 < +0.0` and NaN
//! sorts after every other value), a hashable key for `distinct`, and a
//! widening accumulator type for `sum`/`average`/`summary_statistics`.

use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

/// Bound trait for numeric stream elements.
///
/// Sealed in practice: implemented for `f64`, `i32`, and `i64` only.
pub trait Element: Copy + PartialEq + PartialOrd + Debug + Default + Send + Sync + 'static {
    /// Accumulator type for summation. Integers widen (`i32` sums into
    /// `i64`) so moderate-length streams don't wrap; doubles stay `f64`.
    type Sum: Copy + Default + Debug + PartialEq + Send + Sync + 'static;

    /// Hashable value-equality key used by `distinct`.
    type DedupKey: Hash + Eq + Send;

    /// Total ordering over elements. For floats this is
    /// [`f64::total_cmp`]; for integers it is plain [`Ord`].
    fn total_cmp(&self, other: &Self) -> Ordering;

    /// The de-duplication key for this value.
    fn dedup_key(self) -> Self::DedupKey;

    /// Widening conversion used by `average` and `as_double_stream`.
    fn to_f64(self) -> f64;

    /// Fold one element into a running sum.
    fn add_to_sum(acc: Self::Sum, v: Self) -> Self::Sum;

    /// Merge two partial sums (parallel partitions).
    fn merge_sums(a: Self::Sum, b: Self::Sum) -> Self::Sum;

    /// View a finished sum as `f64` (for `average`).
    fn sum_to_f64(s: Self::Sum) -> f64;
}

impl Element for f64 {
    type Sum = f64;
    type DedupKey = OrderedFloat<f64>;

    #[inline]
    fn total_cmp(&self, other: &Self) -> Ordering {
        f64::total_cmp(self, other)
    }

    #[inline]
    fn dedup_key(self) -> Self::DedupKey {
        OrderedFloat(self)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn add_to_sum(acc: f64, v: f64) -> f64 {
        acc + v
    }

    #[inline]
    fn merge_sums(a: f64, b: f64) -> f64 {
        a + b
    }

    #[inline]
    fn sum_to_f64(s: f64) -> f64 {
        s
    }
}

impl Element for i32 {
    type Sum = i64;
    type DedupKey = i32;

    #[inline]
    fn total_cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(self, other)
    }

    #[inline]
    fn dedup_key(self) -> i32 {
        self
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn add_to_sum(acc: i64, v: i32) -> i64 {
        acc + i64::from(v)
    }

    #[inline]
    fn merge_sums(a: i64, b: i64) -> i64 {
        a + b
    }

    #[allow(clippy::cast_precision_loss)]
    #[inline]
    fn sum_to_f64(s: i64) -> f64 {
        s as f64
    }
}

impl Element for i64 {
    type Sum = i64;
    type DedupKey = i64;

    #[inline]
    fn total_cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(self, other)
    }

    #[inline]
    fn dedup_key(self) -> i64 {
        self
    }

    #[allow(clippy::cast_precision_loss)]
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn add_to_sum(acc: i64, v: i64) -> i64 {
        acc + v
    }

    #[inline]
    fn merge_sums(a: i64, b: i64) -> i64 {
        a + b
    }

    #[allow(clippy::cast_precision_loss)]
    #[inline]
    fn sum_to_f64(s: i64) -> f64 {
        s as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f64_total_order_places_negative_zero_before_positive_zero() {
        assert_eq!((-0.0f64).total_cmp(&0.0), Ordering::Less);
        assert_eq!(0.0f64.total_cmp(&-0.0), Ordering::Greater);
    }

    #[test]
    fn f64_total_order_places_nan_last() {
        assert_eq!(f64::NAN.total_cmp(&f64::INFINITY), Ordering::Greater);
        assert_eq!(f64::INFINITY.total_cmp(&f64::NAN), Ordering::Less);
    }

    #[test]
    fn i32_sums_widen_to_i64() {
        let mut acc = <i32 as Element>::Sum::default();
        for _ in 0..3 {
            acc = i32::add_to_sum(acc, i32::MAX);
        }
        assert_eq!(acc, 3 * i64::from(i32::MAX));
    }
}

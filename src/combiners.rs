//! Terminal reduction combiners.
//!
//! Every order-sensitive terminal operation on a stream is expressed as
//! a [`CombineFn`]: a two-phase fold with a local accumulation step
//! (`add_input`) and an in-order merge step (`merge`). The sequential
//! runner folds the whole stream through `add_input`; the parallel
//! runner folds index-stable partitions locally and then merges the
//! partial accumulators strictly left-to-right, so encounter-order
//! guarantees (first-wins tie-breaks, lowest-index `find_first`) hold
//! in both modes.

use crate::element::Element;
use crate::stats::SummaryStatistics;
use std::cmp::Ordering;

/// A two-phase reduction over stream elements.
///
/// `V` is the element type, `A` the accumulator, `O` the output.
/// `merge` always receives `other` built from elements that came
/// *after* every element already folded into `acc`.
pub trait CombineFn<V, A, O>: Send + Sync {
    /// Fresh accumulator.
    fn create(&self) -> A;

    /// Fold one element, in encounter order.
    fn add_input(&self, acc: &mut A, v: V);

    /// Merge a later partition's accumulator into an earlier one.
    fn merge(&self, acc: &mut A, other: A);

    /// Produce the final output.
    fn finish(&self, acc: A) -> O;

    /// Whether the accumulator can no longer change; lets the runner
    /// short-circuit (e.g. `find_first` on an infinite stream).
    fn is_done(&self, _acc: &A) -> bool {
        false
    }
}

/* ===================== SumOf ===================== */

/// Widening sum; `f64` streams sum into `f64`, integer streams into `i64`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SumOf;

impl<T: Element> CombineFn<T, T::Sum, T::Sum> for SumOf {
    fn create(&self) -> T::Sum {
        T::Sum::default()
    }

    fn add_input(&self, acc: &mut T::Sum, v: T) {
        *acc = T::add_to_sum(*acc, v);
    }

    fn merge(&self, acc: &mut T::Sum, other: T::Sum) {
        *acc = T::merge_sums(*acc, other);
    }

    fn finish(&self, acc: T::Sum) -> T::Sum {
        acc
    }
}

/* ===================== CountOf ===================== */

/// Element count.
#[derive(Clone, Copy, Debug, Default)]
pub struct CountOf;

impl<T: Element> CombineFn<T, u64, u64> for CountOf {
    fn create(&self) -> u64 {
        0
    }

    fn add_input(&self, acc: &mut u64, _v: T) {
        *acc += 1;
    }

    fn merge(&self, acc: &mut u64, other: u64) {
        *acc += other;
    }

    fn finish(&self, acc: u64) -> u64 {
        acc
    }
}

/* ===================== Extremum ===================== */

/// Max or min under an arbitrary comparator, first-in-order wins ties.
///
/// An element replaces the current candidate only when it compares
/// *strictly* toward `want` (`Greater` for max, `Less` for min), which
/// is what makes the earliest extreme element the winner in both
/// sequential and merged-parallel evaluation.
pub struct Extremum<F> {
    cmp: F,
    want: Ordering,
}

impl<F> Extremum<F> {
    pub fn max(cmp: F) -> Self {
        Self { cmp, want: Ordering::Greater }
    }

    pub fn min(cmp: F) -> Self {
        Self { cmp, want: Ordering::Less }
    }
}

impl<T, F> CombineFn<T, Option<T>, Option<T>> for Extremum<F>
where
    T: Element,
    F: Fn(&T, &T) -> Ordering + Send + Sync,
{
    fn create(&self) -> Option<T> {
        None
    }

    fn add_input(&self, acc: &mut Option<T>, v: T) {
        match acc {
            Some(cur) => {
                if (self.cmp)(&v, cur) == self.want {
                    *cur = v;
                }
            }
            None => *acc = Some(v),
        }
    }

    fn merge(&self, acc: &mut Option<T>, other: Option<T>) {
        if let Some(v) = other {
            self.add_input(acc, v);
        }
    }

    fn finish(&self, acc: Option<T>) -> Option<T> {
        acc
    }
}

/* ===================== KeyedExtremum ===================== */

/// Max or min by a derived key, first-in-order wins ties.
///
/// The key is computed exactly once per element and cached alongside
/// the candidate, so merges never re-derive it.
pub struct KeyedExtremum<F> {
    key_fn: F,
    want: Ordering,
}

impl<F> KeyedExtremum<F> {
    pub fn max(key_fn: F) -> Self {
        Self { key_fn, want: Ordering::Greater }
    }

    pub fn min(key_fn: F) -> Self {
        Self { key_fn, want: Ordering::Less }
    }
}

impl<T, K, F> CombineFn<T, Option<(K, T)>, Option<T>> for KeyedExtremum<F>
where
    T: Element,
    K: Ord + Send,
    F: Fn(T) -> K + Send + Sync,
{
    fn create(&self) -> Option<(K, T)> {
        None
    }

    fn add_input(&self, acc: &mut Option<(K, T)>, v: T) {
        let key = (self.key_fn)(v);
        match acc {
            Some((best, _)) => {
                if key.cmp(best) == self.want {
                    *acc = Some((key, v));
                }
            }
            None => *acc = Some((key, v)),
        }
    }

    fn merge(&self, acc: &mut Option<(K, T)>, other: Option<(K, T)>) {
        if let Some((key, v)) = other {
            match acc {
                Some((best, _)) => {
                    if key.cmp(best) == self.want {
                        *acc = Some((key, v));
                    }
                }
                None => *acc = Some((key, v)),
            }
        }
    }

    fn finish(&self, acc: Option<(K, T)>) -> Option<T> {
        acc.map(|(_, v)| v)
    }
}

/* ===================== AverageOf ===================== */

/// Arithmetic mean as `f64`; absent on empty input.
///
/// - Accumulator: `(sum, count)`
/// - Output: `Option<f64>`
#[derive(Clone, Copy, Debug, Default)]
pub struct AverageOf;

impl<T: Element> CombineFn<T, (T::Sum, u64), Option<f64>> for AverageOf {
    fn create(&self) -> (T::Sum, u64) {
        (T::Sum::default(), 0)
    }

    fn add_input(&self, acc: &mut (T::Sum, u64), v: T) {
        acc.0 = T::add_to_sum(acc.0, v);
        acc.1 += 1;
    }

    fn merge(&self, acc: &mut (T::Sum, u64), other: (T::Sum, u64)) {
        acc.0 = T::merge_sums(acc.0, other.0);
        acc.1 += other.1;
    }

    #[allow(clippy::cast_precision_loss)]
    fn finish(&self, acc: (T::Sum, u64)) -> Option<f64> {
        if acc.1 == 0 {
            None
        } else {
            Some(T::sum_to_f64(acc.0) / acc.1 as f64)
        }
    }
}

/* ===================== StatsOf ===================== */

/// Count/sum/min/max/average bundle; the accumulator *is* the output.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatsOf;

impl<T: Element> CombineFn<T, SummaryStatistics<T>, SummaryStatistics<T>> for StatsOf {
    fn create(&self) -> SummaryStatistics<T> {
        SummaryStatistics::new()
    }

    fn add_input(&self, acc: &mut SummaryStatistics<T>, v: T) {
        acc.accept(v);
    }

    fn merge(&self, acc: &mut SummaryStatistics<T>, other: SummaryStatistics<T>) {
        acc.combine(other);
    }

    fn finish(&self, acc: SummaryStatistics<T>) -> SummaryStatistics<T> {
        acc
    }
}

/* ===================== Reduce ===================== */

/// Left fold with a binary operator; absent on empty input.
///
/// Parallel merges apply the operator across partition boundaries in
/// partition order, which coincides with the sequential left fold
/// whenever the operator is associative (the same contract the
/// original imposes on parallel reduction).
pub struct Reduce<F>(pub F);

impl<T, F> CombineFn<T, Option<T>, Option<T>> for Reduce<F>
where
    T: Element,
    F: Fn(T, T) -> T + Send + Sync,
{
    fn create(&self) -> Option<T> {
        None
    }

    fn add_input(&self, acc: &mut Option<T>, v: T) {
        *acc = Some(match *acc {
            Some(cur) => (self.0)(cur, v),
            None => v,
        });
    }

    fn merge(&self, acc: &mut Option<T>, other: Option<T>) {
        if let Some(v) = other {
            self.add_input(acc, v);
        }
    }

    fn finish(&self, acc: Option<T>) -> Option<T> {
        acc
    }
}

/* ===================== AllMatch / AnyMatch ===================== */

/// True when every element satisfies the predicate (vacuously true on
/// empty input). Short-circuits on the first failure.
pub struct AllMatch<P>(pub P);

impl<T, P> CombineFn<T, bool, bool> for AllMatch<P>
where
    T: Element,
    P: Fn(T) -> bool + Send + Sync,
{
    fn create(&self) -> bool {
        true
    }

    fn add_input(&self, acc: &mut bool, v: T) {
        *acc = *acc && (self.0)(v);
    }

    fn merge(&self, acc: &mut bool, other: bool) {
        *acc = *acc && other;
    }

    fn finish(&self, acc: bool) -> bool {
        acc
    }

    fn is_done(&self, acc: &bool) -> bool {
        !*acc
    }
}

/// True when at least one element satisfies the predicate (false on
/// empty input). Short-circuits on the first hit.
pub struct AnyMatch<P>(pub P);

impl<T, P> CombineFn<T, bool, bool> for AnyMatch<P>
where
    T: Element,
    P: Fn(T) -> bool + Send + Sync,
{
    fn create(&self) -> bool {
        false
    }

    fn add_input(&self, acc: &mut bool, v: T) {
        *acc = *acc || (self.0)(v);
    }

    fn merge(&self, acc: &mut bool, other: bool) {
        *acc = *acc || other;
    }

    fn finish(&self, acc: bool) -> bool {
        acc
    }

    fn is_done(&self, acc: &bool) -> bool {
        *acc
    }
}

/* ===================== FindFirst ===================== */

/// First element (in encounter order) satisfying the predicate.
///
/// The merge keeps the earlier partition's hit when both sides found
/// one, which is what pins the lowest-index guarantee under parallel
/// execution.
pub struct FindFirst<P>(pub P);

impl<T, P> CombineFn<T, Option<T>, Option<T>> for FindFirst<P>
where
    T: Element,
    P: Fn(T) -> bool + Send + Sync,
{
    fn create(&self) -> Option<T> {
        None
    }

    fn add_input(&self, acc: &mut Option<T>, v: T) {
        if acc.is_none() && (self.0)(v) {
            *acc = Some(v);
        }
    }

    fn merge(&self, acc: &mut Option<T>, other: Option<T>) {
        if acc.is_none() {
            *acc = other;
        }
    }

    fn finish(&self, acc: Option<T>) -> Option<T> {
        acc
    }

    fn is_done(&self, acc: &Option<T>) -> bool {
        acc.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold<T, A, O>(comb: &impl CombineFn<T, A, O>, items: &[T]) -> O
    where
        T: Element,
    {
        let mut acc = comb.create();
        for &v in items {
            comb.add_input(&mut acc, v);
        }
        comb.finish(acc)
    }

    #[test]
    fn keyed_extremum_tie_breaks_to_first_in_order() {
        // Keys: 1, 0, 1, 0 — both extremes are tied, first wins.
        let max = KeyedExtremum::max(|v: f64| (v as i64) % 2);
        assert_eq!(fold(&max, &[3.0, 2.0, 5.0, 4.0]), Some(3.0));
        let min = KeyedExtremum::min(|v: f64| (v as i64) % 2);
        assert_eq!(fold(&min, &[3.0, 2.0, 5.0, 4.0]), Some(2.0));
    }

    #[test]
    fn keyed_extremum_merge_prefers_earlier_partition_on_tie() {
        let max = KeyedExtremum::max(|v: i32| v % 10);
        let mut left = max.create();
        max.add_input(&mut left, 17);
        let mut right = max.create();
        max.add_input(&mut right, 27);
        max.merge(&mut left, right);
        assert_eq!(max.finish(left), Some(17));
    }

    #[test]
    fn find_first_merge_keeps_earlier_hit() {
        let find = FindFirst(|v: i32| v > 0);
        let mut left = find.create();
        find.add_input(&mut left, 5);
        let mut right = find.create();
        find.add_input(&mut right, 9);
        find.merge(&mut left, right);
        assert_eq!(find.finish(left), Some(5));
    }

    #[test]
    fn average_is_absent_on_empty() {
        let avg = AverageOf;
        let out: Option<f64> = fold::<f64, _, _>(&avg, &[]);
        assert_eq!(out, None);
        assert_eq!(fold(&avg, &[1.0f64, 2.0]), Some(1.5));
    }

    #[test]
    fn reduce_left_folds() {
        let red = Reduce(|a: f64, b: f64| a - b);
        assert_eq!(fold(&red, &[10.0, 3.0, 2.0]), Some(5.0));
        assert_eq!(fold(&red, &[]), None);
    }

    #[test]
    fn count_counts_elements() {
        assert_eq!(fold(&CountOf, &[1.0f64, 2.0, 3.0]), 3);
        assert_eq!(fold::<i32, _, _>(&CountOf, &[]), 0);
    }

    #[test]
    fn all_match_is_vacuously_true() {
        let all = AllMatch(|_: i32| false);
        assert!(fold(&all, &[]));
        assert!(!fold(&all, &[1]));
    }
}

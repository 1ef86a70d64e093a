//! The core [`NumStream`] pipeline type: lazy transformations, the
//! execution-mode toggle, close-action registration, and terminal
//! reductions.
//!
//! A stream is single-use: every transformation and every terminal
//! operation takes `self` by value, so consuming a stream twice is a
//! compile error rather than a runtime one. Nothing is evaluated until
//! a terminal operation pulls — including the sorting and de-dup
//! barriers, which buffer lazily on first pull.

use crate::close::CloseActions;
use crate::combiners::{
    AllMatch, AnyMatch, AverageOf, CombineFn, Extremum, FindFirst, KeyedExtremum, Reduce, StatsOf,
    SumOf,
};
use crate::element::Element;
use crate::runner::{self, ExecMode};
use crate::stats::SummaryStatistics;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::collections::HashSet;

pub(crate) type BoxedIter<T> = Box<dyn Iterator<Item = T> + Send>;

/// A lazy, ordered, single-use stream of numeric elements.
///
/// Built by the factory functions in [`source`](crate::source)
/// (`of`, `iterate`, `generate`, `random`, ...), transformed by the
/// chainable methods below, and consumed by exactly one terminal
/// operation. See the crate docs for the full tour.
pub struct NumStream<T: Element> {
    pub(crate) iter: BoxedIter<T>,
    pub(crate) mode: ExecMode,
    pub(crate) close: CloseActions,
}

/// Stream of `f64` elements.
pub type DoubleStream = NumStream<f64>;
/// Stream of `i32` elements.
pub type IntStream = NumStream<i32>;
/// Stream of `i64` elements.
pub type LongStream = NumStream<i64>;

/// Lazy barrier: buffers the upstream on first pull, reorders the
/// buffer once, then drains it. Backs `sorted`, `reverse_sorted`,
/// `sorted_by_*`, and `distinct`.
struct Restage<T> {
    pending: Option<(BoxedIter<T>, Box<dyn FnOnce(Vec<T>) -> Vec<T> + Send>)>,
    drained: std::vec::IntoIter<T>,
}

impl<T> Iterator for Restage<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some((upstream, stage)) = self.pending.take() {
            self.drained = stage(upstream.collect()).into_iter();
        }
        self.drained.next()
    }
}

impl<T: Element> NumStream<T> {
    /// Wrap a raw element iterator (sequential mode, no close actions).
    pub(crate) fn from_boxed(iter: BoxedIter<T>) -> Self {
        Self {
            iter,
            mode: ExecMode::Sequential,
            close: CloseActions::default(),
        }
    }

    /// Swap the element chain while carrying mode and close actions.
    fn adapt<U, W>(self, wrap: W) -> NumStream<U>
    where
        U: Element,
        W: FnOnce(BoxedIter<T>) -> BoxedIter<U>,
    {
        NumStream {
            iter: wrap(self.iter),
            mode: self.mode,
            close: self.close,
        }
    }

    /// Insert a lazy full-buffer barrier (sort, distinct, ...).
    fn restage(self, stage: impl FnOnce(Vec<T>) -> Vec<T> + Send + 'static) -> Self {
        self.adapt(|it| {
            Box::new(Restage {
                pending: Some((it, Box::new(stage))),
                drained: Vec::new().into_iter(),
            })
        })
    }

    /* ---------------- transformations ---------------- */

    /// Transform each element.
    #[must_use]
    pub fn map(self, f: impl FnMut(T) -> T + Send + 'static) -> Self {
        self.adapt(|it| Box::new(it.map(f)))
    }

    /// Transform each element into another stream flavor.
    #[must_use]
    pub fn map_to<U: Element>(self, f: impl FnMut(T) -> U + Send + 'static) -> NumStream<U> {
        self.adapt(|it| Box::new(it.map(f)))
    }

    /// Transform each element to `i32`.
    #[must_use]
    pub fn map_to_int(self, f: impl FnMut(T) -> i32 + Send + 'static) -> IntStream {
        self.map_to(f)
    }

    /// Transform each element to `i64`.
    #[must_use]
    pub fn map_to_long(self, f: impl FnMut(T) -> i64 + Send + 'static) -> LongStream {
        self.map_to(f)
    }

    /// Transform each element to `f64`.
    #[must_use]
    pub fn map_to_double(self, f: impl FnMut(T) -> f64 + Send + 'static) -> DoubleStream {
        self.map_to(f)
    }

    /// Keep elements satisfying the predicate.
    #[must_use]
    pub fn filter(self, mut pred: impl FnMut(T) -> bool + Send + 'static) -> Self {
        self.adapt(|it| Box::new(it.filter(move |&v| pred(v))))
    }

    /// Drop elements satisfying the predicate (complement of `filter`).
    #[must_use]
    pub fn remove(self, mut pred: impl FnMut(T) -> bool + Send + 'static) -> Self {
        self.filter(move |v| !pred(v))
    }

    /// Observe each element as it flows past, unchanged.
    #[must_use]
    pub fn peek(self, mut f: impl FnMut(T) + Send + 'static) -> Self {
        self.adapt(|it| {
            Box::new(it.map(move |v| {
                f(v);
                v
            }))
        })
    }

    /// Sort ascending under the elements' total order.
    ///
    /// For doubles that is [`f64::total_cmp`]: `-0.0` sorts before
    /// `+0.0` and NaN sorts after every other value.
    #[must_use]
    pub fn sorted(self) -> Self {
        self.restage(|mut buf| {
            buf.sort_by(|a, b| a.total_cmp(b));
            buf
        })
    }

    /// Sort descending under the elements' total order.
    #[must_use]
    pub fn reverse_sorted(self) -> Self {
        self.restage(|mut buf| {
            buf.sort_by(|a, b| b.total_cmp(a));
            buf
        })
    }

    /// Sort ascending by a derived `Ord` key. The key is computed once
    /// per element; the sort is stable.
    #[must_use]
    pub fn sorted_by_key<K: Ord + 'static>(self, mut f: impl FnMut(T) -> K + Send + 'static) -> Self {
        self.restage(move |mut buf| {
            buf.sort_by_cached_key(|&v| f(v));
            buf
        })
    }

    /// Sort ascending by a derived `f64` key under total order.
    #[must_use]
    pub fn sorted_by_f64(self, mut f: impl FnMut(T) -> f64 + Send + 'static) -> Self {
        self.sorted_by_key(move |v| OrderedFloat(f(v)))
    }

    /// Remove duplicates by value equality, keeping the first
    /// occurrence; relative order is preserved.
    #[must_use]
    pub fn distinct(self) -> Self {
        self.restage(|buf| {
            let mut seen = HashSet::with_capacity(buf.len());
            buf.into_iter().filter(|&v| seen.insert(v.dedup_key())).collect()
        })
    }

    /// Discard the first `n` elements.
    #[must_use]
    pub fn skip(self, n: usize) -> Self {
        self.adapt(|it| Box::new(it.skip(n)))
    }

    /// Truncate to at most `n` elements. Required before fully
    /// materializing an infinite stream (`iterate`, `generate`,
    /// `random`).
    #[must_use]
    pub fn limit(self, n: usize) -> Self {
        self.adapt(|it| Box::new(it.take(n)))
    }

    /// Splice `values` in front of the stream; both relative orders are
    /// preserved.
    ///
    /// # Example
    /// ```
    /// use numstream::DoubleStream;
    ///
    /// let out = DoubleStream::of([1.0, 2.0, 3.0]).prepend([-1.0, 0.0]).to_vec();
    /// assert_eq!(out, vec![-1.0, 0.0, 1.0, 2.0, 3.0]);
    /// ```
    #[must_use]
    pub fn prepend(self, values: impl Into<Vec<T>>) -> Self {
        let values = values.into();
        self.adapt(|it| Box::new(values.into_iter().chain(it)))
    }

    /// Splice `values` after the stream; both relative orders are
    /// preserved.
    #[must_use]
    pub fn append(self, values: impl Into<Vec<T>>) -> Self {
        let values = values.into();
        self.adapt(|it| Box::new(it.chain(values.into_iter())))
    }

    /* ---------------- execution mode ---------------- */

    /// Allow terminal reductions to evaluate on the rayon pool. Output
    /// values are unchanged; only element processing may interleave.
    #[must_use]
    pub fn parallel(mut self) -> Self {
        self.mode = ExecMode::Parallel { partitions: None };
        self
    }

    /// Parallel mode with an explicit partition count.
    #[must_use]
    pub fn parallel_with_partitions(mut self, partitions: usize) -> Self {
        self.mode = ExecMode::Parallel { partitions: Some(partitions) };
        self
    }

    /// Force strict encounter-order evaluation on the calling thread.
    #[must_use]
    pub fn sequential(mut self) -> Self {
        self.mode = ExecMode::Sequential;
        self
    }

    /// Whether terminal reductions may evaluate in parallel.
    #[must_use]
    pub fn is_parallel(&self) -> bool {
        self.mode.is_parallel()
    }

    /// Register a close action. Actions accumulate and all run exactly
    /// once, in registration order, when the stream's life ends — right
    /// after a terminal operation, on drop of an unconsumed stream, and
    /// during unwinding if a user closure panics mid-terminal.
    #[must_use]
    pub fn on_close(mut self, action: impl FnOnce() + Send + 'static) -> Self {
        self.close.push(Box::new(action));
        self
    }

    /* ---------------- terminal operations ---------------- */

    /// Run a combiner under this stream's execution mode. The stream's
    /// close actions fire after the reduction finishes (or unwinds).
    fn combine<A: Send, O>(self, comb: impl CombineFn<T, A, O>) -> O {
        let NumStream { iter, mode, close } = self;
        let out = runner::run_combine(mode, iter, &comb);
        drop(close);
        out
    }

    /// Materialize every element, in order.
    #[must_use]
    pub fn to_vec(self) -> Vec<T> {
        let NumStream { iter, close, .. } = self;
        let out: Vec<T> = iter.collect();
        drop(close);
        out
    }

    /// Number of elements.
    #[must_use]
    pub fn count(self) -> u64 {
        let NumStream { iter, close, .. } = self;
        let n = iter.count() as u64;
        drop(close);
        n
    }

    /// Sum of all elements (integer streams widen into `i64`).
    #[must_use]
    pub fn sum(self) -> T::Sum {
        self.combine(SumOf)
    }

    /// Smallest element under the natural total order; `None` on empty.
    #[must_use]
    pub fn min(self) -> Option<T> {
        self.combine(Extremum::min(T::total_cmp))
    }

    /// Largest element under the natural total order; `None` on empty.
    #[must_use]
    pub fn max(self) -> Option<T> {
        self.combine(Extremum::max(T::total_cmp))
    }

    /// Arithmetic mean; `None` on empty.
    #[must_use]
    pub fn average(self) -> Option<f64> {
        self.combine(AverageOf)
    }

    /// Count/sum/min/max/average in one pass.
    #[must_use]
    pub fn summary_statistics(self) -> SummaryStatistics<T> {
        self.combine(StatsOf)
    }

    /// Left fold with a binary operator; `None` on empty. Under
    /// parallel execution the operator also merges partition results in
    /// partition order, so it should be associative there (same
    /// contract as the platform's parallel reduce).
    #[must_use]
    pub fn reduce(self, op: impl Fn(T, T) -> T + Send + Sync) -> Option<T> {
        self.combine(Reduce(op))
    }

    /// Whether every element satisfies the predicate; vacuously true on
    /// empty input. Short-circuits on the first failure.
    #[must_use]
    pub fn all_match(self, pred: impl Fn(T) -> bool + Send + Sync) -> bool {
        self.combine(AllMatch(pred))
    }

    /// Whether any element satisfies the predicate; false on empty.
    #[must_use]
    pub fn any_match(self, pred: impl Fn(T) -> bool + Send + Sync) -> bool {
        self.combine(AnyMatch(pred))
    }

    /// Whether no element satisfies the predicate; vacuously true on
    /// empty input.
    #[must_use]
    pub fn none_match(self, pred: impl Fn(T) -> bool + Send + Sync) -> bool {
        !self.any_match(pred)
    }

    /// First element (lowest index) satisfying the predicate, `None` if
    /// no match. The lowest-index guarantee holds under parallel
    /// execution too.
    #[must_use]
    pub fn find_first(self, pred: impl Fn(T) -> bool + Send + Sync) -> Option<T> {
        self.combine(FindFirst(pred))
    }

    /// Some element satisfying the predicate, `None` if no match. Order
    /// is unconstrained; this implementation happens to report the
    /// first hit.
    #[must_use]
    pub fn find_any(self, pred: impl Fn(T) -> bool + Send + Sync) -> Option<T> {
        self.combine(FindFirst(pred))
    }

    /// Consume the stream, applying `f` to each element in encounter
    /// order.
    pub fn for_each(self, f: impl FnMut(T)) {
        let NumStream { iter, close, .. } = self;
        iter.for_each(f);
        drop(close);
    }

    /* ---------------- extrema by derived key ---------------- */

    /// Largest element under an arbitrary comparator; on ties the first
    /// element in encounter order wins, in both modes. `None` on empty.
    #[must_use]
    pub fn max_by_cmp(self, cmp: impl Fn(&T, &T) -> Ordering + Send + Sync) -> Option<T> {
        self.combine(Extremum::max(cmp))
    }

    /// Smallest element under an arbitrary comparator; first-in-order
    /// wins ties. `None` on empty.
    #[must_use]
    pub fn min_by_cmp(self, cmp: impl Fn(&T, &T) -> Ordering + Send + Sync) -> Option<T> {
        self.combine(Extremum::min(cmp))
    }

    /// Element with the largest derived `Ord` key. The key is computed
    /// exactly once per element; on key ties the first element in
    /// encounter order wins, in both modes. `None` on empty.
    ///
    /// # Example
    /// ```
    /// use numstream::DoubleStream;
    ///
    /// let best = DoubleStream::of([15.0, 8.0, 31.0, 47.0, 19.0, 29.0])
    ///     .max_by_key(|x| (x % 10.0) as i64 * 10 + (x / 10.0) as i64);
    /// assert_eq!(best, Some(29.0));
    /// ```
    #[must_use]
    pub fn max_by_key<K: Ord + Send>(self, f: impl Fn(T) -> K + Send + Sync) -> Option<T> {
        self.combine(KeyedExtremum::max(f))
    }

    /// Element with the smallest derived `Ord` key; first-in-order wins
    /// ties. `None` on empty.
    #[must_use]
    pub fn min_by_key<K: Ord + Send>(self, f: impl Fn(T) -> K + Send + Sync) -> Option<T> {
        self.combine(KeyedExtremum::min(f))
    }

    /// Element with the largest derived `f64` key under total order.
    #[must_use]
    pub fn max_by_f64(self, f: impl Fn(T) -> f64 + Send + Sync) -> Option<T> {
        self.max_by_key(move |v| OrderedFloat(f(v)))
    }

    /// Element with the smallest derived `f64` key under total order.
    #[must_use]
    pub fn min_by_f64(self, f: impl Fn(T) -> f64 + Send + Sync) -> Option<T> {
        self.min_by_key(move |v| OrderedFloat(f(v)))
    }
}

/* ---------------- flavor conversions ---------------- */

impl IntStream {
    /// Widen every element to `f64`.
    #[must_use]
    pub fn as_double_stream(self) -> DoubleStream {
        self.map_to(<i32 as Element>::to_f64)
    }

    /// Widen every element to `i64`.
    #[must_use]
    pub fn as_long_stream(self) -> LongStream {
        self.map_to(i64::from)
    }
}

impl LongStream {
    /// Widen every element to `f64` (lossy above 2^53).
    #[must_use]
    pub fn as_double_stream(self) -> DoubleStream {
        self.map_to(<i64 as Element>::to_f64)
    }
}

/* ---------------- platform interop ---------------- */

/// Draining iterator over a consumed stream. Close actions fire when
/// this iterator is dropped.
pub struct IntoIter<T> {
    iter: BoxedIter<T>,
    _close: CloseActions,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T: Element> IntoIterator for NumStream<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            iter: self.iter,
            _close: self.close,
        }
    }
}

/// Eagerly collects the source; use
/// [`from_stream`](NumStream::from_stream) to wrap a (possibly
/// infinite) iterator lazily.
impl<T: Element> FromIterator<T> for NumStream<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::of(iter.into_iter().collect::<Vec<T>>())
    }
}

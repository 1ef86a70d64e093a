//! Summary statistics bundle produced by
//! [`NumStream::summary_statistics`](crate::NumStream::summary_statistics).

use crate::element::Element;
use serde::{Deserialize, Serialize};

/// Count, sum, min, max, and average of a consumed stream.
///
/// Min, max, and average are reported as `Option` and are absent for an
/// empty stream — never a sentinel value. Integer streams accumulate
/// their sum in `i64`.
///
/// # Example
/// ```
/// use numstream::IntStream;
///
/// let stats = IntStream::range(0, 4).summary_statistics();
/// assert_eq!(stats.count(), 4);
/// assert_eq!(stats.sum(), 6);
/// assert_eq!(stats.min(), Some(0));
/// assert_eq!(stats.max(), Some(3));
/// assert_eq!(stats.average(), Some(1.5));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize, T::Sum: Serialize",
    deserialize = "T: Deserialize<'de>, T::Sum: Deserialize<'de>"
))]
pub struct SummaryStatistics<T: Element> {
    count: u64,
    sum: T::Sum,
    min: Option<T>,
    max: Option<T>,
}

impl<T: Element> SummaryStatistics<T> {
    /// Empty statistics (count 0, everything absent).
    #[must_use]
    pub fn new() -> Self {
        Self {
            count: 0,
            sum: T::Sum::default(),
            min: None,
            max: None,
        }
    }

    /// Record one element.
    pub fn accept(&mut self, v: T) {
        self.count += 1;
        self.sum = T::add_to_sum(self.sum, v);
        self.min = Some(match self.min {
            Some(cur) if cur.total_cmp(&v).is_le() => cur,
            _ => v,
        });
        self.max = Some(match self.max {
            Some(cur) if cur.total_cmp(&v).is_ge() => cur,
            _ => v,
        });
    }

    /// Fold another partition's statistics into this one.
    pub fn combine(&mut self, other: Self) {
        self.count += other.count;
        self.sum = T::merge_sums(self.sum, other.sum);
        self.min = match (self.min, other.min) {
            (Some(a), Some(b)) => Some(if a.total_cmp(&b).is_le() { a } else { b }),
            (a, b) => a.or(b),
        };
        self.max = match (self.max, other.max) {
            (Some(a), Some(b)) => Some(if a.total_cmp(&b).is_ge() { a } else { b }),
            (a, b) => a.or(b),
        };
    }

    /// Number of elements recorded.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sum of recorded elements (widened for integer streams).
    #[must_use]
    pub fn sum(&self) -> T::Sum {
        self.sum
    }

    /// Smallest recorded element; `None` when empty.
    #[must_use]
    pub fn min(&self) -> Option<T> {
        self.min
    }

    /// Largest recorded element; `None` when empty.
    #[must_use]
    pub fn max(&self) -> Option<T> {
        self.max
    }

    /// Arithmetic mean; `None` when empty.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(T::sum_to_f64(self.sum) / self.count as f64)
        }
    }
}

impl<T: Element> Default for SummaryStatistics<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_statistics_report_absent_extremes() {
        let stats = SummaryStatistics::<f64>::new();
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.min(), None);
        assert_eq!(stats.max(), None);
        assert_eq!(stats.average(), None);
    }

    #[test]
    fn combine_merges_disjoint_partitions() {
        let mut a = SummaryStatistics::<i32>::new();
        for v in [1, 2, 3] {
            a.accept(v);
        }
        let mut b = SummaryStatistics::<i32>::new();
        for v in [10, -4] {
            b.accept(v);
        }
        a.combine(b);
        assert_eq!(a.count(), 5);
        assert_eq!(a.sum(), 12);
        assert_eq!(a.min(), Some(-4));
        assert_eq!(a.max(), Some(10));
    }
}

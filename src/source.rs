//! Stream factories: literals, validated sub-ranges, iterator interop,
//! integer ranges, generators, constants, and seeded random sources.

use crate::element::Element;
use crate::random::RandomSource;
use crate::stream::{DoubleStream, IntStream, LongStream, NumStream};
use anyhow::{Result, bail};

impl<T: Element> NumStream<T> {
    /// Stream with zero elements.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_boxed(Box::new(std::iter::empty()))
    }

    /// Stream over literal values (arrays, slices, vectors).
    ///
    /// # Example
    /// ```
    /// use numstream::DoubleStream;
    ///
    /// assert_eq!(DoubleStream::of([1.0, 2.0, 3.0]).to_vec(), vec![1.0, 2.0, 3.0]);
    /// ```
    #[must_use]
    pub fn of(values: impl Into<Vec<T>>) -> Self {
        Self::from_boxed(Box::new(values.into().into_iter()))
    }

    /// Stream over zero or one value.
    #[must_use]
    pub fn of_option(value: Option<T>) -> Self {
        Self::from_boxed(Box::new(value.into_iter()))
    }

    /// Stream over the sub-range `values[from..to]`.
    ///
    /// # Errors
    /// Fails fast — before any element is produced — unless
    /// `from <= to <= values.len()`.
    pub fn of_range(values: &[T], from: usize, to: usize) -> Result<Self> {
        if from > to || to > values.len() {
            bail!(
                "range {from}..{to} out of bounds for slice of length {}",
                values.len()
            );
        }
        Ok(Self::of(&values[from..to]))
    }

    /// Identity passthrough: an already-typed stream is returned
    /// unchanged — same element chain, same mode, same close actions
    /// (never re-registered).
    #[must_use]
    pub fn of_stream(stream: Self) -> Self {
        stream
    }

    /// Lazily wrap a platform iterator; the source may be infinite.
    /// (The [`FromIterator`] impl is the eager counterpart.)
    #[must_use]
    pub fn from_stream(iter: impl Iterator<Item = T> + Send + 'static) -> Self {
        Self::from_boxed(Box::new(iter))
    }

    /// Infinite stream `seed, f(seed), f(f(seed)), ...`. Apply
    /// [`limit`](NumStream::limit) before materializing; restartable
    /// only by calling `iterate` again.
    ///
    /// # Example
    /// ```
    /// use numstream::DoubleStream;
    ///
    /// let powers = DoubleStream::iterate(1.0, |x| x * 2.0).limit(5).to_vec();
    /// assert_eq!(powers, vec![1.0, 2.0, 4.0, 8.0, 16.0]);
    /// ```
    #[must_use]
    pub fn iterate(seed: T, mut f: impl FnMut(T) -> T + Send + 'static) -> Self {
        Self::from_boxed(Box::new(std::iter::successors(Some(seed), move |&prev| {
            Some(f(prev))
        })))
    }

    /// Infinite stream of supplier-produced values. Apply
    /// [`limit`](NumStream::limit) before materializing.
    #[must_use]
    pub fn generate(f: impl FnMut() -> T + Send + 'static) -> Self {
        Self::from_boxed(Box::new(std::iter::repeat_with(f)))
    }

    /// Exactly `count` repetitions of `value`.
    #[must_use]
    pub fn constant(value: T, count: usize) -> Self {
        Self::from_boxed(Box::new(std::iter::repeat(value).take(count)))
    }
}

impl DoubleStream {
    /// Infinite stream of uniform values in `[0.0, 1.0)` drawn from
    /// `src`, one draw per element in element order.
    #[must_use]
    pub fn random(mut src: impl RandomSource + 'static) -> Self {
        Self::from_boxed(Box::new(std::iter::from_fn(move || Some(src.next_f64()))))
    }

    /// Exactly `n` uniform values in `[0.0, 1.0)`. Equal to the
    /// unbounded stream truncated to `n`: same seed, same sequence.
    #[must_use]
    pub fn random_n(src: impl RandomSource + 'static, n: usize) -> Self {
        Self::random(src).limit(n)
    }

    /// Infinite stream of uniform values in `[lo, hi)`. Requires
    /// `lo < hi`.
    #[must_use]
    pub fn random_range(mut src: impl RandomSource + 'static, lo: f64, hi: f64) -> Self {
        debug_assert!(lo < hi, "random_range requires lo < hi");
        Self::from_boxed(Box::new(std::iter::from_fn(move || {
            Some(src.next_f64_range(lo, hi))
        })))
    }

    /// Exactly `n` uniform values in `[lo, hi)`; element-for-element
    /// equal to [`random_range`](DoubleStream::random_range) truncated
    /// to `n` under the same seed.
    #[must_use]
    pub fn random_range_n(src: impl RandomSource + 'static, n: usize, lo: f64, hi: f64) -> Self {
        Self::random_range(src, lo, hi).limit(n)
    }
}

impl IntStream {
    /// Elements `lo, lo+1, ..., hi-1`; empty when `lo >= hi`.
    ///
    /// # Example
    /// ```
    /// use numstream::IntStream;
    ///
    /// assert_eq!(IntStream::range(0, 4).as_double_stream().sum(), 6.0);
    /// ```
    #[must_use]
    pub fn range(lo: i32, hi: i32) -> Self {
        Self::from_boxed(Box::new(lo..hi))
    }

    /// Elements `lo, lo+1, ..., hi` inclusive; empty when `lo > hi`.
    #[must_use]
    pub fn range_closed(lo: i32, hi: i32) -> Self {
        Self::from_boxed(Box::new(lo..=hi))
    }
}

impl LongStream {
    /// Elements `lo, lo+1, ..., hi-1`; empty when `lo >= hi`.
    #[must_use]
    pub fn range(lo: i64, hi: i64) -> Self {
        Self::from_boxed(Box::new(lo..hi))
    }

    /// Elements `lo, lo+1, ..., hi` inclusive; empty when `lo > hi`.
    #[must_use]
    pub fn range_closed(lo: i64, hi: i64) -> Self {
        Self::from_boxed(Box::new(lo..=hi))
    }
}

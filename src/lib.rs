//! # numstream
//!
//! Fluent, lazy **numeric stream pipelines** for Rust: chained
//! transformations over primitive numeric elements (`f64`, `i32`,
//! `i64`) with terminal reductions that can evaluate sequentially or in
//! parallel without changing their results.
//!
//! ## Key Features
//!
//! - **Fluent, lazy API** — nothing evaluates until a terminal
//!   operation pulls, including the sorting and de-dup barriers
//! - **Single-use by construction** — every transformation and terminal
//!   takes the stream by value, so accidental reuse is a compile error
//! - **Rich construction** — literals, validated sub-ranges, iterator
//!   interop, integer ranges, iterative generators, suppliers,
//!   constants, and seeded random sources
//! - **Extrema by derived key** — max/min by comparator, by any `Ord`
//!   key, or by a derived `f64` key, with first-in-encounter-order
//!   tie-breaks that hold under parallel execution
//! - **Sequential and parallel execution** — a mode toggle, not a
//!   semantic fork: parallel reductions merge per-partition results in
//!   index order and reproduce sequential answers exactly
//! - **Absent, not sentinel** — empty-input aggregations return
//!   `Option::None`, never a magic number and never a panic
//! - **Close actions** — cleanup callbacks registered with `on_close`
//!   run exactly once, in registration order, on every exit path
//!
//! ## Quick Start
//!
//! ```
//! use numstream::DoubleStream;
//!
//! let out = DoubleStream::of([3.0, 1.0, 2.0, 1.0])
//!     .distinct()
//!     .sorted()
//!     .map(|x| x * 10.0)
//!     .to_vec();
//! assert_eq!(out, vec![10.0, 20.0, 30.0]);
//!
//! // Empty aggregations are absent, never sentinels:
//! assert_eq!(DoubleStream::empty().max(), None);
//! ```
//!
//! ## Core Concepts
//!
//! ### Streams
//!
//! A [`NumStream<T>`] is an ordered, lazily evaluated sequence of
//! numeric elements. [`DoubleStream`], [`IntStream`], and
//! [`LongStream`] are its three flavors; `map_to_*` and
//! `as_double_stream` convert between them mid-chain.
//!
//! ### Terminal operations
//!
//! Exactly one terminal operation consumes each stream: `to_vec`,
//! `count`, `sum`, `min`/`max`, `average`, `summary_statistics`,
//! `reduce`, `all_match`/`any_match`/`none_match`,
//! `find_first`/`find_any`, `for_each`, and the `max_by_*`/`min_by_*`
//! extrema family.
//!
//! ### Execution modes
//!
//! Streams evaluate sequentially by default. Calling
//! [`parallel`](NumStream::parallel) lets terminal reductions fan out
//! over rayon with index-stable partitions; every order-sensitive
//! guarantee (extrema tie-breaks, lowest-index `find_first`) is
//! reconciled back to sequential semantics during the in-order merge.
//!
//! ### Random sources
//!
//! `DoubleStream::random*` draw from any [`RandomSource`], one call per
//! element. With the shipped [`SplitMix64`] generator, equal seeds
//! produce equal sequences — a bounded draw of `n` values equals the
//! unbounded stream truncated to `n`:
//!
//! ```
//! use numstream::{DoubleStream, SplitMix64};
//!
//! let a = DoubleStream::random_range_n(SplitMix64::new(1), 100, 1.0, 10.0).to_vec();
//! let b = DoubleStream::random_range(SplitMix64::new(1), 1.0, 10.0).limit(100).to_vec();
//! assert_eq!(a, b);
//! ```
//!
//! ## Module Overview
//!
//! - [`stream`] — the core [`NumStream`] type: transformations, mode
//!   toggle, terminals
//! - [`source`] — factory constructors
//! - [`element`] — the [`Element`] bound unifying the three flavors
//! - [`combiners`] — two-phase [`CombineFn`] reductions backing the
//!   terminals
//! - [`runner`] — sequential/parallel execution of reductions
//! - [`random`] — [`RandomSource`] trait and [`SplitMix64`]
//! - [`stats`] — the [`SummaryStatistics`] bundle
//! - [`testing`] — assertion helpers for stream output

mod close;

pub mod combiners;
pub mod element;
pub mod random;
pub mod runner;
pub mod source;
pub mod stats;
pub mod stream;
pub mod testing;

pub use combiners::CombineFn;
pub use element::Element;
pub use random::{RandomSource, SplitMix64};
pub use runner::ExecMode;
pub use stats::SummaryStatistics;
pub use stream::{DoubleStream, IntStream, IntoIter, LongStream, NumStream};

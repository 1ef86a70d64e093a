//! Execution of terminal reductions.
//!
//! Sequential mode folds the lazy element chain directly on the calling
//! thread, in encounter order, short-circuiting when the combiner
//! reports it is done. Parallel mode materializes the chain, splits it
//! into index-stable contiguous partitions, folds each partition on a
//! rayon worker, and merges the partial accumulators strictly in
//! partition order — so every encounter-order guarantee survives the
//! parallel path unchanged.

use crate::combiners::CombineFn;
use rayon::prelude::*;

/// How a terminal reduction evaluates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecMode {
    /// Strict encounter order on the calling thread (the default).
    #[default]
    Sequential,
    /// Partitioned evaluation on the rayon pool. `partitions: None`
    /// sizes the split at twice the logical CPU count.
    Parallel { partitions: Option<usize> },
}

impl ExecMode {
    pub(crate) fn is_parallel(self) -> bool {
        matches!(self, ExecMode::Parallel { .. })
    }
}

/// Run a combiner over the stream's elements under the given mode.
pub(crate) fn run_combine<T, A, O, C>(
    mode: ExecMode,
    iter: Box<dyn Iterator<Item = T> + Send>,
    comb: &C,
) -> O
where
    T: Send + Sync + Clone,
    A: Send,
    C: CombineFn<T, A, O>,
{
    match mode {
        ExecMode::Sequential => {
            let mut acc = comb.create();
            for v in iter {
                comb.add_input(&mut acc, v);
                if comb.is_done(&acc) {
                    break;
                }
            }
            comb.finish(acc)
        }
        ExecMode::Parallel { partitions } => {
            let items: Vec<T> = iter.collect();
            let parts = partitions
                .unwrap_or_else(default_partitions)
                .max(1)
                .min(items.len().max(1));
            let chunk = items.len().div_ceil(parts).max(1);

            let locals: Vec<A> = items
                .par_chunks(chunk)
                .map(|part| {
                    let mut acc = comb.create();
                    for v in part {
                        comb.add_input(&mut acc, v.clone());
                        if comb.is_done(&acc) {
                            break;
                        }
                    }
                    acc
                })
                .collect();

            // In-order merge: each accumulator covers a later index
            // range than everything already merged.
            let mut merged = comb.create();
            for local in locals {
                comb.merge(&mut merged, local);
                if comb.is_done(&merged) {
                    break;
                }
            }
            comb.finish(merged)
        }
    }
}

/// Default partition count, sized like the runner's thread fan-out.
pub(crate) fn default_partitions() -> usize {
    2 * num_cpus::get().max(2)
}

//! Pseudo-random element sources.
//!
//! The stream constructors in [`source`](crate::source) treat the
//! generator as an opaque collaborator behind the [`RandomSource`]
//! trait: one call per produced element, in element order, so two
//! streams built from equally seeded sources yield identical sequences
//! regardless of how they were bounded.
//!
//! [`SplitMix64`] is the shipped implementation — small, seedable, and
//! deterministic, which is all the stream layer asks for.

/// An opaque source of pseudo-random values.
///
/// Implementations must be deterministic under a fixed seed: the stream
/// layer's reproducibility contract ("a bounded draw of *n* equals an
/// unbounded draw truncated to *n*") holds only if equal seeds produce
/// equal call-by-call outputs.
pub trait RandomSource: Send {
    /// Next raw 64-bit value.
    fn next_u64(&mut self) -> u64;

    /// Uniform value in `[0.0, 1.0)`.
    #[allow(clippy::cast_precision_loss)]
    fn next_f64(&mut self) -> f64 {
        // 53 high bits, the standard double-from-bits construction.
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform value in `[lo, hi)`.
    ///
    /// Callers must ensure `lo < hi`.
    fn next_f64_range(&mut self, lo: f64, hi: f64) -> f64 {
        debug_assert!(lo < hi, "next_f64_range requires lo < hi");
        lo + self.next_f64() * (hi - lo)
    }
}

/// SplitMix64 generator (Steele, Lea & Flood). One multiplication-free
/// state step plus a finalizer; passes through every `u64` seed.
#[derive(Clone, Debug)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Create a generator with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl RandomSource for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

//! Seedable coherent noise for terrain-like height fields.
//!
//! Wraps the `noise` crate's fractal Brownian motion over Perlin noise in a
//! sampler that is deterministic in (seed, octaves, falloff) and returns
//! values in [0, 1). Constructed once per generation pass, like the PRNG.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

/// Maximum octave count. Higher values add detail the pen cannot resolve.
const MAX_DETAIL: usize = 8;

/// Smallest accepted per-octave falloff. `Fbm` normalizes by the geometric
/// series of the persistence value and divides by zero at exactly 0, which
/// would turn every sample into NaN.
const MIN_FALLOFF: f64 = 0.01;

/// Coherent noise sampler: smooth, continuous in its inputs, deterministic.
///
/// `detail` (octave count) and `falloff` (per-octave amplitude decay) are
/// clamped to valid ranges rather than rejected, so any parameter vector
/// yields a usable sampler.
pub struct OctaveNoise {
    fbm: Fbm<Perlin>,
}

impl OctaveNoise {
    /// Creates a sampler for the given seed.
    ///
    /// `detail` is clamped to [1, 8]; `falloff` is clamped to [0.01, 1].
    pub fn new(seed: u64, detail: usize, falloff: f64) -> Self {
        let fbm = Fbm::<Perlin>::new(fold_seed(seed))
            .set_octaves(detail.clamp(1, MAX_DETAIL))
            .set_persistence(falloff.clamp(MIN_FALLOFF, 1.0));
        Self { fbm }
    }

    /// Samples the noise at (x, y). Returns a value in [0, 1).
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        // Fbm output is nominally in [-1, 1]; remap and clamp below 1 so
        // the contract range is closed-open.
        let v = self.fbm.get([x, y]) * 0.5 + 0.5;
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Folds a 64-bit pass seed into the 32-bit seed the noise crate accepts.
fn fold_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

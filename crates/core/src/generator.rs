//! The core `Generator` trait every pattern generator implements.
//!
//! The trait is object-safe so generators can be driven as `dyn Generator`
//! for runtime switching between patterns.

use crate::error::GeneratorError;
use crate::scene::Scene;
use serde_json::Value;

/// Core trait for plotter pattern generators.
///
/// A generator is a pure function of (parameters, seed): `regenerate()`
/// recomputes the whole scene from scratch — there is no incremental
/// update — and fills the scene cache that [`scene`](Generator::scene)
/// exposes. Until the first pass completes the cache is `None`, and export
/// paths must treat that as "nothing to export", not as a document.
pub trait Generator {
    /// Runs one full generation pass, replacing the cached scene.
    fn regenerate(&mut self) -> Result<(), GeneratorError>;

    /// The last generated scene, or `None` before the first pass.
    fn scene(&self) -> Option<&Scene>;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all recognized parameters, their types, ranges,
    /// and defaults.
    fn param_schema(&self) -> Value;
}

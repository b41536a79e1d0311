//! SVG file export of a [`Scene`].
//!
//! Serialization itself lives in `plotlines_core::svg` (always available);
//! this module adds the filesystem step and the empty-scene guard so the
//! CLI never writes a blank plot file.

use plotlines_core::{svg, GeneratorError, Scene};
use std::path::Path;

/// Writes a scene as an SVG document.
///
/// Returns `GeneratorError::EmptyScene` if the scene has no paths, or
/// `GeneratorError::Io` on write failure.
pub fn write_svg(scene: &Scene, path: &Path) -> Result<(), GeneratorError> {
    if scene.is_empty() {
        return Err(GeneratorError::EmptyScene);
    }
    let doc = svg::document(scene);
    std::fs::write(path, doc).map_err(|e| GeneratorError::Io(e.to_string()))
}

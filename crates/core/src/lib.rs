#![deny(unsafe_code)]
//! Core types for the plotlines pen-plotter pattern generators.
//!
//! Provides the [`Generator`] trait, the [`Scene`]/[`Layer`]/[`Path2`]
//! geometry model, camera projection ([`PitchCamera`], [`ViewCamera`]),
//! site distribution policies, the [`Xorshift64`] PRNG, the [`OctaveNoise`]
//! coherent-noise sampler, parameter helpers, and the SVG serializer.

pub use glam;

pub mod camera;
pub mod error;
pub mod generator;
pub mod geom;
pub mod noisefield;
pub mod params;
pub mod prng;
pub mod scene;
pub mod sites;
pub mod svg;

pub use camera::{PitchCamera, ViewCamera};
pub use error::GeneratorError;
pub use generator::Generator;
pub use geom::{Rect, Segment3};
pub use noisefield::OctaveNoise;
pub use prng::Xorshift64;
pub use scene::{Layer, Path2, Scene, Stroke};

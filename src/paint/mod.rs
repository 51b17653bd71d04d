//! Brush painting onto layer stacks.
//!
//! This module provides:
//! - [`paint`]: the per-patch stroke algorithm
//! - [`PaintStroke`]: a stroke, also usable as a Bevy message
//! - [`TerrainPaintSettings`] and [`PatchGeometry`]: patch sizing
//! - Systems and components wiring strokes to patch entities

mod engine;
mod settings;
mod systems;

pub use engine::{PaintStroke, paint};
pub use settings::{PATCH_SIZE, PatchGeometry, TILE_SIZE, TerrainPaintSettings};
pub use systems::{LayersDirty, TerrainBrush, TerrainPaintSystems, TerrainPatch, apply_paint_strokes};

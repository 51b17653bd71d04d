//! # bevy_terrain_layers
//!
//! Texture layer compositing and soft-brush painting for terrain patches.
//!
//! Each patch carries up to four stacked texture layers. The base layer
//! covers everything beneath; the others own a 64×64 alpha grid describing
//! how much of them shows. Painting adjusts those grids so the chosen
//! texture's share moves toward a target strength under a circular brush.
//!
//! ## Features
//!
//! - Relative/absolute alpha decode and encode shared by every edit
//! - Slot management with a hard four-layer ceiling and automatic pruning
//! - Layer swap, merge and duplicate removal
//! - Conversion to and from cumulative alpha for persistence
//! - Reference-counted texture handles shared across patches
//!
//! ## Quick Start
//!
//! ```
//! use bevy::math::Vec2;
//! use bevy_terrain_layers::prelude::*;
//!
//! let registry = TextureRegistry::new();
//! let mut stack = LayerStack::with_base(&registry.acquire("grass"));
//! let patch = PatchGeometry::new(Vec2::ZERO, PATCH_SIZE);
//! let brush = Brush::new(10.0, 0.5);
//!
//! let stroke = PaintStroke::new(patch.center(), registry.acquire("rock"));
//! let changed = paint(&mut stack, &patch, &brush, &stroke).unwrap();
//!
//! assert!(changed);
//! assert_eq!(stack.len(), 2);
//! ```

pub mod brush;
pub mod layers;
pub mod paint;
mod plugin;
pub mod texture;

pub mod prelude {
    pub use crate::brush::{Brush, BrushShape, CustomBrush};
    pub use crate::layers::{
        AlphaEncoding, AlphaGrid, LayerError, LayerFlags, LayerRecord, LayerStack, MAX_LAYERS,
    };
    pub use crate::paint::{
        LayersDirty, PATCH_SIZE, PaintStroke, PatchGeometry, TerrainBrush, TerrainPaintSettings,
        TerrainPatch, paint,
    };
    pub use crate::plugin::TerrainPaintPlugin;
    pub use crate::texture::{TextureRef, TextureRegistry};
}

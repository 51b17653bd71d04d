//! Systems applying paint strokes to patch entities.

use bevy::prelude::*;

use super::engine::{PaintStroke, paint};
use super::settings::{PatchGeometry, TerrainPaintSettings};
use crate::brush::Brush;
use crate::layers::LayerStack;

/// System set for terrain paint systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TerrainPaintSystems;

/// Placement of a terrain patch entity.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct TerrainPatch {
    /// World-space corner of the patch's texel (0, 0).
    pub origin: Vec2,
}

impl TerrainPatch {
    pub fn new(origin: Vec2) -> Self {
        Self { origin }
    }
}

/// Marker component indicating this patch's layers need re-uploading.
#[derive(Component, Clone, Copy, Default, Debug)]
pub struct LayersDirty;

/// The brush used for incoming [`PaintStroke`] messages.
#[derive(Resource, Clone, Debug, Default)]
pub struct TerrainBrush {
    pub brush: Brush,
}

impl TerrainBrush {
    pub fn from_settings(settings: &TerrainPaintSettings) -> Self {
        Self {
            brush: Brush::new(settings.default_radius, settings.default_hardness),
        }
    }
}

/// Paints every queued stroke onto every patch it reaches.
///
/// Patches whose stack changed get [`LayersDirty`]. A patch with no free
/// slot for the stroke's texture is skipped.
pub fn apply_paint_strokes(
    mut commands: Commands,
    mut strokes: MessageReader<PaintStroke>,
    brush: Res<TerrainBrush>,
    settings: Res<TerrainPaintSettings>,
    mut patches: Query<(Entity, &TerrainPatch, &mut LayerStack)>,
) {
    for stroke in strokes.read() {
        for (entity, patch, mut stack) in &mut patches {
            let geometry = PatchGeometry::new(patch.origin, settings.patch_size);
            match paint(&mut stack, &geometry, &brush.brush, stroke) {
                Ok(true) => {
                    commands.entity(entity).insert(LayersDirty);
                }
                Ok(false) => {}
                Err(err) => {
                    debug!("Skipping stroke on patch {}: {}", entity, err);
                }
            }
        }
    }
}

//! Plugin for terrain texture painting.
use bevy::prelude::*;

use crate::paint::{
    PaintStroke, TerrainBrush, TerrainPaintSettings, TerrainPaintSystems, apply_paint_strokes,
};
use crate::texture::TextureRegistry;

/// Plugin that adds terrain layer painting to Bevy.
///
/// This plugin registers:
/// - [`TerrainPaintSettings`], [`TerrainBrush`] and [`TextureRegistry`] resources
/// - The [`PaintStroke`] message
/// - [`apply_paint_strokes`] in `Update`, inside [`TerrainPaintSystems`]
///
/// # Example
/// ```ignore
/// use bevy::prelude::*;
/// use bevy_terrain_layers::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(TerrainPaintPlugin::default())
///     .run();
/// ```
#[derive(Default)]
pub struct TerrainPaintPlugin {
    pub settings: TerrainPaintSettings,
}

impl TerrainPaintPlugin {
    pub fn new(settings: TerrainPaintSettings) -> Self {
        Self { settings }
    }
}

impl Plugin for TerrainPaintPlugin {
    fn build(&self, app: &mut App) {
        info!(
            "Terrain painting enabled with patch size {}",
            self.settings.patch_size
        );
        app.insert_resource(self.settings.clone())
            .insert_resource(TerrainBrush::from_settings(&self.settings))
            .init_resource::<TextureRegistry>()
            .add_message::<PaintStroke>()
            .add_systems(Update, apply_paint_strokes.in_set(TerrainPaintSystems));
    }
}

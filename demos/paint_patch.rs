//! Paints one stroke across a row of terrain patches.
//!
//! Runs a single frame headless and logs which patches picked up the new
//! texture.

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_terrain_layers::paint::TerrainPaintSystems;
use bevy_terrain_layers::prelude::*;

fn main() {
    let mut app = App::new();
    app.add_plugins(LogPlugin::default())
        .add_plugins(TerrainPaintPlugin::new(
            TerrainPaintSettings::new().with_default_radius(20.0),
        ))
        .add_systems(Startup, (spawn_patches, send_stroke).chain())
        .add_systems(Update, report_dirty.after(TerrainPaintSystems));

    app.update();
}

fn spawn_patches(mut commands: Commands, registry: Res<TextureRegistry>) {
    let grass = registry.acquire("tileset/grass.blp");
    for i in 0..4 {
        commands.spawn((
            TerrainPatch::new(Vec2::new(i as f32 * PATCH_SIZE, 0.0)),
            LayerStack::with_base(&grass),
        ));
    }
}

fn send_stroke(mut strokes: MessageWriter<PaintStroke>, registry: Res<TextureRegistry>) {
    // straddles the first two patches
    let rock = registry.acquire("tileset/rock.blp");
    strokes.write(
        PaintStroke::new(Vec2::new(PATCH_SIZE, PATCH_SIZE * 0.5), rock).with_pressure(0.8),
    );
}

fn report_dirty(
    patches: Query<(&TerrainPatch, &LayerStack), Added<LayersDirty>>,
    registry: Res<TextureRegistry>,
) {
    for (patch, stack) in &patches {
        let names: Vec<&str> = stack.layers().iter().map(|layer| layer.texture.name()).collect();
        info!("Patch at {} now has layers {:?}", patch.origin, names);
    }
    info!("Loaded textures: {:?}", registry.loaded_names());
}

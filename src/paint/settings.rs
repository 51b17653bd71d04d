//! Patch geometry and plugin-wide paint settings.

use bevy::prelude::*;

use crate::brush::DEFAULT_KERNEL_SIZE;
use crate::layers::ALPHA_SIZE;

/// Edge length of a map tile in world units.
pub const TILE_SIZE: f32 = 533.333_33;

/// Edge length of a terrain patch (1/16 of a tile).
pub const PATCH_SIZE: f32 = TILE_SIZE / 16.0;

/// Settings shared by every painted patch.
#[derive(Resource, Clone, Debug)]
pub struct TerrainPaintSettings {
    /// World-space edge length of one patch.
    ///
    /// Default: [`PATCH_SIZE`]
    pub patch_size: f32,

    /// Radius of the brush created by the plugin.
    ///
    /// Default: 15.0
    pub default_radius: f32,

    /// Hardness of the brush created by the plugin.
    ///
    /// Default: 0.5
    pub default_hardness: f32,

    /// Edge length of the brush preview kernel.
    ///
    /// Default: 256
    pub kernel_size: usize,
}

impl Default for TerrainPaintSettings {
    fn default() -> Self {
        Self {
            patch_size: PATCH_SIZE,
            default_radius: 15.0,
            default_hardness: 0.5,
            kernel_size: DEFAULT_KERNEL_SIZE,
        }
    }
}

impl TerrainPaintSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patch_size(mut self, patch_size: f32) -> Self {
        self.patch_size = patch_size;
        self
    }

    pub fn with_default_radius(mut self, radius: f32) -> Self {
        self.default_radius = radius;
        self
    }

    pub fn with_default_hardness(mut self, hardness: f32) -> Self {
        self.default_hardness = hardness;
        self
    }

    pub fn with_kernel_size(mut self, size: usize) -> Self {
        self.kernel_size = size;
        self
    }
}

/// World-space placement of one patch's texel grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatchGeometry {
    /// Corner of texel (0, 0).
    pub origin: Vec2,
    /// Edge length of the patch.
    pub size: f32,
}

impl PatchGeometry {
    pub fn new(origin: Vec2, size: f32) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn texel_size(&self) -> f32 {
        self.size / ALPHA_SIZE as f32
    }

    pub fn center(&self) -> Vec2 {
        self.origin + Vec2::splat(self.size * 0.5)
    }

    /// Distance from the center to a corner.
    pub fn half_diagonal(&self) -> f32 {
        self.size * std::f32::consts::FRAC_1_SQRT_2
    }

    /// World position of the center of texel `(x, y)`.
    #[inline]
    pub fn texel_center(&self, x: usize, y: usize) -> Vec2 {
        self.origin + (Vec2::new(x as f32, y as f32) + Vec2::splat(0.5)) * self.texel_size()
    }

    /// Whether a circle can touch this patch at all.
    pub fn may_intersect(&self, center: Vec2, radius: f32) -> bool {
        self.center().distance(center) <= radius + self.half_diagonal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = TerrainPaintSettings::default();
        assert!((settings.patch_size - 33.333_33).abs() < 1e-3);
        assert_eq!(settings.kernel_size, 256);
    }

    #[test]
    fn test_settings_builder() {
        let settings = TerrainPaintSettings::new()
            .with_patch_size(64.0)
            .with_default_radius(4.0)
            .with_default_hardness(0.9)
            .with_kernel_size(32);
        assert_eq!(settings.patch_size, 64.0);
        assert_eq!(settings.default_radius, 4.0);
        assert_eq!(settings.default_hardness, 0.9);
        assert_eq!(settings.kernel_size, 32);
    }

    #[test]
    fn test_patch_geometry() {
        let patch = PatchGeometry::new(Vec2::new(64.0, 0.0), 64.0);
        assert_eq!(patch.texel_size(), 1.0);
        assert_eq!(patch.center(), Vec2::new(96.0, 32.0));
        assert_eq!(patch.texel_center(0, 0), Vec2::new(64.5, 0.5));
        assert_eq!(patch.texel_center(63, 63), Vec2::new(127.5, 63.5));
    }

    #[test]
    fn test_may_intersect() {
        let patch = PatchGeometry::new(Vec2::ZERO, 64.0);
        assert!(patch.may_intersect(Vec2::new(32.0, 32.0), 1.0));
        // just past the corner
        assert!(patch.may_intersect(Vec2::new(66.0, 66.0), 3.0));
        assert!(!patch.may_intersect(Vec2::new(200.0, 200.0), 10.0));
    }
}

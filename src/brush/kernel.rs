//! Rasterized brush footprint for cursor previews.

use super::shape::Brush;

/// Default edge length of the preview kernel.
pub const DEFAULT_KERNEL_SIZE: usize = 256;

impl Brush {
    /// Rasterizes the brush shape on a `size × size` grid spanning [-1, 1]².
    ///
    /// Values match the shape of [`BrushShape::falloff`](super::BrushShape::falloff)
    /// in normalized units, scaled to 0..=255. Clears the dirty flag.
    pub fn preview_kernel(&mut self, size: usize) -> Vec<u8> {
        self.dirty = false;

        let step = 2.0 / size as f32;
        let hardness = self.hardness();
        let mut kernel = Vec::with_capacity(size * size);

        for j in 0..size {
            let y = -1.0 + j as f32 * step;
            for i in 0..size {
                let x = -1.0 + i as f32 * step;
                let dist = (x * x + y * y).sqrt();

                let value = if dist > 1.0 {
                    0
                } else if dist < hardness || hardness >= 1.0 {
                    255
                } else {
                    (255.0 * (1.0 - (dist - hardness) / (1.0 - hardness)) + 0.5) as u8
                };
                kernel.push(value);
            }
        }

        kernel
    }
}

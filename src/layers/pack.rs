//! Packing alpha grids into a single RGBA texture for upload.

use bytemuck::{Pod, Zeroable};

use super::alpha_grid::ALPHA_TEXELS;
use super::stack::LayerStack;

/// One texel of the packed alpha texture.
///
/// Channels r, g, b hold the relative coverage of layers 1, 2 and 3; unused
/// channels are 0. Alpha is always 255.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct AlphaTexel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl AlphaTexel {
    /// Packs the channels into a little-endian `u32`.
    #[inline]
    pub fn pack(&self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, self.a])
    }
}

/// Packs every non-base grid of `stack` into 64×64 RGBA texels.
pub fn pack_alpha_texture(stack: &LayerStack) -> Vec<AlphaTexel> {
    let grids = stack.grids();
    (0..ALPHA_TEXELS)
        .map(|texel| {
            let channel = |k: usize| grids.get(k).map(|grid| grid.value(texel)).unwrap_or(0);
            AlphaTexel {
                r: channel(0),
                g: channel(1),
                b: channel(2),
                a: 255,
            }
        })
        .collect()
}

/// Raw byte view of packed texels, ready for an RGBA8 upload.
pub fn alpha_texture_bytes(texels: &[AlphaTexel]) -> &[u8] {
    bytemuck::cast_slice(texels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::AlphaGrid;
    use crate::texture::TextureRegistry;

    #[test]
    fn test_base_only_packs_empty_channels() {
        let registry = TextureRegistry::new();
        let stack = LayerStack::with_base(&registry.acquire("t0"));

        let texels = pack_alpha_texture(&stack);
        assert_eq!(texels.len(), ALPHA_TEXELS);
        assert!(texels.iter().all(|t| *t == AlphaTexel { r: 0, g: 0, b: 0, a: 255 }));
    }

    #[test]
    fn test_channels_follow_layer_order() {
        let registry = TextureRegistry::new();
        let mut stack = LayerStack::with_base(&registry.acquire("t0"));
        stack.add_layer(&registry.acquire("t1")).unwrap();
        stack.add_layer(&registry.acquire("t2")).unwrap();
        *stack.grid_mut(1).unwrap() = AlphaGrid::filled(10);
        *stack.grid_mut(2).unwrap() = AlphaGrid::filled(20);

        let texels = pack_alpha_texture(&stack);
        assert_eq!(texels[100], AlphaTexel { r: 10, g: 20, b: 0, a: 255 });
        assert_eq!(texels[100].pack(), 10 | (20 << 8) | (255 << 24));

        let bytes = alpha_texture_bytes(&texels);
        assert_eq!(bytes.len(), ALPHA_TEXELS * 4);
        assert_eq!(&bytes[..4], &[10, 20, 0, 255]);
    }
}

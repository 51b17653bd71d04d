//! Per-layer flag bits and texture scrolling animation.

use bevy::prelude::*;

/// Flag word stored alongside each layer's texture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayerFlags(pub u32);

impl LayerFlags {
    pub const NONE: Self = Self(0);
    pub const ANIMATE_45: Self = Self(0x1);
    pub const ANIMATE_90: Self = Self(0x2);
    pub const ANIMATE_180: Self = Self(0x4);
    pub const ANIM_FAST: Self = Self(0x8);
    pub const ANIM_FASTER: Self = Self(0x10);
    pub const ANIM_FASTEST: Self = Self(0x20);
    pub const ANIMATE: Self = Self(0x40);
    pub const GLOW: Self = Self(0x80);
    /// Set on every layer that owns an alpha grid.
    pub const USE_ALPHA: Self = Self(0x100);
    pub const ALPHA_COMPRESSED: Self = Self(0x200);
    pub const REFLECTION: Self = Self(0x400);

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Decoded scrolling animation, if [`Self::ANIMATE`] is set.
    pub fn animation(self) -> Option<TextureAnimation> {
        TextureAnimation::from_flags(self)
    }
}

impl std::ops::BitOr for LayerFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Period used when scrolling terrain layer textures.
pub const DEFAULT_ANIMATION_PERIOD: u32 = 1600;

const DIRECTION_X: [f32; 8] = [0.0, 1.0, 1.0, 1.0, 0.0, -1.0, -1.0, -1.0];
const DIRECTION_Y: [f32; 8] = [1.0, 1.0, 0.0, -1.0, -1.0, -1.0, 0.0, 1.0];

/// Texture-space scrolling described by a layer's flag bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureAnimation {
    /// Index into the 8-way direction table (45° steps).
    pub direction: u8,
    /// Speed factor in 1/15 units per animation tick.
    pub speed: u32,
}

impl TextureAnimation {
    pub fn from_flags(flags: LayerFlags) -> Option<Self> {
        if !flags.contains(LayerFlags::ANIMATE) {
            return None;
        }
        let f = flags.bits();
        Some(Self {
            direction: (f & 0x7) as u8,
            speed: (f & 0x08) | ((f & 0x10) >> 2) | ((f & 0x20) >> 4) | ((f & 0x40) >> 6),
        })
    }

    /// Unit-ish UV scroll direction.
    pub fn direction_vector(&self) -> Vec2 {
        let dir = self.direction as usize & 0x7;
        Vec2::new(-DIRECTION_X[dir], DIRECTION_Y[dir])
    }

    /// UV translation at `anim_time`, wrapping every `period` ticks.
    pub fn uv_offset(&self, anim_time: f32, period: u32) -> Vec2 {
        if period == 0 {
            return Vec2::ZERO;
        }
        let ticks = (anim_time * (self.speed as f32 / 15.0)) as i64;
        let fraction = ticks.rem_euclid(period as i64) as f32 / period as f32;
        self.direction_vector() * fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_ops() {
        let flags = LayerFlags::USE_ALPHA | LayerFlags::GLOW;
        assert!(flags.contains(LayerFlags::USE_ALPHA));
        assert!(!flags.contains(LayerFlags::ANIMATE));
        assert_eq!(flags.without(LayerFlags::GLOW), LayerFlags::USE_ALPHA);
    }

    #[test]
    fn test_no_animation_without_flag() {
        assert!(LayerFlags::ANIM_FAST.animation().is_none());
    }

    #[test]
    fn test_animation_decode() {
        let flags = LayerFlags::ANIMATE | LayerFlags::ANIMATE_90 | LayerFlags::ANIM_FAST;
        let anim = flags.animation().unwrap();

        assert_eq!(anim.direction, 2);
        // 0x8 plus the ANIMATE bit shifted down to 1
        assert_eq!(anim.speed, 9);
        assert_eq!(anim.direction_vector(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_uv_offset_wraps() {
        let anim = TextureAnimation {
            direction: 0,
            speed: 15,
        };
        assert_eq!(anim.uv_offset(400.0, 1600), Vec2::new(0.0, 0.25));
        assert_eq!(anim.uv_offset(2000.0, 1600), Vec2::new(0.0, 0.25));
        assert_eq!(anim.uv_offset(100.0, 0), Vec2::ZERO);
    }
}

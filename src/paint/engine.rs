//! Applying brush strokes to a layer stack.

use bevy::prelude::*;

use super::settings::PatchGeometry;
use crate::brush::BrushShape;
use crate::layers::{ALPHA_SIZE, AlphaGrid, LayerError, LayerStack, MAX_LAYERS, Visibility};
use crate::texture::TextureRef;

/// One brush dab of a texture.
#[derive(Message, Clone, Debug)]
pub struct PaintStroke {
    /// Brush center in world space.
    pub center: Vec2,
    /// Texture being painted.
    pub texture: TextureRef,
    /// Target absolute visibility, 0..=255.
    pub strength: f32,
    /// Fraction of the way toward `strength` applied at full falloff, 0..=1.
    pub pressure: f32,
}

impl PaintStroke {
    pub fn new(center: Vec2, texture: TextureRef) -> Self {
        Self {
            center,
            texture,
            strength: 255.0,
            pressure: 1.0,
        }
    }

    pub fn with_strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_pressure(mut self, pressure: f32) -> Self {
        self.pressure = pressure;
        self
    }
}

/// Paints `stroke` onto one patch.
///
/// Moves the painted texture's absolute visibility toward
/// `stroke.strength` at every texel under the brush and takes the difference
/// from the other layers in proportion to their share. Adds the texture as a
/// new layer when needed and erases layers that end up invisible everywhere.
///
/// Returns whether the stack changed. Fails with [`LayerError::NoFreeSlot`]
/// when a new texture is needed but every slot holds a visible layer; the
/// stack is left as it was.
pub fn paint<B: BrushShape + ?Sized>(
    stack: &mut LayerStack,
    patch: &PatchGeometry,
    brush: &B,
    stroke: &PaintStroke,
) -> Result<bool, LayerError> {
    let radius = brush.radius();
    if !patch.may_intersect(stroke.center, radius) {
        return Ok(false);
    }

    let target = match stack.find(&stroke.texture) {
        Some(index) => {
            if stack.len() == 1 {
                return Ok(true);
            }
            index
        }
        // nothing to remove
        None if stroke.strength == 0.0 => return Ok(false),
        None => {
            if stack.is_full() {
                stack.prune_invisible();
                if stack.is_full() {
                    debug!("No free texture slot for {}", stroke.texture.name());
                    return Err(LayerError::NoFreeSlot);
                }
            }
            let index = stack.add_layer(&stroke.texture)?;
            if index == 0 {
                return Ok(true);
            }
            index
        }
    };

    let count = stack.len();
    let mut seen = [false; MAX_LAYERS];
    let mut changed = false;

    for y in 0..ALPHA_SIZE {
        for x in 0..ALPHA_SIZE {
            let texel = AlphaGrid::index(x, y);
            let dist = patch.texel_center(x, y).distance(stroke.center);
            let mut visibility = stack.visibility(texel);

            if dist > radius || visibility[target] == stroke.strength {
                mark_visible(&mut seen, &visibility, count);
                continue;
            }

            changed = true;
            let pressure = stroke.pressure * brush.falloff(dist);
            let diff = (stroke.strength - visibility[target]) * pressure;
            redistribute(&mut visibility, count, target, diff);

            stack.store_visibility(texel, &visibility);
            mark_visible(&mut seen, &stack.visibility(texel), count);
        }
    }

    if !changed {
        return Ok(false);
    }

    for index in (1..count).rev() {
        if !seen[index] {
            debug!("Erasing layer {} left invisible by stroke", index);
            stack.erase_layer(index)?;
        }
    }

    Ok(changed)
}

/// Shifts `diff` of absolute visibility onto `target`, taking it from the
/// other layers.
fn redistribute(visibility: &mut Visibility, count: usize, target: usize, diff: f32) {
    let current = visibility[target];

    if current + diff >= 255.0 {
        for (k, v) in visibility.iter_mut().enumerate().take(count) {
            *v = if k == target { 255.0 } else { 0.0 };
        }
    } else if current == 255.0 && diff < 0.0 {
        // every other share is zero; hand the whole difference to a neighbor
        let neighbor = if target == 0 { 1 } else { target - 1 };
        visibility[target] += diff;
        visibility[neighbor] -= diff;
    } else {
        let other = 255.0 - current;
        visibility[target] += diff;
        for (k, v) in visibility.iter_mut().enumerate().take(count) {
            if k == target || *v == 0.0 {
                continue;
            }
            *v -= diff * (*v / other);
        }
    }
}

fn mark_visible(seen: &mut [bool; MAX_LAYERS], visibility: &Visibility, count: usize) {
    for (seen, &v) in seen.iter_mut().zip(visibility).take(count) {
        *seen |= v > 0.0;
    }
}

//! Ordered stack of up to four texture layers for one terrain patch.

use bevy::prelude::*;

use super::alpha_grid::{ALPHA_TEXELS, AlphaGrid};
use super::compositor::{self, Visibility};
use super::error::LayerError;
use super::flags::LayerFlags;
use crate::texture::TextureRef;

/// Maximum number of layers per patch, base included.
pub const MAX_LAYERS: usize = 4;

/// Texture identity and metadata for one stack position.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub texture: TextureRef,
    pub flags: LayerFlags,
    pub effect_id: u32,
}

impl Layer {
    pub fn new(texture: TextureRef) -> Self {
        Self {
            texture,
            flags: LayerFlags::NONE,
            effect_id: 0,
        }
    }
}

/// The texture layers of a terrain patch.
///
/// Layer 0 is the base: it has no alpha grid and shows wherever the layers
/// above leave room. Every other layer owns one [`AlphaGrid`] holding its
/// relative coverage, so `grids.len() == layers.len() - 1` always holds.
///
/// # Example
///
/// ```
/// use bevy_terrain_layers::layers::LayerStack;
/// use bevy_terrain_layers::texture::TextureRegistry;
///
/// let registry = TextureRegistry::new();
/// let mut stack = LayerStack::with_base(&registry.acquire("grass"));
///
/// let rock = stack.add_layer(&registry.acquire("rock")).unwrap();
/// assert_eq!(rock, 1);
/// assert_eq!(stack.len(), 2);
/// ```
#[derive(Component, Clone, Debug, Default)]
pub struct LayerStack {
    layers: Vec<Layer>,
    grids: Vec<AlphaGrid>,
}

impl LayerStack {
    /// Creates a stack with a single base layer.
    pub fn with_base(texture: &TextureRef) -> Self {
        let mut layers = Vec::with_capacity(MAX_LAYERS);
        layers.push(Layer::new(texture.clone()));
        Self {
            layers,
            grids: Vec::with_capacity(MAX_LAYERS - 1),
        }
    }

    /// Builds a stack from already validated parts.
    pub(crate) fn from_parts(layers: Vec<Layer>, grids: Vec<AlphaGrid>) -> Self {
        debug_assert_eq!(grids.len() + 1, layers.len());
        Self { layers, grids }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.layers.len() >= MAX_LAYERS
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn texture(&self, index: usize) -> Option<&TextureRef> {
        self.layers.get(index).map(|layer| &layer.texture)
    }

    pub fn flags(&self, index: usize) -> Option<LayerFlags> {
        self.layers.get(index).map(|layer| layer.flags)
    }

    pub fn effect_id(&self, index: usize) -> Option<u32> {
        self.layers.get(index).map(|layer| layer.effect_id)
    }

    pub fn set_flags(&mut self, index: usize, flags: LayerFlags) -> Result<(), LayerError> {
        self.check_index(index)?;
        self.layers[index].flags = flags;
        Ok(())
    }

    pub fn set_effect_id(&mut self, index: usize, effect_id: u32) -> Result<(), LayerError> {
        self.check_index(index)?;
        self.layers[index].effect_id = effect_id;
        Ok(())
    }

    /// Alpha grid of layer `index`. The base layer has none.
    pub fn grid(&self, index: usize) -> Option<&AlphaGrid> {
        index.checked_sub(1).and_then(|i| self.grids.get(i))
    }

    pub fn grid_mut(&mut self, index: usize) -> Option<&mut AlphaGrid> {
        index.checked_sub(1).and_then(|i| self.grids.get_mut(i))
    }

    /// All alpha grids, bottom to top (layer 1 first).
    pub fn grids(&self) -> &[AlphaGrid] {
        &self.grids
    }

    /// Stack position of `texture`, if present.
    pub fn find(&self, texture: &TextureRef) -> Option<usize> {
        self.layers.iter().position(|layer| &layer.texture == texture)
    }

    /// Absolute visibility of every layer at a flat texel offset.
    pub fn visibility(&self, texel: usize) -> Visibility {
        compositor::decode(&self.grids, texel)
    }

    /// Stores absolute visibility for a texel in relative form.
    pub fn store_visibility(&mut self, texel: usize, visibility: &Visibility) {
        compositor::encode(visibility, &mut self.grids, texel);
    }

    // =========================================================================
    // Slot management
    // =========================================================================

    /// Appends an initially invisible layer and returns its index.
    ///
    /// On an empty stack (after [`Self::clear`]) the texture becomes the
    /// base layer at index 0.
    pub fn add_layer(&mut self, texture: &TextureRef) -> Result<usize, LayerError> {
        if self.is_full() {
            return Err(LayerError::Full);
        }

        let index = self.layers.len();
        if index > 0 {
            self.grids.push(AlphaGrid::new());
        }
        self.layers.push(Layer::new(texture.clone()));
        Ok(index)
    }

    /// Removes layer `index`, releasing its texture reference.
    ///
    /// Layers above shift down by one. Erasing the base promotes layer 1 to
    /// base and drops its grid.
    pub fn erase_layer(&mut self, index: usize) -> Result<(), LayerError> {
        self.check_index(index)?;
        self.remove_slot(index);
        Ok(())
    }

    /// Erases every layer.
    pub fn clear(&mut self) {
        self.grids.clear();
        self.layers.clear();
    }

    /// Exchanges two layers, texture identity and absolute visibility both.
    ///
    /// Returns `false` without touching the stack if `a == b` or either index
    /// is out of range.
    pub fn swap_layers(&mut self, a: usize, b: usize) -> bool {
        if a == b || a >= self.len() || b >= self.len() {
            return false;
        }

        self.layers.swap(a, b);
        for texel in 0..ALPHA_TEXELS {
            let mut visibility = self.visibility(texel);
            visibility.swap(a, b);
            self.store_visibility(texel, &visibility);
        }
        true
    }

    /// Points the layer using `old` at `new` instead.
    ///
    /// Does nothing if `new` is already in the stack.
    pub fn replace_texture(&mut self, old: &TextureRef, new: &TextureRef) -> bool {
        if self.find(new).is_some() {
            return false;
        }
        let Some(index) = self.find(old) else {
            return false;
        };
        self.layers[index].texture = new.clone();
        true
    }

    /// Which layers are visible at one or more texels.
    pub fn visible_layers(&self) -> [bool; MAX_LAYERS] {
        let mut seen = [false; MAX_LAYERS];
        for texel in 0..ALPHA_TEXELS {
            let visibility = self.visibility(texel);
            for (seen, v) in seen.iter_mut().zip(visibility).take(self.len()) {
                *seen |= v > 0.0;
            }
        }
        seen
    }

    /// Erases every layer that is invisible at all texels.
    ///
    /// A base layer that is covered everywhere is replaced by layer 1 through
    /// a visibility-preserving swap. Returns whether anything was removed.
    pub fn prune_invisible(&mut self) -> bool {
        if self.len() < 2 {
            return false;
        }

        // Removing a layer with no visible texel leaves the others' absolute
        // visibility untouched, so one scan covers the whole pass.
        let seen = self.visible_layers();
        let mut removed = false;

        for index in (1..self.len()).rev() {
            if !seen[index] {
                debug!("Pruning invisible layer {} ({})", index, self.layers[index].texture.name());
                self.remove_slot(index);
                removed = true;
            }
        }

        if self.len() >= 2 && !seen[0] {
            debug!("Base layer {} is fully covered, replacing it", self.layers[0].texture.name());
            self.swap_layers(0, 1);
            self.remove_slot(1);
            removed = true;
        }

        removed
    }

    // =========================================================================
    // Merging
    // =========================================================================

    /// Folds layer `b`'s visibility into layer `a` and erases `b`.
    ///
    /// When either side is the base, the other layer is erased without
    /// transferring its coverage.
    pub fn merge(&mut self, a: usize, b: usize) -> Result<(), LayerError> {
        self.check_index(a)?;
        self.check_index(b)?;
        self.merge_unchecked(a, b);
        Ok(())
    }

    /// Merges layers that share a texture.
    ///
    /// Single forward pass: a merge shifts later layers down, so the layer
    /// that moves into the merged slot is not compared again until the next
    /// call.
    pub fn remove_duplicates(&mut self) -> bool {
        let mut changed = false;

        let mut i = 0;
        while i < self.len() {
            let mut j = i + 1;
            while j < self.len() {
                if self.layers[i].texture == self.layers[j].texture {
                    debug!("Merging duplicate layer {} into {}", j, i);
                    self.merge_unchecked(i, j);
                    changed = true;
                }
                j += 1;
            }
            i += 1;
        }

        changed
    }

    /// Merge body shared by [`Self::merge`] and [`Self::remove_duplicates`].
    /// Both indices must be below `len()`.
    fn merge_unchecked(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        if a == 0 {
            self.remove_slot(b);
            return;
        }
        if b == 0 {
            self.remove_slot(a);
            return;
        }

        for texel in 0..ALPHA_TEXELS {
            let mut visibility = self.visibility(texel);
            visibility[a] += visibility[b];
            visibility[b] = 0.0;
            self.store_visibility(texel, &visibility);
        }
        self.remove_slot(b);
    }

    // =========================================================================
    // Format bridging
    // =========================================================================

    /// Rewrites every grid with absolute visibility values.
    pub fn to_cumulative_form(&mut self) {
        compositor::to_cumulative_form(&mut self.grids);
    }

    /// Treats stored values as absolute visibility and restores relative form.
    pub fn to_relative_form(&mut self) {
        compositor::to_relative_form(&mut self.grids);
    }

    fn check_index(&self, index: usize) -> Result<(), LayerError> {
        if index >= self.len() {
            return Err(LayerError::IndexOutOfRange {
                index,
                count: self.len(),
            });
        }
        Ok(())
    }

    /// Removes one slot and closes the gap. The grid removed is the slot's own,
    /// or layer 1's when the base goes away.
    fn remove_slot(&mut self, index: usize) -> Layer {
        if !self.grids.is_empty() {
            self.grids.remove(index.saturating_sub(1));
        }
        self.layers.remove(index)
    }
}

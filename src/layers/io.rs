//! Loading and exporting stacks through plain layer records.
//!
//! The on-disk layout belongs to whoever reads the terrain file. This module
//! only deals with what that reader hands over: per-layer texture, flags,
//! effect id, and raw alpha bytes in one of two encodings.

use bevy::prelude::*;

use super::alpha_grid::{ALPHA_TEXELS, AlphaGrid};
use super::error::LayerError;
use super::flags::LayerFlags;
use super::stack::{Layer, LayerStack, MAX_LAYERS};
use crate::texture::TextureRef;

/// How raw alpha bytes encode coverage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlphaEncoding {
    /// Each value is the layer's opacity over everything below it.
    #[default]
    Relative,
    /// Each value is the layer's absolute share of the final texel.
    Cumulative,
}

/// One layer as stored by a terrain data source.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerRecord {
    pub texture: TextureRef,
    pub flags: LayerFlags,
    pub effect_id: u32,
    /// 4096 alpha bytes, `None` for the base layer.
    pub alpha: Option<Vec<u8>>,
}

impl LayerRecord {
    /// Record for a base layer.
    pub fn base(texture: TextureRef) -> Self {
        Self {
            texture,
            flags: LayerFlags::NONE,
            effect_id: 0,
            alpha: None,
        }
    }

    /// Record for a blended layer.
    pub fn blended(texture: TextureRef, alpha: Vec<u8>) -> Self {
        Self {
            texture,
            flags: LayerFlags::USE_ALPHA,
            effect_id: 0,
            alpha: Some(alpha),
        }
    }

    pub fn with_flags(mut self, flags: LayerFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_effect_id(mut self, effect_id: u32) -> Self {
        self.effect_id = effect_id;
        self
    }
}

impl LayerStack {
    /// Builds a stack from loaded records.
    ///
    /// Cumulative alpha is converted to the relative form every edit
    /// operation expects.
    pub fn from_records(
        records: Vec<LayerRecord>,
        encoding: AlphaEncoding,
    ) -> Result<Self, LayerError> {
        validate_records(&records)?;

        let mut layers = Vec::with_capacity(MAX_LAYERS);
        let mut grids = Vec::with_capacity(MAX_LAYERS - 1);
        for (index, record) in records.into_iter().enumerate() {
            if let Some(alpha) = &record.alpha {
                let grid = AlphaGrid::from_bytes(alpha)
                    .ok_or_else(|| LayerError::alpha_size(index, alpha.len()))?;
                grids.push(grid);
            }
            layers.push(Layer {
                texture: record.texture,
                flags: record.flags,
                effect_id: record.effect_id,
            });
        }

        let mut stack = Self::from_parts(layers, grids);
        if encoding == AlphaEncoding::Cumulative {
            stack.to_relative_form();
        }
        Ok(stack)
    }

    /// Snapshots the stack as records in the requested encoding.
    ///
    /// The live stack keeps its relative form.
    pub fn to_records(&self, encoding: AlphaEncoding) -> Vec<LayerRecord> {
        let mut grids = self.grids().to_vec();
        if encoding == AlphaEncoding::Cumulative {
            super::compositor::to_cumulative_form(&mut grids);
        }

        self.layers()
            .iter()
            .enumerate()
            .map(|(index, layer)| {
                let alpha = index
                    .checked_sub(1)
                    .map(|i| grids[i].as_bytes().to_vec());
                let flags = if alpha.is_some() {
                    layer.flags | LayerFlags::USE_ALPHA
                } else {
                    layer.flags.without(LayerFlags::USE_ALPHA)
                };
                LayerRecord {
                    texture: layer.texture.clone(),
                    flags,
                    effect_id: layer.effect_id,
                    alpha,
                }
            })
            .collect()
    }
}

fn validate_records(records: &[LayerRecord]) -> Result<(), LayerError> {
    if records.is_empty() {
        return Err(LayerError::MissingBaseLayer);
    }
    if records.len() > MAX_LAYERS {
        warn!("Terrain patch lists {} texture layers, keeping none", records.len());
        return Err(LayerError::TooManyLayers {
            count: records.len(),
            max: MAX_LAYERS,
        });
    }

    for (index, record) in records.iter().enumerate() {
        match (&record.alpha, index) {
            (Some(_), 0) => return Err(LayerError::UnexpectedAlpha { layer: 0 }),
            (None, 0) => {}
            (None, layer) => {
                warn!("Terrain layer {} has no alpha map", layer);
                return Err(LayerError::MissingAlpha { layer });
            }
            (Some(alpha), layer) if alpha.len() != ALPHA_TEXELS => {
                warn!("Terrain layer {} alpha map has {} bytes", layer, alpha.len());
                return Err(LayerError::alpha_size(layer, alpha.len()));
            }
            (Some(_), _) => {}
        }
    }

    Ok(())
}

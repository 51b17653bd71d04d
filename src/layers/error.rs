//! Errors reported by layer stack operations.

use thiserror::Error;

use super::alpha_grid::ALPHA_TEXELS;
use super::stack::MAX_LAYERS;

/// Errors that can occur when editing or loading a layer stack.
///
/// None of these leave the stack half-edited: every check runs before the
/// first write.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayerError {
    #[error("Layer stack is full ({MAX_LAYERS} layers)")]
    Full,

    #[error("No free texture slot: all {MAX_LAYERS} layers are visible")]
    NoFreeSlot,

    #[error("Layer index {index} out of range for a stack of {count} layers")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Layer data contains no base layer")]
    MissingBaseLayer,

    #[error("Layer count ({count}) exceeds maximum ({max})")]
    TooManyLayers { count: usize, max: usize },

    #[error("Base layer {layer} must not carry alpha data")]
    UnexpectedAlpha { layer: usize },

    #[error("Layer {layer} has no alpha data")]
    MissingAlpha { layer: usize },

    #[error("Layer {layer} alpha has {len} bytes, expected {expected}")]
    AlphaSizeMismatch {
        layer: usize,
        len: usize,
        expected: usize,
    },
}

impl LayerError {
    pub(crate) fn alpha_size(layer: usize, len: usize) -> Self {
        Self::AlphaSizeMismatch {
            layer,
            len,
            expected: ALPHA_TEXELS,
        }
    }
}

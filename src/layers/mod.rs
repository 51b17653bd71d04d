//! Layer stack storage and the alpha compositing shared by every edit.
//!
//! This module provides:
//! - [`AlphaGrid`]: 64×64 coverage values for one non-base layer
//! - [`LayerStack`]: up to four layers with slot management, swap, merge and pruning
//! - [`compositor`]: decode/encode between relative coverage and absolute visibility
//! - Record-based loading/exporting and RGBA packing for the renderer

mod alpha_grid;
pub mod compositor;
mod error;
mod flags;
mod io;
mod pack;
mod stack;

pub use alpha_grid::{ALPHA_SIZE, ALPHA_TEXELS, AlphaGrid};
pub use compositor::Visibility;
pub use error::LayerError;
pub use flags::{DEFAULT_ANIMATION_PERIOD, LayerFlags, TextureAnimation};
pub use io::{AlphaEncoding, LayerRecord};
pub use pack::{AlphaTexel, alpha_texture_bytes, pack_alpha_texture};
pub use stack::{Layer, LayerStack, MAX_LAYERS};

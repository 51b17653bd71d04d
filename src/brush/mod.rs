//! Brush shapes for texture painting.

mod kernel;
mod shape;

pub use kernel::DEFAULT_KERNEL_SIZE;
pub use shape::{Brush, BrushShape, CustomBrush};

//! Texture identities used by layer stacks.
//!
//! Texture contents are never interpreted here; a layer only needs a shared,
//! comparable handle whose lifetime is tracked by reference counting.

mod registry;

pub use registry::{TextureRef, TextureRegistry};

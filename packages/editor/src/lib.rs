//! # Pagebuilder Editor
//!
//! Bridge between the composition and the external visual-editor canvas.
//!
//! The canvas itself (rendering, drag handles, style panels) is out of
//! scope: it is modeled as the [`EditorSurface`] capability, and this crate
//! adapts it to the rest of the system: mount/dispose lifecycle, dirty
//! tracking, and verbatim content transfer.

mod bridge;
mod errors;

pub use bridge::{ContentSnapshot, EditorBridge, EditorSurface};
pub use errors::EditorError;

//! # Rendering Module
//!
//! Plain-text and HTML views of a finished floor.
//!
//! Renderers only read a [`FloorResult`]; generation never renders anything
//! itself, not even on failure.

pub mod html;
pub mod text;

pub use html::*;
pub use text::*;

use crate::floor::FloorResult;

/// Turns a finished floor into a printable document.
pub trait FloorRenderer {
    fn render(&self, floor: &FloorResult) -> String;
}

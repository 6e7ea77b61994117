//! Terminal UI module using ratatui.
//!
//! - `render`: frame layout, card list, modal and overlays
//! - `input`: keyboard events to `UiEvent`s
//! - `styles`: colors per theme

pub mod input;
pub mod render;
pub mod styles;

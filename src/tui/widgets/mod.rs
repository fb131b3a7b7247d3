//! Reusable TUI widgets.

pub mod popup;
pub mod status_bar;

pub use popup::draw_popup;
pub use status_bar::{StatusBarContext, draw_status_bar};

//! TUI: App state, event loop, widgets.

pub mod action;
pub mod app;
pub mod error;
pub mod widgets;

pub use app::App;
pub use error::AppError;

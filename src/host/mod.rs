//! The chart side: host context, event bus payloads and pointer routing.

mod chart;
mod context;
mod event;

pub use chart::{ChartGesture, ChartHost, PointerRoute};
pub use context::{HostContext, SeriesRef};
pub use event::HostEvent;

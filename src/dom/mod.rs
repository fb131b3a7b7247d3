//! Element tree the popup renders into and harvests from.
//!
//! A small arena-backed stand-in for a browser DOM: elements carry a tag, an
//! identifier, classes, string attributes and a value, and are addressed by
//! [`ElementId`] handles that are never reused.

mod document;
mod element;

pub use document::Document;
pub use element::{Element, ElementId, Tag, Trigger};

//! Popup form controller for stock-chart indicator and annotation dialogs.
//!
//! A chart ([`host::ChartHost`]) owns one [`popup::PopupController`] that
//! renders forms into an element tree ([`dom::Document`]), harvests them into
//! [`popup::FieldRecord`]s on submit, and keeps pointer events that start on
//! the popup away from the chart.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod dom;
pub mod host;
pub mod logging;
pub mod popup;
pub mod tui;

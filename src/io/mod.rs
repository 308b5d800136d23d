//! Instance documents, report text and file output.
//!
//! - [`dto`] — serde types for the instance JSON format
//! - [`parse_instance`] / [`load_instance_or_default`] — loading with fallback
//! - [`format_report`] / [`write_report`] — text summary by depot
//! - [`to_document`] / [`write_instance_json`] — results written back as JSON

pub mod dto;
mod export;
mod loader;
mod report;

pub use export::{to_document, write_instance_json};
pub use loader::{default_instance, load_instance_or_default, parse_instance, read_instance};
pub use report::{format_report, write_report};

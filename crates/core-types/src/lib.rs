//! # Core Types
//!
//! Layer 0 of the workspace: the shared vocabulary every other crate speaks.
//! Holds the yearly return series, the dataset that groups them, and the small
//! enums (theme, locale) the presentation side needs.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{Locale, Theme};
pub use error::CoreError;
pub use structs::{Dataset, ReturnSeries};

//! # Analytics
//!
//! The return engine and the triangle builder. This is a pure logic crate: it
//! has no knowledge of files, terminals or preferences and depends only on
//! `core-types` (Layer 0).
//!
//! ## Public API
//!
//! - `ReturnEngine`: compounds a yearly series over an inclusive year range.
//! - `TriangleBuilder`: runs the engine for every buy/sell pair of a range.
//! - `CalculationRequest`: validates raw user input against a `Dataset`.
//! - `AnalyticsError` / `ValidationError`: the error types of this crate.

pub mod engine;
pub mod error;
pub mod report;
pub mod request;
pub mod triangle;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{DEFAULT_INITIAL_INVESTMENT, ReturnEngine};
pub use error::{AnalyticsError, ValidationError};
pub use report::CalculationResult;
pub use request::{CalculationRequest, ValidatedRequest};
pub use triangle::{Triangle, TriangleBuilder, TriangleCell};

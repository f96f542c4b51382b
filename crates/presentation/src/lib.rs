//! # Presentation
//!
//! Turns calculation results into something a person can read: colour bands,
//! theme palettes, locale-aware numbers and terminal tables. Nothing in here
//! computes a return; it only formats what `analytics` hands over.

pub mod band;
pub mod format;
pub mod palette;
pub mod table;
pub mod view;

pub use band::ReturnBand;
pub use format::{NumberFormat, format_grouped, format_percent};
pub use palette::{Palette, Rgb};
pub use table::{render_instruments_table, render_summary_table, render_triangle_table};
pub use view::{CalculationReport, SummaryView, TriangleCellView, TriangleView};

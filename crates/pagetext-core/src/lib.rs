//! Core types and region aggregation for pagetext.
//!
//! This crate holds the data model shared by the whole pipeline and the one
//! piece of real logic in the system: grouping flat per-word OCR output into
//! bounding-boxed text regions.
//!
//! # Architecture
//!
//! ```text
//! PDF bytes ──▶ pagetext-render ──▶ page images
//!                                       │
//!                                       ▼
//!                              pagetext-ocr (words)
//!                                       │
//!                                       ▼
//!                        pagetext-core::aggregate_regions
//!                                       │
//!                                       ▼
//!                      PageText / ExtractionResult (JSON)
//! ```
//!
//! The engine crates produce [`Word`] values; [`aggregate_regions`] turns one
//! page's words into [`Region`]s; the pipeline folds regions into an
//! [`ExtractionResult`].

pub mod aggregate;
pub mod types;

pub use aggregate::aggregate_regions;
pub use types::{ExtractionResult, PageStatus, PageText, Region, Word};

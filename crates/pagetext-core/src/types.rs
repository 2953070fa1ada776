//! Data model for OCR extraction results.
//!
//! Geometry is carried in pixel units relative to the top-left corner of the
//! rasterized page image. Coordinates are signed on purpose: word geometry
//! coming from the OCR engine is passed through unvalidated, so an engine
//! that reports a negative width propagates incorrect geometry rather than
//! failing the extraction.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// One recognized word, as reported by the word detector.
///
/// Words are ephemeral: produced fresh per page, consumed once by
/// [`aggregate_regions`](crate::aggregate_regions), then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Recognized text. May be empty or whitespace-only; such words still
    /// contribute their geometry to the block's bounding box.
    pub text: String,
    /// Layout block the word belongs to. Block ids are neither sorted nor
    /// contiguous.
    pub block: u32,
    /// Left edge in pixels.
    pub left: i32,
    /// Top edge in pixels.
    pub top: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Word {
    /// Right edge of the word (`left + width`).
    #[inline]
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.left + self.width
    }

    /// Bottom edge of the word (`top + height`).
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.top + self.height
    }
}

/// One aggregated text region: the bounding box and joined text of a layout
/// block.
///
/// For any emitted region `x0 <= x1` and `y0 <= y1`, provided the source
/// words carried non-negative widths and heights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Space-joined, trimmed word texts in input order. Never empty: a block
    /// with only blank words produces no region at all.
    pub text: String,
    /// Minimum `left` over the block's words.
    pub x0: i32,
    /// Maximum `left + width` over the block's words.
    pub x1: i32,
    /// Minimum `top` over the block's words.
    pub y0: i32,
    /// Maximum `top + height` over the block's words.
    pub y1: i32,
}

/// Per-page extraction output: the page image dimensions and its regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// Page image width in pixels.
    pub width: u32,
    /// Page image height in pixels.
    pub height: u32,
    /// Regions in deterministic first-seen block order.
    pub text: Vec<Region>,
}

/// Outcome of extraction for a single page.
///
/// The serialized result omits pages without text, which conflates "no text
/// detected" with "page absent". This enum makes the distinction explicit for
/// in-process consumers without changing the serialized shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    /// At least one non-empty region was found on the page.
    HasText,
    /// The page rasterized fine but yielded no non-empty region.
    NoTextDetected,
}

/// Complete extraction output: a mapping from 0-based page index to
/// [`PageText`], for pages that yielded at least one non-empty region.
///
/// Serializes as a JSON object keyed by the string-encoded page index (JSON
/// object keys are always strings even though the logical key is an integer):
///
/// ```json
/// {
///     "0": { "width": 1700, "height": 2200, "text": [ ... ] }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    pages: BTreeMap<usize, PageText>,
    page_count: usize,
}

impl ExtractionResult {
    /// Create an empty result for a document with `page_count` pages.
    #[must_use]
    pub const fn new(page_count: usize) -> Self {
        Self {
            pages: BTreeMap::new(),
            page_count,
        }
    }

    /// Total number of pages in the source document, including pages that
    /// produced no text.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.page_count
    }

    /// Number of pages that produced at least one region.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True if no page produced any region.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Extraction output for one page, if it produced any text.
    #[must_use]
    pub fn get(&self, page: usize) -> Option<&PageText> {
        self.pages.get(&page)
    }

    /// Pages in ascending page-index order.
    #[must_use]
    pub const fn pages(&self) -> &BTreeMap<usize, PageText> {
        &self.pages
    }

    /// Status of a page, or `None` if the index is outside the document.
    #[must_use]
    pub fn page_status(&self, page: usize) -> Option<PageStatus> {
        if page >= self.page_count {
            return None;
        }
        Some(if self.pages.contains_key(&page) {
            PageStatus::HasText
        } else {
            PageStatus::NoTextDetected
        })
    }

    /// Append a region to a page, creating the page entry lazily on first
    /// use. `width` and `height` are the page image dimensions and are only
    /// recorded when the entry is created.
    pub fn append_region(&mut self, page: usize, width: u32, height: u32, region: Region) {
        self.pages
            .entry(page)
            .or_insert_with(|| PageText {
                width,
                height,
                text: Vec::new(),
            })
            .text
            .push(region);
    }
}

impl Serialize for ExtractionResult {
    /// Serializes only the page map; `page_count` is an in-process detail
    /// kept out of the wire format for compatibility with downstream
    /// consumers that expect omission of empty pages.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pages.len()))?;
        for (page, text) in &self.pages {
            map.serialize_entry(&page.to_string(), text)?;
        }
        map.end()
    }
}

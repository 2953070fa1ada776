//! Extraction pipeline: rasterize pages, detect words, aggregate regions.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     extract_pdf(bytes, dpi)                 │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!          ┌────────────────────┼─────────────────────┐
//!          ▼                    ▼                     ▼
//!    PageSource           WordDetector         aggregate_regions
//!  (pdfium raster)      (tesseract words)     (pagetext-core)
//! ```
//!
//! Pages are processed sequentially in document order. Each extraction call
//! owns its accumulating result exclusively; there is no shared state
//! between calls. Any collaborator failure aborts the whole extraction with
//! no partial result.
//!
//! The two collaborators sit behind the [`PageSource`] and [`WordDetector`]
//! traits so the orchestration can be exercised without a PDFium or
//! Tesseract install.

use image::RgbImage;
use log::debug;
use pagetext_core::{aggregate_regions, ExtractionResult, Word};
use pagetext_ocr::TesseractDetector;
use pagetext_render::{PageImage, PageRasterizer};
use thiserror::Error;

/// Errors that can occur while driving an extraction.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The rasterizer failed (malformed PDF, missing PDFium, render error).
    #[error("Rasterization error: {0}")]
    Render(#[from] pagetext_render::RenderError),

    /// The word detector failed (missing Tesseract, recognition error).
    #[error("OCR error: {0}")]
    Ocr(#[from] pagetext_ocr::OcrError),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for [`Result<T, PipelineError>`].
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Converts a PDF byte stream into ordered page images at a given DPI.
pub trait PageSource {
    /// Rasterize every page of `pdf`, in document order.
    ///
    /// # Errors
    ///
    /// Any failure is fatal for the whole document.
    fn rasterize(&self, pdf: &[u8], dpi: u32) -> Result<Vec<PageImage>>;
}

/// Produces the flat word list for one page image.
pub trait WordDetector {
    /// Detect words in `image`; `dpi` is forwarded to the engine as a hint.
    ///
    /// # Errors
    ///
    /// Any failure is fatal for the whole extraction.
    fn detect_words(&self, image: &RgbImage, dpi: u32) -> Result<Vec<Word>>;
}

impl PageSource for PageRasterizer {
    fn rasterize(&self, pdf: &[u8], dpi: u32) -> Result<Vec<PageImage>> {
        Ok(PageRasterizer::rasterize(self, pdf, dpi)?)
    }
}

impl WordDetector for TesseractDetector {
    fn detect_words(&self, image: &RgbImage, dpi: u32) -> Result<Vec<Word>> {
        Ok(TesseractDetector::detect_words(self, image, dpi)?)
    }
}

/// Extract positioned text regions from every page of a PDF.
///
/// For each page, in order: detect words, aggregate them into regions, and
/// append the regions to the result. A page entry is created lazily when its
/// first region is emitted, recording the page image dimensions; pages with
/// no non-empty region are absent from the result (their status is still
/// reported by [`ExtractionResult::page_status`]).
///
/// # Errors
///
/// Propagates rasterizer and detector failures unchanged; an error on any
/// page discards the entire extraction, including earlier pages.
pub fn extract_pdf<S, D>(
    source: &S,
    detector: &D,
    pdf: &[u8],
    dpi: u32,
) -> Result<ExtractionResult>
where
    S: PageSource,
    D: WordDetector,
{
    let pages = source.rasterize(pdf, dpi)?;
    let mut result = ExtractionResult::new(pages.len());

    for page in &pages {
        let words = detector.detect_words(&page.image, dpi)?;
        let regions = aggregate_regions(&words);
        if regions.is_empty() {
            debug!("page {}: no text detected", page.index);
            continue;
        }
        for region in regions {
            result.append_region(page.index, page.width, page.height, region);
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagetext_core::PageStatus;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Page source returning blank images with fixed dimensions.
    struct FakeSource {
        dims: Vec<(u32, u32)>,
    }

    impl PageSource for FakeSource {
        fn rasterize(&self, _pdf: &[u8], _dpi: u32) -> Result<Vec<PageImage>> {
            Ok(self
                .dims
                .iter()
                .enumerate()
                .map(|(index, &(width, height))| PageImage {
                    index,
                    width,
                    height,
                    image: RgbImage::new(width, height),
                })
                .collect())
        }
    }

    /// Detector replaying one canned word list per page, in call order.
    struct FakeDetector {
        per_page: RefCell<VecDeque<Vec<Word>>>,
    }

    impl FakeDetector {
        fn new(per_page: Vec<Vec<Word>>) -> Self {
            Self {
                per_page: RefCell::new(per_page.into()),
            }
        }
    }

    impl WordDetector for FakeDetector {
        fn detect_words(&self, _image: &RgbImage, _dpi: u32) -> Result<Vec<Word>> {
            Ok(self.per_page.borrow_mut().pop_front().unwrap_or_default())
        }
    }

    /// Detector that always fails.
    struct FailingDetector;

    impl WordDetector for FailingDetector {
        fn detect_words(&self, _image: &RgbImage, _dpi: u32) -> Result<Vec<Word>> {
            Err(PipelineError::Ocr(pagetext_ocr::OcrError::Recognition(
                "engine unavailable".to_string(),
            )))
        }
    }

    fn word(text: &str, block: u32, left: i32, top: i32, width: i32, height: i32) -> Word {
        Word {
            text: text.to_string(),
            block,
            left,
            top,
            width,
            height,
        }
    }

    #[test]
    fn test_extracts_regions_per_page() {
        let source = FakeSource {
            dims: vec![(1700, 2200)],
        };
        let detector = FakeDetector::new(vec![vec![
            word("Hello", 1, 10, 10, 40, 12),
            word("", 1, 60, 10, 5, 12),
            word("World", 2, 10, 30, 40, 12),
        ]]);

        let result = extract_pdf(&source, &detector, b"%PDF", 200).unwrap();
        assert_eq!(result.len(), 1);

        let page = result.get(0).unwrap();
        assert_eq!(page.width, 1700);
        assert_eq!(page.height, 2200);
        assert_eq!(page.text.len(), 2);
        assert_eq!(page.text[0].text, "Hello");
        assert_eq!((page.text[0].x0, page.text[0].x1), (10, 65));
        assert_eq!((page.text[0].y0, page.text[0].y1), (10, 22));
        assert_eq!(page.text[1].text, "World");
        assert_eq!((page.text[1].x0, page.text[1].x1), (10, 50));
        assert_eq!((page.text[1].y0, page.text[1].y1), (30, 42));
    }

    #[test]
    fn test_pages_without_text_are_omitted() {
        let source = FakeSource {
            dims: vec![(100, 100), (200, 200), (300, 300)],
        };
        // Page 0: blank words only; page 1: nothing; page 2: one word
        let detector = FakeDetector::new(vec![
            vec![word("", 1, 0, 0, 5, 5), word("  ", 1, 10, 0, 5, 5)],
            vec![],
            vec![word("tail", 4, 1, 2, 3, 4)],
        ]);

        let result = extract_pdf(&source, &detector, b"%PDF", 200).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result.get(0).is_none());
        assert!(result.get(1).is_none());
        assert_eq!(result.get(2).unwrap().width, 300);

        assert_eq!(result.page_status(0), Some(PageStatus::NoTextDetected));
        assert_eq!(result.page_status(1), Some(PageStatus::NoTextDetected));
        assert_eq!(result.page_status(2), Some(PageStatus::HasText));
        assert_eq!(result.page_count(), 3);
    }

    #[test]
    fn test_empty_document() {
        let source = FakeSource { dims: vec![] };
        let detector = FakeDetector::new(vec![]);

        let result = extract_pdf(&source, &detector, b"%PDF", 200).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.page_count(), 0);
        assert_eq!(result.page_status(0), None);
    }

    #[test]
    fn test_detector_failure_aborts_whole_extraction() {
        let source = FakeSource {
            dims: vec![(100, 100), (100, 100)],
        };

        let err = extract_pdf(&source, &FailingDetector, b"%PDF", 200).unwrap_err();
        match err {
            PipelineError::Ocr(e) => {
                assert!(e.to_string().contains("engine unavailable"));
            }
            other => panic!("Expected Ocr error, got {other:?}"),
        }
    }

    #[test]
    fn test_region_order_follows_block_first_seen_order() {
        let source = FakeSource {
            dims: vec![(100, 100)],
        };
        let detector = FakeDetector::new(vec![vec![
            word("late", 9, 0, 50, 10, 10),
            word("early", 2, 0, 0, 10, 10),
            word("block", 9, 20, 50, 10, 10),
        ]]);

        let result = extract_pdf(&source, &detector, b"%PDF", 200).unwrap();
        let texts: Vec<&str> = result.get(0).unwrap().text.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["late block", "early"]);
    }
}

//! Word-level OCR detection using Tesseract.
//!
//! Given one RGB page image and a DPI hint, produces the flat word list
//! consumed by region aggregation: word text, containing layout block, and a
//! pixel bounding box per word. Detection and recognition are delegated
//! entirely to Tesseract; this crate's own logic is limited to configuring
//! the engine and parsing its word-level TSV output.
//!
//! Requires Tesseract and its language data to be installed (e.g.
//! `apt install tesseract-ocr` or `brew install tesseract`).

mod tsv;

pub use tsv::parse_words;

use image::RgbImage;
use leptess::{LepTess, Variable};
use log::debug;
use pagetext_core::Word;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for the Tesseract word detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Tesseract language codes (e.g. "eng", "eng+fra").
    pub language: String,
    /// Page segmentation mode (see Tesseract PSM values).
    pub page_segmentation_mode: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            page_segmentation_mode: 3, // PSM_AUTO
        }
    }
}

/// Errors that can occur during word detection.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Tesseract failed to initialize or a variable could not be set.
    #[error("Failed to initialize Tesseract: {0}")]
    Init(String),

    /// Recognition over a page image failed.
    #[error("Failed to run OCR: {0}")]
    Recognition(String),

    /// The page image has a zero dimension.
    #[error("Invalid image dimensions: {0}x{1}")]
    InvalidDimensions(u32, u32),
}

/// Type alias for [`Result<T, OcrError>`].
pub type Result<T> = std::result::Result<T, OcrError>;

/// Word detector backed by Tesseract.
pub struct TesseractDetector {
    config: OcrConfig,
}

impl TesseractDetector {
    /// Create a detector, verifying Tesseract initializes with the
    /// configured language.
    ///
    /// # Errors
    ///
    /// Returns [`OcrError::Init`] if Tesseract or the language data is not
    /// available.
    pub fn new(config: OcrConfig) -> Result<Self> {
        let _probe = LepTess::new(None, &config.language).map_err(|e| {
            OcrError::Init(format!(
                "language '{}': {e}. Make sure Tesseract language data is installed",
                config.language
            ))
        })?;
        Ok(Self { config })
    }

    /// Detect words in an RGB page image.
    ///
    /// The DPI hint is forwarded to Tesseract and should match the
    /// resolution the page was rasterized at. The returned list is flat and
    /// unordered; blank words (empty or whitespace-only text) are kept, as
    /// their geometry still contributes to block bounding boxes downstream.
    ///
    /// # Errors
    ///
    /// Returns [`OcrError::InvalidDimensions`] for zero-sized images and
    /// [`OcrError::Recognition`] if the engine fails. All errors are fatal;
    /// there is no per-page recovery.
    pub fn detect_words(&self, image: &RgbImage, dpi: u32) -> Result<Vec<Word>> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(OcrError::InvalidDimensions(width, height));
        }

        let mut lt = LepTess::new(None, &self.config.language)
            .map_err(|e| OcrError::Init(e.to_string()))?;
        lt.set_variable(
            Variable::TesseditPagesegMode,
            &self.config.page_segmentation_mode.to_string(),
        )
        .map_err(|e| OcrError::Init(format!("Failed to set page segmentation mode: {e}")))?;
        lt.set_variable(Variable::UserDefinedDpi, &dpi.to_string())
            .map_err(|e| OcrError::Init(format!("Failed to set DPI hint: {e}")))?;

        // leptess expects encoded image data; encode to PNG in memory
        let mut png = std::io::Cursor::new(Vec::new());
        image
            .write_to(&mut png, image::ImageFormat::Png)
            .map_err(|e| OcrError::Recognition(format!("Failed to encode image to PNG: {e}")))?;
        lt.set_image_from_mem(png.get_ref())
            .map_err(|e| OcrError::Recognition(format!("Failed to set image from memory: {e}")))?;

        let data = lt
            .get_tsv_text(0)
            .map_err(|e| OcrError::Recognition(format!("Failed to fetch TSV output: {e}")))?;

        let words = tsv::parse_words(&data);
        debug!("detected {} words on {width}x{height} image", words.len());
        Ok(words)
    }
}

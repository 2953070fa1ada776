//! PDF page rasterization via PDFium.
//!
//! Converts a PDF byte stream into an ordered sequence of RGB page images at
//! a caller-supplied DPI. Page dimensions in the PDF are specified in points
//! (1 inch = 72 points); the target pixel size of each page is
//! `points * dpi / 72`.
//!
//! Requires the PDFium dynamic library at runtime: either next to the
//! executable or installed on the system library path.

// DPI and dimension math converts between f32 points and integer pixels;
// page counts fit comfortably in all involved types.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

use image::RgbImage;
use log::debug;
use pdfium_render::prelude::*;
use thiserror::Error;

/// PDF points per inch - standard PostScript/PDF unit conversion factor.
pub const PDF_POINTS_PER_INCH: f32 = 72.0;

/// Errors raised while binding PDFium or rasterizing a document.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The PDFium library could not be located or bound.
    #[error("Failed to bind PDFium library: {0}")]
    Bind(String),

    /// The document could not be loaded (malformed, encrypted, truncated).
    #[error("Failed to load PDF document: {0}")]
    Load(String),

    /// A single page failed to render.
    #[error("Failed to render page {page}: {message}")]
    Render {
        /// 0-based index of the failing page.
        page: usize,
        /// Backend error description.
        message: String,
    },
}

/// Type alias for [`Result<T, RenderError>`].
pub type Result<T> = std::result::Result<T, RenderError>;

/// One rasterized page.
#[derive(Debug, Clone)]
pub struct PageImage {
    /// 0-based page index in document order.
    pub index: usize,
    /// Rendered width in pixels.
    pub width: u32,
    /// Rendered height in pixels.
    pub height: u32,
    /// RGB raster of the page.
    pub image: RgbImage,
}

/// Target pixel length for a page dimension given in PDF points.
#[inline]
#[must_use]
pub fn points_to_pixels(points: f32, dpi: u32) -> i32 {
    (points * dpi as f32 / PDF_POINTS_PER_INCH) as i32
}

/// Rasterizes PDF documents page by page through PDFium.
pub struct PageRasterizer {
    pdfium: Pdfium,
}

impl PageRasterizer {
    /// Bind the PDFium library.
    ///
    /// Looks for the platform library next to the current executable first,
    /// then falls back to the system library path.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Bind`] if no PDFium library can be found.
    pub fn new() -> Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| RenderError::Bind(e.to_string()))?;
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    /// Render every page of `pdf` to an RGB image at the given DPI, in
    /// document order.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Load`] for unreadable documents and
    /// [`RenderError::Render`] if any page fails to render. Errors are fatal
    /// for the whole document; no partial page list is returned.
    pub fn rasterize(&self, pdf: &[u8], dpi: u32) -> Result<Vec<PageImage>> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(pdf, None)
            .map_err(|e| RenderError::Load(e.to_string()))?;

        let mut pages = Vec::with_capacity(document.pages().len() as usize);
        for (index, page) in document.pages().iter().enumerate() {
            let config = PdfRenderConfig::new()
                .set_target_width(points_to_pixels(page.width().value, dpi))
                .set_target_height(points_to_pixels(page.height().value, dpi));

            let bitmap = page.render_with_config(&config).map_err(|e| {
                RenderError::Render {
                    page: index,
                    message: e.to_string(),
                }
            })?;
            let image = bitmap.as_image().to_rgb8();
            debug!(
                "rendered page {index}: {}x{} px at {dpi} dpi",
                image.width(),
                image.height()
            );
            pages.push(PageImage {
                index,
                width: image.width(),
                height: image.height(),
                image,
            });
        }
        Ok(pages)
    }
}

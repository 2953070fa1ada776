//! pagetext - extract positioned text regions from a PDF via OCR.
//!
//! Rasterizes each page with PDFium, runs Tesseract word detection over the
//! raster, aggregates words into per-block text regions, and prints the
//! result as indented JSON keyed by page index.

use anyhow::{Context, Result};
use clap::Parser;
use pagetext_ocr::{OcrConfig, TesseractDetector};
use pagetext_pipeline::extract_pdf;
use pagetext_render::PageRasterizer;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Default rasterization resolution.
const DEFAULT_DPI: u32 = 200;

#[derive(Parser, Debug)]
#[command(
    name = "pagetext",
    version,
    about = "Extract positioned text regions from a PDF via OCR"
)]
struct Cli {
    /// Path to the PDF file to extract
    pdf: PathBuf,

    /// Rasterization resolution in dots per inch
    #[arg(long, default_value_t = DEFAULT_DPI, value_parser = clap::value_parser!(u32).range(1..))]
    dpi: u32,

    /// Tesseract language codes (e.g. "eng", "eng+fra")
    #[arg(long, default_value = "eng")]
    lang: String,

    /// Write JSON to this path instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Serialize with 4-space indentation, the format downstream consumers
/// expect.
fn to_indented_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .context("Failed to serialize extraction result")?;
    String::from_utf8(buf).context("Serialized JSON was not valid UTF-8")
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let pdf = fs::read(&cli.pdf)
        .with_context(|| format!("Failed to read {}", cli.pdf.display()))?;

    let rasterizer = PageRasterizer::new().context("Failed to initialize PDF rasterizer")?;
    let detector = TesseractDetector::new(OcrConfig {
        language: cli.lang,
        ..OcrConfig::default()
    })
    .context("Failed to initialize OCR engine")?;

    let result = extract_pdf(&rasterizer, &detector, &pdf, cli.dpi)?;
    let json = to_indented_json(&result)?;

    match cli.output {
        Some(path) => fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }

    Ok(())
}

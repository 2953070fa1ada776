//! Parser for Tesseract's word-level TSV output.
//!
//! Each TSV row has twelve tab-separated columns:
//!
//! ```text
//! level page_num block_num par_num line_num word_num left top width height conf text
//! ```
//!
//! Rows describe the layout hierarchy (page = 1, block = 2, paragraph = 3,
//! line = 4, word = 5); only word rows carry recognized text. Geometry is
//! taken verbatim from the engine, without validation.

use pagetext_core::Word;

/// Hierarchy level of word rows in the TSV output.
const WORD_LEVEL: u32 = 5;

/// Column count of a well-formed row.
const COLUMNS: usize = 12;

/// Parse all word-level rows out of a TSV dump.
///
/// Non-word rows, short rows, and rows with non-numeric fields (including a
/// header row, if the producer emitted one) are skipped.
#[must_use]
pub fn parse_words(tsv: &str) -> Vec<Word> {
    tsv.lines().filter_map(parse_row).collect()
}

fn parse_row(line: &str) -> Option<Word> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < COLUMNS {
        return None;
    }

    let level: u32 = fields[0].parse().ok()?;
    if level != WORD_LEVEL {
        return None;
    }
    let block: u32 = fields[2].parse().ok()?;
    let left: i32 = fields[6].parse().ok()?;
    let top: i32 = fields[7].parse().ok()?;
    let width: i32 = fields[8].parse().ok()?;
    let height: i32 = fields[9].parse().ok()?;
    // Keep any tabs inside the recognized text itself
    let text = fields[11..].join("\t");

    Some(Word {
        text,
        block,
        left,
        top,
        width,
        height,
    })
}

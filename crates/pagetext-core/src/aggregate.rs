//! Region aggregation: group one page's words into bounding-boxed regions.
//!
//! The word detector emits a flat, unordered word list where each word is
//! tagged with the layout block it belongs to. This module groups words by
//! block, computes one bounding box per block, and joins the block's word
//! texts into a single string.
//!
//! Block order in the output is the order blocks are first seen in the input,
//! which makes region order deterministic and reproducible for a given word
//! list.

use crate::types::{Region, Word};
use indexmap::IndexMap;
use log::debug;

/// Aggregate one page's words into non-empty text regions.
///
/// For each distinct block, in first-seen order:
///
/// - the region text is the space-joined concatenation of the block's
///   trimmed, non-empty word texts, in input order (not reading order);
/// - the bounding box spans every word of the block, blank words included;
/// - blocks whose words are all blank after trimming are dropped silently.
///
/// Pure and idempotent: the same word list always yields the same regions.
/// Word geometry is not validated; a malformed word (e.g. negative width)
/// propagates incorrect geometry rather than failing.
#[must_use]
pub fn aggregate_regions(words: &[Word]) -> Vec<Region> {
    let mut blocks: IndexMap<u32, Vec<&Word>> = IndexMap::new();
    for word in words {
        blocks.entry(word.block).or_default().push(word);
    }

    let mut regions = Vec::with_capacity(blocks.len());
    for (block, members) in &blocks {
        let texts: Vec<&str> = members
            .iter()
            .map(|w| w.text.trim())
            .filter(|t| !t.is_empty())
            .collect();
        if texts.is_empty() {
            debug!("block {block}: only blank words, no region emitted");
            continue;
        }

        // Geometry spans every word of the block, blank ones included.
        let mut x0 = i32::MAX;
        let mut y0 = i32::MAX;
        let mut x1 = i32::MIN;
        let mut y1 = i32::MIN;
        for w in members {
            x0 = x0.min(w.left);
            y0 = y0.min(w.top);
            x1 = x1.max(w.right());
            y1 = y1.max(w.bottom());
        }

        regions.push(Region {
            text: texts.join(" "),
            x0,
            x1,
            y0,
            y1,
        });
    }
    regions
}

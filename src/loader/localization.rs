//! Localization table loader
//!
//! Builds the text-id -> display-string index for one locale.

use crate::{ExtractError, Result};
use log::warn;
use rustc_hash::FxHashMap;
use serde::Deserialize;

/// One per-locale bundle as shipped in `Data_loc_*.mtga`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLocalization {
    pub iso_code: String,
    #[serde(default)]
    pub keys: Vec<RawLocEntry>,
}

/// A single text entry. The string may arrive in either `raw` (literal)
/// or `text` (processed); `raw` wins when both are present.
#[derive(Debug, Deserialize)]
pub struct RawLocEntry {
    pub id: u64,
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Text-id -> display string for a single locale.
pub struct LocalizationIndex {
    entries: FxHashMap<u64, String>,
}

impl LocalizationIndex {
    /// Build the index from the raw bundles, keeping only the target locale.
    ///
    /// Entries carrying neither `raw` nor `text` are skipped with a warning;
    /// a card referencing a skipped id then fails card-scoped at lookup.
    pub fn build(bundles: Vec<RawLocalization>, lang: &str) -> Self {
        let mut entries = FxHashMap::default();
        for bundle in bundles {
            if bundle.iso_code != lang {
                continue;
            }
            for entry in bundle.keys {
                match entry.raw.or(entry.text) {
                    Some(text) => {
                        entries.insert(entry.id, text);
                    }
                    None => warn!("bad loc entry {}: neither raw nor text", entry.id),
                }
            }
        }
        LocalizationIndex { entries }
    }

    /// Resolve a text reference. A missing id is a per-card failure at the
    /// call site, never a whole-run abort.
    pub fn text(&self, id: u64) -> Result<&str> {
        self.entries
            .get(&id)
            .map(String::as_str)
            .ok_or(ExtractError::MissingText { id })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

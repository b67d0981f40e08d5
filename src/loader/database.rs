//! Card database with a JSON file cache
//!
//! Locates the Arena data files, builds the normalized record set and
//! persists it so later runs skip re-normalization. The cache is fully
//! trusted: if the file exists it is loaded verbatim, with no staleness
//! check against the game data.

use crate::core::CardRecord;
use crate::loader::alt_printings::{merge_alt_printings, RawAltPrintings};
use crate::loader::cards::{normalize_cards, RawCard};
use crate::loader::localization::{LocalizationIndex, RawLocalization};
use crate::{ExtractError, Result};
use log::{debug, info};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Data-file layout under an Arena install directory.
#[derive(Debug, Clone)]
pub struct InstallPaths {
    /// Holds the `Data_*.mtga` JSON tables.
    pub data_dir: PathBuf,
    /// Holds the `NNNNNN_CardArt_*.mtga` asset bundles.
    pub asset_dir: PathBuf,
}

impl InstallPaths {
    pub fn new(mtga_root: &Path) -> Self {
        let downloads = mtga_root.join("MTGA_Data").join("Downloads");
        InstallPaths {
            data_dir: downloads.join("Data"),
            asset_dir: downloads.join("AssetBundle"),
        }
    }
}

/// Find a shipped data file by stem, e.g. `Data_cards_<hash>.mtga`.
/// First glob match wins.
fn find_data_file(dir: &Path, stem: &str) -> Result<PathBuf> {
    let pattern = dir
        .join(format!("Data_{stem}_*.mtga"))
        .to_string_lossy()
        .into_owned();
    let paths = glob::glob(&pattern)
        .map_err(|e| ExtractError::DataFileNotFound(format!("{pattern}: {e}")))?;
    paths
        .filter_map(|entry| entry.ok())
        .next()
        .ok_or(ExtractError::DataFileNotFound(pattern))
}

/// The full mapping from grpid to normalized card record.
#[derive(Debug, Default)]
pub struct CardDatabase {
    cards: BTreeMap<u64, CardRecord>,
}

impl CardDatabase {
    /// Load the cache if present, otherwise rebuild from the game data and
    /// persist. `refresh` deletes any existing cache before the existence
    /// check, forcing the rebuild.
    pub fn load_or_build(
        paths: &InstallPaths,
        cache_path: &Path,
        lang: &str,
        refresh: bool,
    ) -> Result<CardDatabase> {
        if refresh && cache_path.exists() {
            info!("refreshing card database, removing {}", cache_path.display());
            fs::remove_file(cache_path)?;
        }
        if cache_path.exists() {
            debug!("loading cached card database from {}", cache_path.display());
            return Self::load(cache_path);
        }

        let db = Self::build(paths, lang)?;
        db.save(cache_path)?;
        Ok(db)
    }

    /// Rebuild the database from the shipped card, localization and
    /// alternate-printing tables. A missing card or localization table is
    /// the fatal startup error; the alternate-printings table is optional.
    pub fn build(paths: &InstallPaths, lang: &str) -> Result<CardDatabase> {
        let cards_path = find_data_file(&paths.data_dir, "cards")?;
        let loc_path = find_data_file(&paths.data_dir, "loc")?;
        debug!("card table: {}", cards_path.display());
        debug!("loc table: {}", loc_path.display());

        let raw_cards: Vec<RawCard> = serde_json::from_str(&fs::read_to_string(&cards_path)?)?;
        let raw_loc: Vec<RawLocalization> = serde_json::from_str(&fs::read_to_string(&loc_path)?)?;

        let loc = LocalizationIndex::build(raw_loc, lang);
        let (mut cards, report) = normalize_cards(raw_cards, &loc);
        info!(
            "normalized {} cards ({} skipped, {} duplicates)",
            report.cards, report.skipped, report.duplicates
        );

        match find_data_file(&paths.data_dir, "altPrintings") {
            Ok(path) => {
                let alts: RawAltPrintings = serde_json::from_str(&fs::read_to_string(&path)?)?;
                let tagged = merge_alt_printings(&alts, &mut cards);
                debug!("tagged {tagged} alternate printings");
            }
            Err(_) => debug!("no alternate-printings table found"),
        }

        Ok(CardDatabase { cards })
    }

    pub fn load(path: &Path) -> Result<CardDatabase> {
        let cards = serde_json::from_str(&fs::read_to_string(path)?)?;
        Ok(CardDatabase { cards })
    }

    /// Persist as pretty-printed UTF-8 JSON. serde_json keeps non-ASCII
    /// text literal, so the cache stays human-diffable.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut text = serde_json::to_string_pretty(&self.cards)?;
        text.push('\n');
        fs::write(path, text)?;
        Ok(())
    }

    pub fn get(&self, grpid: u64) -> Option<&CardRecord> {
        self.cards.get(&grpid)
    }

    /// Records in ascending grpid order.
    pub fn records(&self) -> impl Iterator<Item = &CardRecord> {
        self.cards.values()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

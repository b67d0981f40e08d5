//! Art location and PNG export
//!
//! Finds the asset bundle for a card's art id, decodes the texture
//! sub-assets inside and writes them out as PNG files. Bundle decoding is
//! behind the `ArtSource` trait; everything here treats it as a byte
//! container that yields named raster images.

pub mod unity;

use crate::core::CardRecord;
use crate::{ExtractError, Result};
use image::imageops::FilterType;
use image::DynamicImage;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub use unity::UnityArtSource;

/// A named raster sub-asset decoded from a bundle.
pub struct ArtAsset {
    pub name: String,
    pub image: DynamicImage,
}

/// The asset-bundle collaborator.
pub trait ArtSource {
    fn load(&self, path: &Path) -> Result<Vec<ArtAsset>>;
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    pub resize: bool,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, PartialEq)]
pub enum ExportOutcome {
    /// No `NNNNNN_CardArt_*.mtga` bundle on disk for the card's art id.
    NoArtFile,
    /// The bundle opened but no sub-asset matched the art id.
    NoArtMatch,
    Exported { written: usize, skipped: usize },
}

/// Batch counters for one export run.
#[derive(Debug, Default, PartialEq)]
pub struct ExportReport {
    pub written: usize,
    /// Output files that already existed and were left untouched.
    pub skipped: usize,
    pub missing_art: usize,
    pub failed: usize,
}

/// Find the art bundle whose name starts with the zero-padded art id.
/// First glob match wins.
fn find_art_bundle(asset_dir: &Path, art_id: u64) -> Result<Option<PathBuf>> {
    let pattern = asset_dir
        .join(format!("{art_id:06}_CardArt_*.mtga"))
        .to_string_lossy()
        .into_owned();
    let paths =
        glob::glob(&pattern).map_err(|e| ExtractError::Bundle(format!("{pattern}: {e}")))?;
    Ok(paths.filter_map(|entry| entry.ok()).next())
}

/// A matching sub-asset is named `<artId:06>_AIF` with a `.tga` or `.png`
/// extension. Bundles that expose bare object names instead of container
/// paths drop the extension, so a bare matching stem is accepted too.
fn matches_art_asset(name: &str, art_id: u64) -> bool {
    let file_name = name.rsplit('/').next().unwrap_or(name);
    let want = format!("{art_id:06}_AIF");
    match file_name.rsplit_once('.') {
        Some((stem, ext)) => {
            stem == want && matches!(ext.to_ascii_lowercase().as_str(), "tga" | "png")
        }
        None => file_name == want,
    }
}

/// Export every matching sub-asset for one card. Never overwrites: an
/// existing output file is counted as skipped, so repeated runs are
/// idempotent.
pub fn export_card<S: ArtSource>(
    card: &CardRecord,
    asset_dir: &Path,
    source: &S,
    opts: &ExportOptions,
) -> Result<ExportOutcome> {
    let Some(bundle) = find_art_bundle(asset_dir, card.art_id)? else {
        return Ok(ExportOutcome::NoArtFile);
    };

    let assets = source.load(&bundle)?;
    let matching: Vec<&ArtAsset> = assets
        .iter()
        .filter(|asset| matches_art_asset(&asset.name, card.art_id))
        .collect();
    if matching.is_empty() {
        return Ok(ExportOutcome::NoArtMatch);
    }

    fs::create_dir_all(&opts.out_dir)?;
    let file_name = format!("{}.png", card.label()).replace('/', "_");
    let out_path = opts.out_dir.join(file_name);

    let mut written = 0;
    let mut skipped = 0;
    for asset in matching {
        if out_path.exists() {
            info!("{} already exists, skipping", out_path.display());
            skipped += 1;
            continue;
        }
        if opts.resize {
            asset
                .image
                .resize_exact(opts.width, opts.height, FilterType::Lanczos3)
                .save(&out_path)?;
        } else {
            asset.image.save(&out_path)?;
        }
        written += 1;
    }
    Ok(ExportOutcome::Exported { written, skipped })
}

/// Run the exporter over a selection, catching each card's failure so one
/// bad bundle never aborts the batch.
pub fn export_cards<'a, S, I>(
    cards: I,
    asset_dir: &Path,
    source: &S,
    opts: &ExportOptions,
) -> ExportReport
where
    S: ArtSource,
    I: IntoIterator<Item = &'a CardRecord>,
{
    let mut report = ExportReport::default();
    for card in cards {
        let label = card.label();
        match export_card(card, asset_dir, source, opts) {
            Ok(ExportOutcome::Exported { written, skipped }) => {
                if written > 0 {
                    info!("exported {label}");
                }
                report.written += written;
                report.skipped += skipped;
            }
            Ok(ExportOutcome::NoArtFile) => {
                warn!("no art file for {label}");
                report.missing_art += 1;
            }
            Ok(ExportOutcome::NoArtMatch) => {
                warn!("no art found for {label}");
                report.missing_art += 1;
            }
            Err(e) => {
                warn!("failed to export {label}: {e}");
                report.failed += 1;
            }
        }
    }
    report
}

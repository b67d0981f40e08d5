//! Loaders for the Arena data files
//!
//! Parsers for the card table, the localization table and the
//! alternate-printings table, plus the cached database wrapper.

pub mod alt_printings;
pub mod cards;
pub mod database;
pub mod localization;

pub use cards::NormalizeReport;
pub use database::{CardDatabase, InstallPaths};
pub use localization::LocalizationIndex;

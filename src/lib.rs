//! arena-extract - card art extraction from a local MTG Arena install
//!
//! Reads the game-shipped card, localization and alternate-printing tables,
//! normalizes them into one flat record per card, caches the result as JSON,
//! and exports PNG art for the cards matching a name pattern / set code.

pub mod core;
pub mod error;
pub mod export;
pub mod loader;
pub mod select;

pub use error::{ExtractError, Result};

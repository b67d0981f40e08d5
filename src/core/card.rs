//! The normalized card record
//!
//! One record per grpid: the raw card table row merged with the
//! localization table, plus the alternate-printing overlay.

use serde::{Deserialize, Serialize};

/// One ability line with its localized text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub id: u64,
    pub text: String,
}

/// A card after normalization.
///
/// Optional attributes are serialized only when the source data supplied
/// them, so "not applicable" stays distinguishable from zero/empty in the
/// cache file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub grpid: u64,
    /// 0 for a primary printing, otherwise the 1-based position among the
    /// base card's variants.
    #[serde(default)]
    pub order: u32,
    /// Variant category label, set by the alternate-printing merge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_kind: Option<String>,
    pub name: String,
    pub art_id: u64,
    pub set: String,
    pub flavor: String,
    pub types: Vec<u32>,
    pub subtypes: Vec<u32>,
    pub card_type_text: String,
    pub subtype_text: Option<String>,
    pub frame_colors: Vec<u32>,
    pub color_identity: Vec<u32>,
    pub is_secondary: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toughness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmc: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<u32>>,
    /// Casting cost with the `o` filler characters stripped.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "castingcost")]
    pub casting_cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collector_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collector_max: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_credit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abilities: Option<Vec<Ability>>,
}

impl CardRecord {
    /// Human-readable identifying label: name, set and grpid.
    pub fn label(&self) -> String {
        format!("{} [{}] - {}", self.name, self.set, self.grpid)
    }
}

//! Card table loader and normalizer
//!
//! Merges the raw card table with the localization index into one flat
//! `CardRecord` per grpid. Failures while normalizing a card are scoped to
//! that card: the record is skipped with a warning and the run continues.

use crate::core::{Ability, CardRecord};
use crate::loader::LocalizationIndex;
use crate::Result;
use log::warn;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAbility {
    pub ability_id: u64,
    pub text_id: u64,
}

/// One row of `Data_cards_*.mtga`. Unknown keys are ignored; a missing
/// title or type-text reference defaults to 0, which never resolves and so
/// fails that card at lookup instead of failing the whole file parse.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCard {
    pub grpid: u64,
    #[serde(default)]
    pub title_id: u64,
    #[serde(default)]
    pub art_id: u64,
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub flavor_id: Option<u64>,
    #[serde(default)]
    pub card_type_text_id: u64,
    #[serde(default)]
    pub subtype_text_id: Option<u64>,
    #[serde(default)]
    pub types: Vec<u32>,
    #[serde(default)]
    pub subtypes: Vec<u32>,
    #[serde(default)]
    pub frame_colors: Vec<u32>,
    #[serde(default)]
    pub color_identity: Vec<u32>,
    #[serde(default)]
    pub is_secondary_card: bool,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default)]
    pub cmc: Option<u32>,
    #[serde(default)]
    pub colors: Option<Vec<u32>>,
    #[serde(default, rename = "castingcost")]
    pub casting_cost: Option<String>,
    #[serde(default)]
    pub rarity: Option<u32>,
    #[serde(default)]
    pub collector_number: Option<String>,
    #[serde(default)]
    pub collector_max: Option<String>,
    #[serde(default)]
    pub styles: Option<Vec<String>>,
    #[serde(default)]
    pub artist_credit: Option<String>,
    #[serde(default)]
    pub abilities: Option<Vec<RawAbility>>,
}

/// Batch counters for one normalization pass.
#[derive(Debug, Default, PartialEq)]
pub struct NormalizeReport {
    /// Distinct records in the resulting database.
    pub cards: usize,
    /// Raw records dropped because a text reference did not resolve.
    pub skipped: usize,
    /// Raw records that replaced an earlier record with the same grpid.
    pub duplicates: usize,
}

/// Casting costs pad every symbol with a filler `o` (`o3oGoG`); strip it.
fn strip_cost_filler(cost: &str) -> String {
    cost.chars().filter(|&c| c != 'o').collect()
}

fn normalize_card(raw: &RawCard, loc: &LocalizationIndex) -> Result<CardRecord> {
    let name = loc.text(raw.title_id)?.to_string();
    let flavor = match raw.flavor_id {
        Some(id) => loc.text(id)?.to_string(),
        None => String::new(),
    };
    let card_type_text = loc.text(raw.card_type_text_id)?.to_string();
    // 0 is the table's null sentinel for "no subtype line".
    let subtype_text = match raw.subtype_text_id.filter(|&id| id != 0) {
        Some(id) => Some(loc.text(id)?.to_string()),
        None => None,
    };
    // An unresolvable ability text fails the whole card, same as the title.
    let abilities = match &raw.abilities {
        Some(list) => {
            let mut out = Vec::with_capacity(list.len());
            for ability in list {
                out.push(Ability {
                    id: ability.ability_id,
                    text: loc.text(ability.text_id)?.to_string(),
                });
            }
            Some(out)
        }
        None => None,
    };

    Ok(CardRecord {
        grpid: raw.grpid,
        order: 0,
        alt_kind: None,
        name,
        art_id: raw.art_id,
        set: raw.set.clone(),
        flavor,
        types: raw.types.clone(),
        subtypes: raw.subtypes.clone(),
        card_type_text,
        subtype_text,
        frame_colors: raw.frame_colors.clone(),
        color_identity: raw.color_identity.clone(),
        is_secondary: raw.is_secondary_card,
        power: raw.power.clone(),
        toughness: raw.toughness.clone(),
        cmc: raw.cmc,
        colors: raw.colors.clone(),
        casting_cost: raw.casting_cost.as_deref().map(strip_cost_filler),
        rarity: raw.rarity,
        collector_number: raw.collector_number.clone(),
        collector_max: raw.collector_max.clone(),
        flavor_id: raw.flavor_id,
        styles: raw.styles.clone(),
        artist_credit: raw.artist_credit.clone(),
        abilities,
    })
}

/// Normalize the whole card table. Duplicate grpids warn and keep the later
/// record; per-card failures warn and skip.
pub fn normalize_cards(
    raws: Vec<RawCard>,
    loc: &LocalizationIndex,
) -> (BTreeMap<u64, CardRecord>, NormalizeReport) {
    let mut cards: BTreeMap<u64, CardRecord> = BTreeMap::new();
    let mut report = NormalizeReport::default();

    for raw in &raws {
        match normalize_card(raw, loc) {
            Ok(record) => {
                let name = record.name.clone();
                if let Some(previous) = cards.insert(record.grpid, record) {
                    warn!(
                        "duplicate grpid {}: {} replaces {}",
                        raw.grpid, name, previous.name
                    );
                    report.duplicates += 1;
                }
            }
            Err(e) => {
                warn!("skipping card grpid {}: {}", raw.grpid, e);
                report.skipped += 1;
            }
        }
    }

    report.cards = cards.len();
    (cards, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::localization::RawLocalization;
    use serde_json::json;

    fn index() -> LocalizationIndex {
        let bundles: Vec<RawLocalization> = serde_json::from_value(json!([
            {"isoCode": "en-US", "keys": [
                {"id": 10, "text": "Shock"},
                {"id": 11, "text": "A jolt."},
                {"id": 12, "text": "Instant"},
                {"id": 13, "text": "Elf Druid"},
                {"id": 14, "text": "Llanowar Elves"},
                {"id": 15, "text": "Creature"},
                {"id": 16, "text": "{T}: Add {G}."}
            ]}
        ]))
        .unwrap();
        LocalizationIndex::build(bundles, "en-US")
    }

    fn shock_raw() -> serde_json::Value {
        json!({
            "grpid": 12345,
            "titleId": 10,
            "artId": 3,
            "set": "M19",
            "flavorId": 11,
            "cardTypeTextId": 12,
            "types": [2],
            "frameColors": [4],
            "colorIdentity": [4],
            "castingcost": "oR",
            "cmc": 1
        })
    }

    #[test]
    fn normalizes_a_resolvable_card() {
        let raws: Vec<RawCard> = serde_json::from_value(json!([shock_raw()])).unwrap();
        let (cards, report) = normalize_cards(raws, &index());

        assert_eq!(report, NormalizeReport { cards: 1, skipped: 0, duplicates: 0 });
        let shock = &cards[&12345];
        assert_eq!(shock.name, "Shock");
        assert_eq!(shock.flavor, "A jolt.");
        assert_eq!(shock.card_type_text, "Instant");
        assert_eq!(shock.subtype_text, None);
        assert_eq!(shock.order, 0);
        assert_eq!(shock.alt_kind, None);
    }

    #[test]
    fn strips_casting_cost_filler() {
        assert_eq!(strip_cost_filler("o3oGoG"), "3GG");
        assert_eq!(strip_cost_filler("oR"), "R");
        assert_eq!(strip_cost_filler(""), "");
    }

    #[test]
    fn absent_optionals_stay_absent() {
        let raws: Vec<RawCard> = serde_json::from_value(json!([shock_raw()])).unwrap();
        let (cards, _) = normalize_cards(raws, &index());
        let shock = &cards[&12345];
        assert_eq!(shock.power, None);
        assert_eq!(shock.rarity, None);
        assert_eq!(shock.cmc, Some(1));
        assert_eq!(shock.casting_cost.as_deref(), Some("R"));
    }

    #[test]
    fn resolves_subtype_text_and_abilities() {
        let raws: Vec<RawCard> = serde_json::from_value(json!([{
            "grpid": 100,
            "titleId": 14,
            "artId": 7,
            "set": "M19",
            "cardTypeTextId": 15,
            "subtypeTextId": 13,
            "power": "1",
            "toughness": "1",
            "abilities": [{"abilityId": 1005, "textId": 16}]
        }]))
        .unwrap();
        let (cards, report) = normalize_cards(raws, &index());

        assert_eq!(report.cards, 1);
        let elves = &cards[&100];
        assert_eq!(elves.subtype_text.as_deref(), Some("Elf Druid"));
        assert_eq!(elves.flavor, "");
        assert_eq!(elves.flavor_id, None);
        assert_eq!(
            elves.abilities,
            Some(vec![Ability { id: 1005, text: "{T}: Add {G}.".to_string() }])
        );
    }

    #[test]
    fn zero_subtype_text_id_means_no_subtype_line() {
        let mut value = shock_raw();
        value["subtypeTextId"] = json!(0);
        let raws: Vec<RawCard> = serde_json::from_value(json!([value])).unwrap();
        let (cards, report) = normalize_cards(raws, &index());
        assert_eq!(report.skipped, 0);
        assert_eq!(cards[&12345].subtype_text, None);
    }

    #[test]
    fn unresolvable_title_skips_only_that_card() {
        let mut broken = shock_raw();
        broken["grpid"] = json!(999);
        broken["titleId"] = json!(424242);
        let raws: Vec<RawCard> =
            serde_json::from_value(json!([broken, shock_raw()])).unwrap();
        let (cards, report) = normalize_cards(raws, &index());

        assert_eq!(report, NormalizeReport { cards: 1, skipped: 1, duplicates: 0 });
        assert!(cards.contains_key(&12345));
        assert!(!cards.contains_key(&999));
    }

    #[test]
    fn unresolvable_ability_text_fails_the_card() {
        let mut broken = shock_raw();
        broken["abilities"] = json!([{"abilityId": 1, "textId": 424242}]);
        let raws: Vec<RawCard> = serde_json::from_value(json!([broken])).unwrap();
        let (cards, report) = normalize_cards(raws, &index());
        assert!(cards.is_empty());
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn later_duplicate_wins() {
        let mut second = shock_raw();
        second["titleId"] = json!(14);
        let raws: Vec<RawCard> =
            serde_json::from_value(json!([shock_raw(), second])).unwrap();
        let (cards, report) = normalize_cards(raws, &index());

        assert_eq!(report, NormalizeReport { cards: 1, skipped: 0, duplicates: 1 });
        assert_eq!(cards[&12345].name, "Llanowar Elves");
    }
}

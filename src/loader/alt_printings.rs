//! Alternate-printing overlay
//!
//! Tags variant card records with a 1-based ordinal and their variant-kind
//! label, in the order the source table lists them.

use crate::core::CardRecord;
use log::warn;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Base grpid -> (kind label -> variant grpid), as shipped in
/// `Data_altPrintings_*.mtga`. The inner maps keep source order thanks to
/// serde_json's `preserve_order` feature.
pub type RawAltPrintings = HashMap<u64, Map<String, Value>>;

/// Overlay the alternate-printing table onto the normalized records.
///
/// A record's `order` stays 0 iff it is never referenced as a variant.
/// Ordinals count every entry of the source mapping, so a skipped
/// (malformed or dangling) entry still consumes its position. Dangling
/// references warn and are ignored. Returns the number of variants
/// tagged.
pub fn merge_alt_printings(alts: &RawAltPrintings, cards: &mut BTreeMap<u64, CardRecord>) -> usize {
    let mut tagged = 0;
    for (&base, kinds) in alts {
        let base_exists = cards.contains_key(&base);
        for (position, (kind, value)) in kinds.iter().enumerate() {
            let Some(variant) = value.as_u64() else {
                warn!("alt printing {base}/{kind}: variant id {value} is not numeric");
                continue;
            };
            match cards.get_mut(&variant) {
                Some(record) => {
                    record.order = position as u32 + 1;
                    record.alt_kind = Some(kind.trim().to_string());
                    tagged += 1;
                }
                // Distinguish a missing variant (data inconsistency) from a
                // base card that is not in the database at all.
                None if base_exists => warn!(
                    "alt printing {base}/{kind}: variant {variant} missing from card database"
                ),
                None => warn!(
                    "alt printing {base}/{kind}: base card not in database (removed or unsupported)"
                ),
            }
        }
    }
    tagged
}

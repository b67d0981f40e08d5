//! Card selection
//!
//! Filters the card database by an anchored case-insensitive name pattern
//! and/or an exact set code.

use crate::core::CardRecord;
use crate::loader::CardDatabase;
use crate::Result;
use regex::{Regex, RegexBuilder};

pub struct CardFilter {
    name: Option<Regex>,
    set: Option<String>,
}

impl CardFilter {
    /// Compile the filter. The pattern matches from the start of the
    /// display name (not a full-string or substring match) and is
    /// case-insensitive; an invalid pattern is fatal.
    pub fn new(pattern: Option<&str>, set: Option<String>) -> Result<CardFilter> {
        let name = match pattern {
            Some(p) => Some(
                RegexBuilder::new(&format!("^(?:{p})"))
                    .case_insensitive(true)
                    .build()?,
            ),
            None => None,
        };
        Ok(CardFilter { name, set })
    }

    /// True when neither selector was given (refresh-only mode).
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.set.is_none()
    }

    pub fn matches(&self, card: &CardRecord) -> bool {
        let name_ok = self.name.as_ref().map_or(true, |re| re.is_match(&card.name));
        let set_ok = self.set.as_deref().map_or(true, |set| card.set == set);
        name_ok && set_ok
    }

    /// Lazily yield the matching records.
    pub fn select<'a>(&'a self, db: &'a CardDatabase) -> impl Iterator<Item = &'a CardRecord> {
        db.records().filter(move |card| self.matches(card))
    }
}

//! Core domain types

pub mod card;

pub use card::{Ability, CardRecord};

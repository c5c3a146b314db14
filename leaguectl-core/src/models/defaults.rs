//! Documented field defaults and serde helpers that apply them to null columns
//!
//! `#[serde(default = ..)]` only covers missing keys; the store returns
//! explicit nulls for unset columns, so each defaulted field also routes
//! through one of the `deserialize_with` helpers below.

use serde::{Deserialize, Deserializer};

pub const DEFAULT_NATIONALITY: &str = "Mauritania";
pub const DEFAULT_AUTHOR: &str = "site administration";
pub const DEFAULT_ROUND: &str = "regular";
pub const DEFAULT_COMPETITION: &str = "Super-D1";

pub(crate) fn nationality() -> String {
    DEFAULT_NATIONALITY.to_owned()
}

pub(crate) fn author() -> String {
    DEFAULT_AUTHOR.to_owned()
}

pub(crate) fn round() -> String {
    DEFAULT_ROUND.to_owned()
}

pub(crate) fn competition() -> String {
    DEFAULT_COMPETITION.to_owned()
}

pub(crate) fn yes() -> bool {
    true
}

fn null_or<'de, D, T>(deserializer: D, fallback: fn() -> T) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_else(fallback))
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    null_or(deserializer, T::default)
}

pub(crate) fn null_as_nationality<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    null_or(d, nationality)
}

pub(crate) fn null_as_author<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    null_or(d, author)
}

pub(crate) fn null_as_round<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    null_or(d, round)
}

pub(crate) fn null_as_competition<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    null_or(d, competition)
}

pub(crate) fn null_as_true<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    null_or(d, yes)
}

/// Substitute `fallback` when optional text is blank or absent.
pub(crate) fn text_or(value: Option<String>, fallback: fn() -> String) -> String {
    super::validation::blank_to_none(value).unwrap_or_else(fallback)
}

//! Naming utilities for SchemaShaper
//!
//! This module provides utilities for naming conventions and transformations.

use inflector::Inflector;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static ID_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:_id|_ID|Id|ID)$").expect("id suffix pattern is valid"));

/// Casing convention applied to identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseStyle {
    #[serde(rename = "camel_case", alias = "camel")]
    Camel,
    #[serde(rename = "pascal_case", alias = "pascal")]
    Pascal,
    #[serde(rename = "snake_case", alias = "snake")]
    Snake,
    #[serde(rename = "kebab_case", alias = "kebab", alias = "param")]
    Kebab,
    #[serde(rename = "screaming_snake_case")]
    ScreamingSnake,
    #[serde(rename = "title_case", alias = "title")]
    Title,
    /// Keep the name as is
    #[serde(rename = "none")]
    None,
}

/// Apply a naming convention to a string
pub fn apply_naming_convention(name: &str, style: CaseStyle) -> String {
    match style {
        CaseStyle::Snake => name.to_snake_case(),
        CaseStyle::Camel => name.to_camel_case(),
        CaseStyle::Pascal => name.to_pascal_case(),
        CaseStyle::Kebab => name.to_kebab_case(),
        CaseStyle::ScreamingSnake => name.to_screaming_snake_case(),
        CaseStyle::Title => name.to_title_case(),
        CaseStyle::None => name.to_string(),
    }
}

/// Drop a trailing foreign-key id suffix (`_id`, `Id`, `ID`).
///
/// Returns `None` when nothing would be left of the name, or when the name
/// ends in a `uuid`/`guid` identifier.
pub fn strip_id_suffix(name: &str) -> Option<String> {
    let lower = name.to_lowercase();
    if lower.ends_with("uuid") || lower.ends_with("guid") {
        return None;
    }
    let stripped = ID_SUFFIX.replace(name, "");
    if stripped.is_empty() || stripped == name {
        return None;
    }
    Some(stripped.into_owned())
}

/// Check for name conflicts in a list of identifiers
pub fn check_identifier_conflicts(
    names: &[String],
    ignore_case: bool,
) -> Option<(String, String)> {
    let mut seen = HashMap::<String, String>::new();

    for name in names {
        let key = if ignore_case { name.to_lowercase() } else { name.clone() };

        if let Some(existing) = seen.get(&key) {
            return Some((existing.clone(), name.clone()));
        }
        seen.insert(key, name.clone());
    }

    None
}

/// Generate a unique name with a suffix if name exists in the list
pub fn generate_unique_name(name: &str, existing_names: &[String]) -> String {
    if !existing_names.iter().any(|existing| existing == name) {
        return name.to_string();
    }

    let mut counter = 1;
    loop {
        let new_name = format!("{}_{}", name, counter);
        if !existing_names.contains(&new_name) {
            return new_name;
        }
        counter += 1;
    }
}

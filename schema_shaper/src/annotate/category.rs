//! Semantic type categories for generated object fields

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::types::SourceType;

/// Textual columns longer than this are rendered as multi-line text
pub const TEXTAREA_THRESHOLD: u32 = 400;

/// Display/storage category of a column, independent of the database type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeCategory {
    Text,
    Textarea,
    Boolean,
    Date,
    Datetime,
    Number,
}

impl TypeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeCategory::Text => "text",
            TypeCategory::Textarea => "textarea",
            TypeCategory::Boolean => "boolean",
            TypeCategory::Date => "date",
            TypeCategory::Datetime => "datetime",
            TypeCategory::Number => "number",
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn text_by_length(length: u32) -> TypeCategory {
    if length > TEXTAREA_THRESHOLD {
        TypeCategory::Textarea
    } else {
        TypeCategory::Text
    }
}

/// Classify a column. Rules are checked in order, the first match wins;
/// storage types take precedence over the semantic source type.
pub fn classify(source_type: &SourceType, storage_type: &str, length: Option<u32>) -> TypeCategory {
    let length = length.unwrap_or(0);

    if storage_type == "timestamp" {
        return TypeCategory::Number;
    }
    if storage_type == "text" || storage_type == "ntext" {
        return TypeCategory::Textarea;
    }

    match source_type {
        SourceType::Text => text_by_length(length),
        SourceType::Boolean => TypeCategory::Boolean,
        SourceType::Date => TypeCategory::Date,
        SourceType::DateTime => TypeCategory::Datetime,
        SourceType::Numeric => TypeCategory::Number,
        SourceType::Unknown(_) => text_by_length(length),
    }
}

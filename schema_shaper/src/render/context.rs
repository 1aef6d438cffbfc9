//! Helpers handed to the template renderer
//!
//! Everything a template needs besides the model itself lives on
//! [`RenderContext`], built from the generation settings and passed into the
//! render call.

use serde::Serialize;

use crate::config::GenerationConfig;
use crate::utils::naming::{apply_naming_convention, CaseStyle};

/// Casing and formatting helpers for one render run
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    entity_case: CaseStyle,
    file_case: CaseStyle,
    property_case: CaseStyle,
    property_visibility: String,
    lazy: bool,
}

impl RenderContext {
    pub fn new(generation: &GenerationConfig) -> Self {
        Self {
            entity_case: generation.convert_case_entity,
            file_case: generation.convert_case_file,
            property_case: generation.convert_case_property,
            property_visibility: generation.property_visibility.clone(),
            lazy: generation.lazy,
        }
    }

    /// Class/object name of an entity
    pub fn entity_name(&self, name: &str) -> String {
        apply_naming_convention(name, self.entity_case)
    }

    /// File stem of the artifact generated for an entity
    pub fn file_name(&self, name: &str) -> String {
        apply_naming_convention(name, self.file_case)
    }

    pub fn property_name(&self, name: &str) -> String {
        apply_naming_convention(name, self.property_case)
    }

    /// Human readable label, e.g. `created_at` -> `Created At`
    pub fn label(&self, name: &str) -> String {
        apply_naming_convention(name, CaseStyle::Title)
    }

    /// Wrap a relation type for lazy loading when enabled
    pub fn lazy(&self, type_name: &str) -> String {
        if self.lazy {
            format!("Promise<{}>", type_name)
        } else {
            type_name.to_string()
        }
    }

    /// `"public "`-style prefix for property declarations, empty for `none`
    pub fn visibility_prefix(&self) -> String {
        match self.property_visibility.as_str() {
            "" | "none" => String::new(),
            visibility => format!("{} ", visibility),
        }
    }

    /// True when a collection holds more than one element
    pub fn is_multiple<T>(&self, items: &[T]) -> bool {
        items.len() > 1
    }
}

//! Configuration handling for SchemaShaper

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;

use crate::customize::defaults::{DatabaseEngine, TypeDefaults};
use crate::error::{Error, Result};
use crate::utils::naming::CaseStyle;

/// Load configuration from a TOML file
pub fn load_from_file(path: &str) -> Result<Config> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| Error::ConfigError(format!("Failed to read config file: {}", e)))?;

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| Error::ConfigError(format!("Failed to parse config file: {}", e)))?;

    Ok(config)
}

/// Represents the complete SchemaShaper configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub naming: NamingConfig,
    pub generation: GenerationConfig,
    pub type_defaults: Option<HashMap<String, TypeDefaults>>,
    pub logging: Option<LoggingConfig>,
}

/// Source database engine of the snapshot
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub database_type: Option<DatabaseEngine>,
}

/// Naming policy selection
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NamingConfig {
    /// `identity`, `convention`, or the name of a registered custom policy
    pub policy: String,
    pub entity_style: CaseStyle,
    pub column_style: CaseStyle,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            policy: "identity".to_string(),
            entity_style: CaseStyle::Pascal,
            column_style: CaseStyle::Camel,
        }
    }
}

/// Generation toggles. Only `relation_ids`, `generate_constructor` and
/// `active_record` are read by the customization stages; the casing options
/// are consumed through the render context.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GenerationConfig {
    pub relation_ids: bool,
    pub generate_constructor: bool,
    pub active_record: bool,
    pub convert_case_file: CaseStyle,
    pub convert_case_entity: CaseStyle,
    pub convert_case_property: CaseStyle,
    pub property_visibility: String,
    pub lazy: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            relation_ids: false,
            generate_constructor: false,
            active_record: false,
            convert_case_file: CaseStyle::Kebab,
            convert_case_entity: CaseStyle::Pascal,
            convert_case_property: CaseStyle::Camel,
            property_visibility: "none".to_string(),
            lazy: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    pub format: String,
    pub stdout: bool,
}

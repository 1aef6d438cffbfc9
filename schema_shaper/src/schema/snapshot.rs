//! Schema snapshot input/output
//!
//! Introspection drivers hand over the raw schema as a JSON or YAML
//! document; the customized model goes to the renderer as YAML.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::schema::types::SchemaModel;

/// Serialization format of a snapshot document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Guess the format from a file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                SnapshotFormat::Yaml
            }
            _ => SnapshotFormat::Json,
        }
    }
}

/// Load a schema snapshot from a file
pub fn load_snapshot(path: &str) -> Result<SchemaModel> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::IngestionError(format!("Failed to read snapshot {}: {}", path, e)))?;

    parse_snapshot(&contents, SnapshotFormat::from_path(Path::new(path)))
}

/// Parse a schema snapshot document
pub fn parse_snapshot(contents: &str, format: SnapshotFormat) -> Result<SchemaModel> {
    let model: SchemaModel = match format {
        SnapshotFormat::Json => serde_json::from_str(contents)
            .map_err(|e| Error::IngestionError(format!("Failed to parse snapshot: {}", e)))?,
        SnapshotFormat::Yaml => serde_yaml::from_str(contents)
            .map_err(|e| Error::IngestionError(format!("Failed to parse snapshot: {}", e)))?,
    };

    tracing::debug!(entities = model.entities.len(), ?format, "Loaded schema snapshot");
    Ok(model)
}

/// Serialize a (customized) model as YAML
pub fn to_yaml(model: &SchemaModel) -> Result<String> {
    Ok(serde_yaml::to_string(model)?)
}

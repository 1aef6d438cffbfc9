//! Schema module for SchemaShaper
//!
//! This module holds the schema model and its snapshot input/output.

pub mod snapshot;
pub mod types;

// Re-export key types
pub use snapshot::{load_snapshot, parse_snapshot, to_yaml, SnapshotFormat};
pub use types::{Column, Entity, Index, Multiplicity, Relation, SchemaModel, SourceType};

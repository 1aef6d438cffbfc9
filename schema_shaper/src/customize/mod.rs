//! Model customization
//!
//! The stages run once, in a fixed order, over a schema snapshot:
//! default attribute stripping, relation id flags, renaming, imports, and
//! finally the column annotations read by renderers.

pub mod defaults;
pub mod imports;
pub mod policy;
pub mod relation_ids;
pub mod renamer;

pub use defaults::{effective_defaults, strip_default_attributes, DataTypeDefaults, DatabaseEngine, TypeDefaults};
pub use imports::resolve_imports;
pub use policy::{ConventionPolicy, IdentityPolicy, NamingPolicy, PolicyRegistry};
pub use relation_ids::flag_relation_ids;
pub use renamer::GraphRenamer;

use crate::annotate::annotate_model;
use crate::config::GenerationConfig;
use crate::error::{Error, Result};
use crate::schema::types::SchemaModel;

/// Record the introspected names as storage names before anything is renamed
fn pin_sql_names(model: &mut SchemaModel) {
    for entity in &mut model.entities {
        if entity.sql_name.is_empty() {
            entity.sql_name = entity.name.clone();
        }
        for column in &mut entity.columns {
            if column.sql_name.is_empty() {
                column.sql_name = column.name.clone();
            }
        }
    }
}

/// Run every customization stage over `model`.
///
/// Returns `Ok(None)` when the snapshot holds no entities: there is nothing
/// to generate, which callers treat as a skipped run rather than a failure.
pub fn customize_model(
    mut model: SchemaModel,
    policy: &dyn NamingPolicy,
    generation: &GenerationConfig,
    defaults: Option<&DataTypeDefaults>,
) -> Result<Option<SchemaModel>> {
    if model.is_empty() {
        tracing::warn!("Tables not found in the schema snapshot, skipping model customization");
        return Ok(None);
    }
    model
        .validate()
        .map_err(|e| Error::IngestionError(format!("Inconsistent schema snapshot: {}", e)))?;

    tracing::info!(entities = model.entities.len(), "Customizing schema model");

    pin_sql_names(&mut model);
    strip_default_attributes(&mut model, defaults);
    if generation.relation_ids {
        flag_relation_ids(&mut model);
    }
    GraphRenamer::new(policy).rename(&mut model)?;
    resolve_imports(&mut model, generation);
    annotate_model(&mut model);

    tracing::info!(entities = model.entities.len(), "Schema model customized");
    Ok(Some(model))
}

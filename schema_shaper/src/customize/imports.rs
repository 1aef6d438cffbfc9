//! Per-entity imports and generation toggles

use indexmap::IndexSet;

use crate::config::GenerationConfig;
use crate::schema::types::SchemaModel;

/// Record on every entity the other entities its relations point at, and
/// copy the constructor / active-record toggles from configuration.
///
/// Imports keep the order in which they are first seen.
pub fn resolve_imports(model: &mut SchemaModel, generation: &GenerationConfig) {
    for entity in &mut model.entities {
        let imports: IndexSet<String> = entity
            .columns
            .iter()
            .flat_map(|column| column.relations.iter())
            .filter(|relation| relation.related_table != entity.name)
            .map(|relation| relation.related_table.clone())
            .collect();

        entity.imports = imports.into_iter().collect();
        entity.generate_constructor = generation.generate_constructor;
        entity.active_record = generation.active_record;
    }
}

//! Column annotations consumed by renderers
//!
//! Each column receives its semantic [`TypeCategory`] and, when it carries
//! relations, its [`ReferenceTarget`].

pub mod category;
pub mod reference;

pub use category::{classify, TypeCategory};
pub use reference::{resolve_reference, ReferenceDescriptor, ReferenceTarget};

use crate::schema::types::SchemaModel;

/// Annotate every column of the model with its category and reference target
pub fn annotate_model(model: &mut SchemaModel) {
    for entity in &mut model.entities {
        for column in &mut entity.columns {
            let category = classify(&column.source_type, &column.storage_type, column.length);
            tracing::trace!(
                entity = %entity.name,
                column = %column.name,
                %category,
                "Classified column"
            );
            column.category = Some(category);
            column.reference = resolve_reference(&column.relations);
        }
    }
}

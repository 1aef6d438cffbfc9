//! Relation id flags

use crate::schema::types::SchemaModel;

/// Mark the owning side of every relation as exposing an explicit
/// foreign-key id property next to the object reference.
pub fn flag_relation_ids(model: &mut SchemaModel) {
    for relation in model
        .entities
        .iter_mut()
        .flat_map(|entity| entity.columns.iter_mut())
        .flat_map(|column| column.relations.iter_mut())
    {
        relation.relation_id_field = Some(relation.is_owner);
    }
}

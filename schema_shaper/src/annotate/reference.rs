//! Reference targets of relation-carrying columns

use serde::{Deserialize, Serialize};

use crate::schema::types::Relation;

/// One referenced entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDescriptor {
    pub name: String,
}

/// What a column refers to.
///
/// A column with a single relation serializes as one object, a column with
/// several relations as a list. Renderers have to accept both shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReferenceTarget {
    Single(ReferenceDescriptor),
    Many(Vec<ReferenceDescriptor>),
}

impl ReferenceTarget {
    /// All referenced descriptors, whatever the shape
    pub fn descriptors(&self) -> &[ReferenceDescriptor] {
        match self {
            ReferenceTarget::Single(descriptor) => std::slice::from_ref(descriptor),
            ReferenceTarget::Many(descriptors) => descriptors,
        }
    }
}

/// Resolve the reference target of a column from its relations
pub fn resolve_reference(relations: &[Relation]) -> Option<ReferenceTarget> {
    let mut descriptors: Vec<ReferenceDescriptor> = relations
        .iter()
        .map(|relation| ReferenceDescriptor {
            name: relation.related_table.clone(),
        })
        .collect();

    match descriptors.len() {
        0 => None,
        1 => descriptors.pop().map(ReferenceTarget::Single),
        _ => Some(ReferenceTarget::Many(descriptors)),
    }
}

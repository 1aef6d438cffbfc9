//! Type definitions for the schema model
//!
//! The model is produced by an introspection driver, customized in place by
//! the stages in [`crate::customize`] and then handed to a renderer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::annotate::category::TypeCategory;
use crate::annotate::reference::ReferenceTarget;
use crate::error::{Error, Result};
use crate::utils::naming::check_identifier_conflicts;

/// Represents a complete introspected schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaModel {
    pub entities: Vec<Entity>,
}

impl SchemaModel {
    /// Create a new empty schema model
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity to the model
    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Builder form of [`SchemaModel::add_entity`]
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.add_entity(entity);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Look up an entity by its current name
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.name == name)
    }

    /// Look up an entity by its current name, mutably
    pub fn entity_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.name == name)
    }

    /// Iterate over every relation in the model
    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.entities
            .iter()
            .flat_map(|entity| entity.columns.iter())
            .flat_map(|column| column.relations.iter())
    }

    /// Check the referential invariants of the model.
    ///
    /// - entity names are unique, column names are unique within an entity
    /// - every `owner_table` / `related_table` names an entity of the model
    /// - every `owner_column` / `related_column` names a column of `related_table`
    /// - every index column names a column of the owning entity
    pub fn validate(&self) -> Result<()> {
        let entity_names: Vec<String> = self.entities.iter().map(|e| e.name.clone()).collect();
        if let Some((name, _)) = check_identifier_conflicts(&entity_names, false) {
            return Err(Error::InvariantViolation(format!(
                "entity name '{}' is not unique",
                name
            )));
        }

        for entity in &self.entities {
            let column_names: Vec<String> = entity.columns.iter().map(|c| c.name.clone()).collect();
            if let Some((name, _)) = check_identifier_conflicts(&column_names, false) {
                return Err(Error::InvariantViolation(format!(
                    "column name '{}' is not unique in entity '{}'",
                    name, entity.name
                )));
            }

            for index in &entity.indexes {
                for column in &index.columns {
                    if entity.column(column).is_none() {
                        return Err(Error::InvariantViolation(format!(
                            "index {} on '{}' references missing column '{}'",
                            index.display_name(),
                            entity.name,
                            column
                        )));
                    }
                }
            }

            for column in &entity.columns {
                for relation in &column.relations {
                    if self.entity(&relation.owner_table).is_none() {
                        return Err(Error::InvariantViolation(format!(
                            "relation on '{}.{}' has unknown owner table '{}'",
                            entity.name, column.name, relation.owner_table
                        )));
                    }
                    let related = self.entity(&relation.related_table).ok_or_else(|| {
                        Error::InvariantViolation(format!(
                            "relation on '{}.{}' has unknown related table '{}'",
                            entity.name, column.name, relation.related_table
                        ))
                    })?;
                    for referenced in [&relation.owner_column, &relation.related_column] {
                        if related.column(referenced).is_none() {
                            return Err(Error::InvariantViolation(format!(
                                "relation on '{}.{}' references missing column '{}.{}'",
                                entity.name, column.name, related.name, referenced
                            )));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// Represents one database table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    /// Storage name of the table; never touched by renaming
    #[serde(default)]
    pub sql_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub indexes: Vec<Index>,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub generate_constructor: bool,
    #[serde(default)]
    pub active_record: bool,
}

impl Entity {
    /// Create a new entity with the given name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            sql_name: name.to_string(),
            schema: None,
            columns: Vec::new(),
            indexes: Vec::new(),
            imports: Vec::new(),
            generate_constructor: false,
            active_record: false,
        }
    }

    /// Add a column to the entity
    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Add an index to the entity
    pub fn add_index(&mut self, index: Index) {
        self.indexes.push(index);
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.add_column(column);
        self
    }

    pub fn with_index(mut self, index: Index) -> Self {
        self.add_index(index);
        self
    }

    /// Look up a column by its current name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }
}

/// Represents one table attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Storage name of the column; never touched by renaming
    #[serde(default)]
    pub sql_name: String,
    pub source_type: SourceType,
    pub storage_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub relations: Vec<Relation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TypeCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceTarget>,
}

impl Column {
    /// Create a new column with the given name and types
    pub fn new(name: &str, source_type: impl Into<SourceType>, storage_type: &str) -> Self {
        Self {
            name: name.to_string(),
            sql_name: name.to_string(),
            source_type: source_type.into(),
            storage_type: storage_type.to_string(),
            length: None,
            precision: None,
            scale: None,
            width: None,
            nullable: false,
            primary: false,
            unique: false,
            default: None,
            comment: None,
            relations: Vec::new(),
            category: None,
            reference: None,
        }
    }

    /// Set whether the column is nullable
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Mark the column as (part of) the primary key
    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Attach a relation to the column
    pub fn relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }
}

/// Semantic type of a column as reported by the introspection driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceType {
    Text,
    Boolean,
    /// A calendar date without a time component
    Date,
    DateTime,
    Numeric,
    Unknown(String),
}

impl SourceType {
    pub fn as_str(&self) -> &str {
        match self {
            SourceType::Text => "string",
            SourceType::Boolean => "boolean",
            SourceType::Date => "date",
            SourceType::DateTime => "Date",
            SourceType::Numeric => "number",
            SourceType::Unknown(name) => name,
        }
    }
}

impl From<&str> for SourceType {
    fn from(name: &str) -> Self {
        match name {
            "string" => SourceType::Text,
            "boolean" => SourceType::Boolean,
            "date" => SourceType::Date,
            "Date" => SourceType::DateTime,
            "number" => SourceType::Numeric,
            other => SourceType::Unknown(other.to_string()),
        }
    }
}

impl From<String> for SourceType {
    fn from(name: String) -> Self {
        SourceType::from(name.as_str())
    }
}

impl From<SourceType> for String {
    fn from(source_type: SourceType) -> Self {
        source_type.as_str().to_string()
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cardinality of a relation, seen from the column that carries it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Multiplicity {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

/// A foreign-key derived link between two entities.
///
/// A relation is attached to a column of the entity that declares it.
/// `owner_table` is the entity holding the foreign key. Both `owner_column`
/// and `related_column` name properties of `related_table`: the referenced
/// property and the property pairing with the owning side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub owner_table: String,
    pub owner_column: String,
    pub related_table: String,
    pub related_column: String,
    pub is_owner: bool,
    pub multiplicity: Multiplicity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_id_field: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<String>,
}

impl Relation {
    /// Create a relation; `related` is `(table, column)` on the other end
    pub fn new(
        owner: (&str, &str),
        related: (&str, &str),
        is_owner: bool,
        multiplicity: Multiplicity,
    ) -> Self {
        Self {
            owner_table: owner.0.to_string(),
            owner_column: owner.1.to_string(),
            related_table: related.0.to_string(),
            related_column: related.1.to_string(),
            is_owner,
            multiplicity,
            relation_id_field: None,
            on_delete: None,
            on_update: None,
        }
    }
}

/// Represents an index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub primary: bool,
    pub columns: Vec<String>,
}

impl Index {
    pub fn new(name: &str, columns: &[&str]) -> Self {
        Self {
            name: Some(name.to_string()),
            unique: false,
            primary: false,
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn primary(mut self) -> Self {
        self.primary = true;
        self.unique = true;
        self
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

//! Graph-consistent renaming
//!
//! Applies a [`NamingPolicy`] to every relation-carrying column, entity and
//! column of the model in three passes (relations, entities, columns). Each
//! rename is propagated to every relation and index referring to the old
//! name before the new name is committed, so the model never holds a
//! dangling reference between two renames.
//!
//! Referrers are found through a [`ReferenceIndex`] built once per run:
//! entities are addressed by their position in the model, which never
//! changes, and every relation endpoint is filed under the entity (and
//! column) it names.

use std::collections::HashMap;

use crate::customize::policy::NamingPolicy;
use crate::error::{Error, Result};
use crate::schema::types::{Relation, SchemaModel};

/// Position of a relation inside the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RelationPath {
    entity: usize,
    column: usize,
    relation: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableEnd {
    Owner,
    Related,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnEnd {
    Owner,
    Related,
}

/// Reverse references of the model
#[derive(Debug, Default)]
struct ReferenceIndex {
    /// Per entity, the relation endpoints naming it as owner or related table
    table_refs: Vec<Vec<(RelationPath, TableEnd)>>,
    /// Per (related entity, column name), the relation endpoints naming the column
    column_refs: HashMap<(usize, String), Vec<(RelationPath, ColumnEnd)>>,
}

impl ReferenceIndex {
    fn build(model: &SchemaModel) -> Result<Self> {
        let entity_ids: HashMap<&str, usize> = model
            .entities
            .iter()
            .enumerate()
            .map(|(id, entity)| (entity.name.as_str(), id))
            .collect();
        let lookup = |table: &str| {
            entity_ids.get(table).copied().ok_or_else(|| {
                Error::InvariantViolation(format!("relation references unknown table '{}'", table))
            })
        };

        let mut index = ReferenceIndex {
            table_refs: vec![Vec::new(); model.entities.len()],
            column_refs: HashMap::new(),
        };

        for (entity_id, entity) in model.entities.iter().enumerate() {
            for (column_id, column) in entity.columns.iter().enumerate() {
                for (relation_id, relation) in column.relations.iter().enumerate() {
                    let path = RelationPath {
                        entity: entity_id,
                        column: column_id,
                        relation: relation_id,
                    };
                    let owner = lookup(&relation.owner_table)?;
                    let related = lookup(&relation.related_table)?;

                    index.table_refs[owner].push((path, TableEnd::Owner));
                    index.table_refs[related].push((path, TableEnd::Related));
                    index
                        .column_refs
                        .entry((related, relation.owner_column.clone()))
                        .or_default()
                        .push((path, ColumnEnd::Owner));
                    index
                        .column_refs
                        .entry((related, relation.related_column.clone()))
                        .or_default()
                        .push((path, ColumnEnd::Related));
                }
            }
        }

        Ok(index)
    }
}

fn relation_mut(model: &mut SchemaModel, path: RelationPath) -> &mut Relation {
    &mut model.entities[path.entity].columns[path.column].relations[path.relation]
}

/// Renames a schema model according to a naming policy
pub struct GraphRenamer<'a> {
    policy: &'a dyn NamingPolicy,
}

impl<'a> GraphRenamer<'a> {
    pub fn new(policy: &'a dyn NamingPolicy) -> Self {
        Self { policy }
    }

    /// Run the relation, entity and column passes, in that order
    pub fn rename(&self, model: &mut SchemaModel) -> Result<()> {
        let mut index = ReferenceIndex::build(model)?;

        self.rename_relations(model, &mut index)?;
        debug_assert!(model.validate().is_ok(), "relation pass left a dangling reference");
        self.rename_entities(model, &index)?;
        debug_assert!(model.validate().is_ok(), "entity pass left a dangling reference");
        self.rename_columns(model, &mut index)?;
        debug_assert!(model.validate().is_ok(), "column pass left a dangling reference");

        Ok(())
    }

    /// Pass 1: give relation-carrying columns their relation-facing names
    fn rename_relations(&self, model: &mut SchemaModel, index: &mut ReferenceIndex) -> Result<()> {
        for entity_id in 0..model.entities.len() {
            for column_id in 0..model.entities[entity_id].columns.len() {
                for relation_id in 0..model.entities[entity_id].columns[column_id].relations.len() {
                    let column = &model.entities[entity_id].columns[column_id];
                    let relation = &column.relations[relation_id];
                    let new_name = self.policy.relation_name(&column.name, relation, model);

                    rename_column(model, index, entity_id, column_id, new_name)?;
                }
            }
        }

        tracing::debug!("Relation names applied");
        Ok(())
    }

    /// Pass 2: entity names
    fn rename_entities(&self, model: &mut SchemaModel, index: &ReferenceIndex) -> Result<()> {
        for entity_id in 0..model.entities.len() {
            let old_name = model.entities[entity_id].name.clone();
            let new_name = self.policy.entity_name(&old_name);
            if new_name == old_name {
                continue;
            }
            if model.entities.iter().any(|entity| entity.name == new_name) {
                return Err(Error::NameCollision {
                    scope: "schema".to_string(),
                    from: old_name,
                    to: new_name,
                });
            }

            for &(path, end) in &index.table_refs[entity_id] {
                let relation = relation_mut(model, path);
                match end {
                    TableEnd::Owner => relation.owner_table = new_name.clone(),
                    TableEnd::Related => relation.related_table = new_name.clone(),
                }
            }

            tracing::trace!(from = %old_name, to = %new_name, "Renamed entity");
            model.entities[entity_id].name = new_name;
        }

        tracing::debug!("Entity names applied");
        Ok(())
    }

    /// Pass 3: column names
    fn rename_columns(&self, model: &mut SchemaModel, index: &mut ReferenceIndex) -> Result<()> {
        for entity_id in 0..model.entities.len() {
            for column_id in 0..model.entities[entity_id].columns.len() {
                let new_name = self
                    .policy
                    .column_name(&model.entities[entity_id].columns[column_id].name);

                rename_column(model, index, entity_id, column_id, new_name)?;
            }
        }

        tracing::debug!("Column names applied");
        Ok(())
    }
}

/// Rename one column and every reference to it: relation endpoints naming
/// it (found through the reference index) and index entries of its entity.
fn rename_column(
    model: &mut SchemaModel,
    index: &mut ReferenceIndex,
    entity_id: usize,
    column_id: usize,
    new_name: String,
) -> Result<()> {
    let entity = &model.entities[entity_id];
    let old_name = entity.columns[column_id].name.clone();
    if new_name == old_name {
        return Ok(());
    }
    if entity.columns.iter().any(|column| column.name == new_name) {
        return Err(Error::NameCollision {
            scope: format!("entity '{}'", entity.name),
            from: old_name,
            to: new_name,
        });
    }

    if let Some(referrers) = index.column_refs.remove(&(entity_id, old_name.clone())) {
        for &(path, end) in &referrers {
            let relation = relation_mut(model, path);
            match end {
                ColumnEnd::Owner => relation.owner_column = new_name.clone(),
                ColumnEnd::Related => relation.related_column = new_name.clone(),
            }
        }
        index
            .column_refs
            .entry((entity_id, new_name.clone()))
            .or_default()
            .extend(referrers);
    }

    let entity = &mut model.entities[entity_id];
    for entity_index in &mut entity.indexes {
        for column in entity_index.columns.iter_mut().filter(|column| **column == old_name) {
            *column = new_name.clone();
        }
    }

    tracing::trace!(entity = %entity.name, from = %old_name, to = %new_name, "Renamed column");
    entity.columns[column_id].name = new_name;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customize::policy::{ConventionPolicy, IdentityPolicy};
    use crate::schema::types::{Column, Entity, Index, Multiplicity};
    use pretty_assertions::assert_eq;

    /// `customer` 1-n `order`, with the inverse property `orders` on customer
    fn shop() -> SchemaModel {
        SchemaModel::new()
            .with_entity(
                Entity::new("customer")
                    .with_column(Column::new("id", "number", "int").primary())
                    .with_column(Column::new("orders", "number", "int").relation(Relation::new(
                        ("order", "customer_id"),
                        ("order", "customer_id"),
                        false,
                        Multiplicity::OneToMany,
                    )))
                    .with_index(Index::new("PK_customer", &["id"]).primary()),
            )
            .with_entity(
                Entity::new("order")
                    .with_column(Column::new("id", "number", "int").primary())
                    .with_column(Column::new("customer_id", "number", "int").relation(
                        Relation::new(
                            ("order", "orders"),
                            ("customer", "id"),
                            true,
                            Multiplicity::ManyToOne,
                        ),
                    ))
                    .with_index(Index::new("IX_order_customer", &["customer_id"])),
            )
    }

    /// Renames exactly the names it is told about
    #[derive(Default)]
    struct Renames {
        entities: HashMap<&'static str, &'static str>,
        columns: HashMap<&'static str, &'static str>,
        relations: HashMap<&'static str, &'static str>,
    }

    fn lookup(map: &HashMap<&'static str, &'static str>, name: &str) -> String {
        map.get(name).copied().unwrap_or(name).to_string()
    }

    impl NamingPolicy for Renames {
        fn entity_name(&self, current: &str) -> String {
            lookup(&self.entities, current)
        }
        fn column_name(&self, current: &str) -> String {
            lookup(&self.columns, current)
        }
        fn relation_name(&self, column_name: &str, _: &Relation, _: &SchemaModel) -> String {
            lookup(&self.relations, column_name)
        }
    }

    #[test]
    fn test_identity_leaves_model_unchanged() {
        let mut model = shop();
        GraphRenamer::new(&IdentityPolicy).rename(&mut model).unwrap();

        assert_eq!(model, shop());
    }

    #[test]
    fn test_column_rename_reaches_relations_and_indexes() {
        let policy = Renames { columns: HashMap::from([("id", "identifier")]), ..Default::default() };
        let mut model = shop();
        GraphRenamer::new(&policy).rename(&mut model).unwrap();

        let order = model.entity("order").unwrap();
        assert_eq!(order.columns[1].relations[0].related_column, "identifier");
        let customer = model.entity("customer").unwrap();
        assert_eq!(customer.indexes[0].columns, vec!["identifier"]);
        model.validate().unwrap();
    }

    #[test]
    fn test_relation_rename_reaches_inverse_side() {
        let policy = Renames { relations: HashMap::from([("customer_id", "customer")]), ..Default::default() };
        let mut model = shop();
        GraphRenamer::new(&policy).rename(&mut model).unwrap();

        let customer = model.entity("customer").unwrap();
        let inverse = &customer.columns[1].relations[0];
        assert_eq!(inverse.owner_column, "customer");
        assert_eq!(inverse.related_column, "customer");
        let order = model.entity("order").unwrap();
        assert_eq!(order.columns[1].name, "customer");
        assert_eq!(order.indexes[0].columns, vec!["customer"]);
        model.validate().unwrap();
    }

    #[test]
    fn test_entity_rename_reaches_both_ends() {
        let policy = Renames { entities: HashMap::from([("order", "purchase")]), ..Default::default() };
        let mut model = shop();
        GraphRenamer::new(&policy).rename(&mut model).unwrap();

        let owning = &model.entity("purchase").unwrap().columns[1].relations[0];
        assert_eq!(owning.owner_table, "purchase");
        let inverse = &model.entity("customer").unwrap().columns[1].relations[0];
        assert_eq!(inverse.owner_table, "purchase");
        assert_eq!(inverse.related_table, "purchase");
        model.validate().unwrap();
    }

    #[test]
    fn test_columns_renamed_after_entities() {
        let policy = Renames {
            entities: HashMap::from([("customer", "client")]),
            columns: HashMap::from([("id", "key"), ("customer_id", "clientKey")]),
            ..Default::default()
        };
        let mut model = shop();
        GraphRenamer::new(&policy).rename(&mut model).unwrap();

        let owning = &model.entity("order").unwrap().columns[1].relations[0];
        assert_eq!(owning.related_table, "client");
        assert_eq!(owning.related_column, "key");
        let inverse = &model.entity("client").unwrap().columns[1].relations[0];
        assert_eq!(inverse.related_column, "clientKey");
        model.validate().unwrap();
    }

    #[test]
    fn test_convention_policy_keeps_model_consistent() {
        let mut model = shop();
        GraphRenamer::new(&ConventionPolicy::default()).rename(&mut model).unwrap();

        let names: Vec<&str> = model.entities.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Customer", "Order"]);
        let order = model.entity("Order").unwrap();
        assert_eq!(order.columns[1].name, "customer");
        assert_eq!(order.columns[1].sql_name, "customer_id");
        assert_eq!(order.columns[1].relations[0].related_table, "Customer");
        model.validate().unwrap();
    }

    #[test]
    fn test_entity_collision_is_rejected() {
        let policy = Renames { entities: HashMap::from([("order", "customer")]), ..Default::default() };
        let mut model = shop();
        let err = GraphRenamer::new(&policy).rename(&mut model).unwrap_err();

        assert!(matches!(err, Error::NameCollision { ref to, .. } if to == "customer"));
        model.validate().unwrap();
    }

    #[test]
    fn test_column_collision_is_rejected() {
        let policy = Renames { columns: HashMap::from([("customer_id", "id")]), ..Default::default() };
        let mut model = shop();
        let err = GraphRenamer::new(&policy).rename(&mut model).unwrap_err();

        assert!(matches!(err, Error::NameCollision { ref scope, .. } if scope.contains("order")));
    }

    #[test]
    fn test_unknown_table_is_reported() {
        let mut model = shop();
        model.entities[1].columns[1].relations[0].related_table = "client".to_string();

        let err = GraphRenamer::new(&IdentityPolicy).rename(&mut model).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
    }
}

//! Naming policies
//!
//! A [`NamingPolicy`] turns raw database identifiers into the identifiers of
//! the generated artifacts. Policies are resolved by name from a
//! [`PolicyRegistry`] once, when the shaper is built.

use std::collections::HashMap;
use std::fmt;

use crate::config::NamingConfig;
use crate::error::{Error, Result};
use crate::schema::types::{Relation, SchemaModel};
use crate::utils::naming::{apply_naming_convention, generate_unique_name, strip_id_suffix, CaseStyle};

/// Naming rules for entities, columns and relations.
///
/// Implementations must be pure: the same input within one run yields the
/// same output.
pub trait NamingPolicy: Send + Sync {
    fn entity_name(&self, current: &str) -> String;

    fn column_name(&self, current: &str) -> String;

    /// Name of the property carrying `relation`, given the current name of
    /// the column the relation is attached to
    fn relation_name(&self, column_name: &str, relation: &Relation, model: &SchemaModel) -> String;
}

/// Keeps every name as introspected
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPolicy;

impl NamingPolicy for IdentityPolicy {
    fn entity_name(&self, current: &str) -> String {
        current.to_string()
    }

    fn column_name(&self, current: &str) -> String {
        current.to_string()
    }

    fn relation_name(&self, column_name: &str, _relation: &Relation, _model: &SchemaModel) -> String {
        column_name.to_string()
    }
}

/// Recases entities and columns, and names the owning side of a relation
/// after the foreign key with its id suffix dropped (`customer_id` becomes
/// `customer`).
#[derive(Debug, Clone, Copy)]
pub struct ConventionPolicy {
    pub entity_style: CaseStyle,
    pub column_style: CaseStyle,
}

impl ConventionPolicy {
    pub fn new(entity_style: CaseStyle, column_style: CaseStyle) -> Self {
        Self { entity_style, column_style }
    }
}

impl Default for ConventionPolicy {
    fn default() -> Self {
        Self::new(CaseStyle::Pascal, CaseStyle::Camel)
    }
}

impl NamingPolicy for ConventionPolicy {
    fn entity_name(&self, current: &str) -> String {
        apply_naming_convention(current, self.entity_style)
    }

    fn column_name(&self, current: &str) -> String {
        apply_naming_convention(current, self.column_style)
    }

    fn relation_name(&self, column_name: &str, relation: &Relation, model: &SchemaModel) -> String {
        if !relation.is_owner {
            return column_name.to_string();
        }
        let Some(base) = strip_id_suffix(column_name) else {
            return column_name.to_string();
        };

        let siblings: Vec<String> = model
            .entity(&relation.owner_table)
            .map(|owner| {
                owner
                    .columns
                    .iter()
                    .filter(|column| column.name != column_name)
                    .map(|column| column.name.clone())
                    .collect()
            })
            .unwrap_or_default();

        generate_unique_name(&base, &siblings)
    }
}

/// Builds a policy from the naming configuration
pub type PolicyFactory = Box<dyn Fn(&NamingConfig) -> Result<Box<dyn NamingPolicy>> + Send + Sync>;

/// Named naming policies: the built-in `identity` and `convention`, plus any
/// custom ones registered by the embedding application.
pub struct PolicyRegistry {
    factories: HashMap<String, PolicyFactory>,
}

pub const IDENTITY_POLICY: &str = "identity";
pub const CONVENTION_POLICY: &str = "convention";

impl PolicyRegistry {
    /// Create a registry holding the built-in policies
    pub fn new() -> Self {
        let mut registry = Self { factories: HashMap::new() };
        registry.register(IDENTITY_POLICY, |_| Ok(Box::new(IdentityPolicy)));
        registry.register(CONVENTION_POLICY, |config| {
            Ok(Box::new(ConventionPolicy::new(config.entity_style, config.column_style)))
        });
        registry
    }

    /// Register (or replace) a policy under `name`
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&NamingConfig) -> Result<Box<dyn NamingPolicy>> + Send + Sync + 'static,
    {
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    /// Registered policy names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve the configured policy. An empty name selects `identity`.
    pub fn resolve(&self, config: &NamingConfig) -> Result<Box<dyn NamingPolicy>> {
        let name = match config.policy.trim() {
            "" => IDENTITY_POLICY,
            name => name,
        };

        let factory = self.factories.get(name).ok_or_else(|| {
            Error::ConfigError(format!(
                "Unknown naming policy '{}' (available: {})",
                name,
                self.names().join(", ")
            ))
        })?;

        let policy = factory(config).map_err(|e| {
            Error::ConfigError(format!("Failed to construct naming policy '{}': {}", name, e))
        })?;
        tracing::info!(policy = name, "Resolved naming policy");
        Ok(policy)
    }
}

impl Default for PolicyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PolicyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyRegistry").field("policies", &self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{Column, Entity, Multiplicity};

    fn naming(policy: &str) -> NamingConfig {
        NamingConfig { policy: policy.to_string(), ..NamingConfig::default() }
    }

    fn owning() -> Relation {
        Relation::new(("order", "orders"), ("customer", "id"), true, Multiplicity::ManyToOne)
    }

    fn order_model(columns: &[&str]) -> SchemaModel {
        let mut order = Entity::new("order");
        for name in columns {
            order.add_column(Column::new(name, "number", "int"));
        }
        SchemaModel::new().with_entity(order).with_entity(Entity::new("customer"))
    }

    #[test]
    fn test_identity_policy() {
        let model = order_model(&["customer_id"]);
        let policy = IdentityPolicy;

        assert_eq!(policy.entity_name("order_line"), "order_line");
        assert_eq!(policy.column_name("customer_id"), "customer_id");
        assert_eq!(policy.relation_name("customer_id", &owning(), &model), "customer_id");
    }

    #[test]
    fn test_convention_relation_name() {
        let policy = ConventionPolicy::default();
        let model = order_model(&["id", "customer_id"]);

        assert_eq!(policy.relation_name("customer_id", &owning(), &model), "customer");
        assert_eq!(policy.relation_name("buyer", &owning(), &model), "buyer");

        let mut inverse = owning();
        inverse.is_owner = false;
        assert_eq!(policy.relation_name("order_id", &inverse, &model), "order_id");
    }

    #[test]
    fn test_convention_relation_name_avoids_siblings() {
        let policy = ConventionPolicy::default();
        let model = order_model(&["customer", "customer_id"]);

        assert_eq!(policy.relation_name("customer_id", &owning(), &model), "customer_1");
    }

    #[test]
    fn test_convention_casing() {
        let policy = ConventionPolicy::new(CaseStyle::Pascal, CaseStyle::Snake);

        assert_eq!(policy.entity_name("order_line"), "OrderLine");
        assert_eq!(policy.column_name("createdAt"), "created_at");
    }

    #[test]
    fn test_registry_resolves_builtins() {
        let registry = PolicyRegistry::new();

        assert_eq!(registry.names(), vec!["convention", "identity"]);
        let policy = registry.resolve(&naming("")).unwrap();
        assert_eq!(policy.entity_name("order_line"), "order_line");
        let policy = registry.resolve(&naming("convention")).unwrap();
        assert_eq!(policy.entity_name("order_line"), "OrderLine");
    }

    #[test]
    fn test_registry_custom_policy() {
        struct Upper;

        impl NamingPolicy for Upper {
            fn entity_name(&self, current: &str) -> String {
                current.to_uppercase()
            }
            fn column_name(&self, current: &str) -> String {
                current.to_uppercase()
            }
            fn relation_name(&self, column_name: &str, _: &Relation, _: &SchemaModel) -> String {
                column_name.to_string()
            }
        }

        let mut registry = PolicyRegistry::new();
        registry.register("upper", |_| Ok(Box::new(Upper)));

        let policy = registry.resolve(&naming("upper")).unwrap();
        assert_eq!(policy.column_name("id"), "ID");
    }

    #[test]
    fn test_registry_unknown_policy_is_config_error() {
        let Err(err) = PolicyRegistry::new().resolve(&naming("./my_policy.js")) else {
            panic!("expected a config error");
        };
        assert!(matches!(err, Error::ConfigError(msg) if msg.contains("./my_policy.js")));
    }

    #[test]
    fn test_registry_failing_factory_is_config_error() {
        let mut registry = PolicyRegistry::new();
        registry.register("broken", |_| Err(Error::Unknown("missing dictionary".to_string())));

        let Err(err) = registry.resolve(&naming("broken")) else {
            panic!("expected a config error");
        };
        assert!(matches!(err, Error::ConfigError(msg) if msg.contains("missing dictionary")));
    }
}

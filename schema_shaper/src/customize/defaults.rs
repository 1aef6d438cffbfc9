//! Default type attributes per database engine
//!
//! Introspection reports the length/precision/scale/width of every column,
//! including the ones equal to the type's implicit default. Stripping those
//! keeps the generated output quiet.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::schema::types::SchemaModel;

/// Implicit attributes of a storage type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeDefaults {
    pub length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub width: Option<u32>,
}

impl TypeDefaults {
    pub const fn length(length: u32) -> Self {
        Self { length: Some(length), precision: None, scale: None, width: None }
    }

    pub const fn precision(precision: u32) -> Self {
        Self { length: None, precision: Some(precision), scale: None, width: None }
    }

    pub const fn decimal(precision: u32, scale: u32) -> Self {
        Self { length: None, precision: Some(precision), scale: Some(scale), width: None }
    }

    pub const fn width(width: u32) -> Self {
        Self { length: None, precision: None, scale: None, width: Some(width) }
    }
}

/// Storage type name -> implicit attributes
pub type DataTypeDefaults = HashMap<String, TypeDefaults>;

/// Database engines with a known default table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseEngine {
    Postgres,
    Mysql,
    Mariadb,
    Mssql,
    Oracle,
    Sqlite,
}

fn table(entries: &[(&str, TypeDefaults)]) -> DataTypeDefaults {
    entries
        .iter()
        .map(|(name, defaults)| (name.to_string(), *defaults))
        .collect()
}

static MYSQL_DEFAULTS: Lazy<DataTypeDefaults> = Lazy::new(|| {
    table(&[
        ("varchar", TypeDefaults::length(255)),
        ("char", TypeDefaults::length(1)),
        ("binary", TypeDefaults::length(1)),
        ("varbinary", TypeDefaults::length(255)),
        ("decimal", TypeDefaults::decimal(10, 0)),
        ("float", TypeDefaults::precision(12)),
        ("double", TypeDefaults::precision(22)),
        ("int", TypeDefaults::width(11)),
        ("tinyint", TypeDefaults::width(4)),
        ("smallint", TypeDefaults::width(6)),
        ("mediumint", TypeDefaults::width(9)),
        ("bigint", TypeDefaults::width(20)),
    ])
});

static POSTGRES_DEFAULTS: Lazy<DataTypeDefaults> = Lazy::new(|| {
    table(&[
        ("character", TypeDefaults::length(1)),
        ("bit", TypeDefaults::length(1)),
        ("interval", TypeDefaults::precision(6)),
        ("time without time zone", TypeDefaults::precision(6)),
        ("time with time zone", TypeDefaults::precision(6)),
        ("timestamp without time zone", TypeDefaults::precision(6)),
        ("timestamp with time zone", TypeDefaults::precision(6)),
    ])
});

static MSSQL_DEFAULTS: Lazy<DataTypeDefaults> = Lazy::new(|| {
    table(&[
        ("char", TypeDefaults::length(1)),
        ("nchar", TypeDefaults::length(1)),
        ("varchar", TypeDefaults::length(255)),
        ("nvarchar", TypeDefaults::length(255)),
        ("binary", TypeDefaults::length(1)),
        ("varbinary", TypeDefaults::length(1)),
        ("decimal", TypeDefaults::decimal(18, 0)),
        ("dec", TypeDefaults::decimal(18, 0)),
        ("numeric", TypeDefaults::decimal(18, 0)),
        ("float", TypeDefaults::precision(53)),
        ("time", TypeDefaults::precision(7)),
        ("datetime2", TypeDefaults::precision(7)),
        ("datetimeoffset", TypeDefaults::precision(7)),
    ])
});

static ORACLE_DEFAULTS: Lazy<DataTypeDefaults> = Lazy::new(|| {
    table(&[
        ("char", TypeDefaults::length(1)),
        ("nchar", TypeDefaults::length(1)),
        ("varchar", TypeDefaults::length(255)),
        ("varchar2", TypeDefaults::length(255)),
        ("nvarchar2", TypeDefaults::length(255)),
        ("raw", TypeDefaults::length(2000)),
        ("float", TypeDefaults::precision(126)),
        ("timestamp", TypeDefaults::precision(6)),
        ("timestamp with time zone", TypeDefaults::precision(6)),
        ("timestamp with local time zone", TypeDefaults::precision(6)),
    ])
});

impl DatabaseEngine {
    /// Built-in default table of the engine, if it has one
    pub fn default_values(&self) -> Option<&'static DataTypeDefaults> {
        match self {
            DatabaseEngine::Mysql | DatabaseEngine::Mariadb => Some(&*MYSQL_DEFAULTS),
            DatabaseEngine::Postgres => Some(&*POSTGRES_DEFAULTS),
            DatabaseEngine::Mssql => Some(&*MSSQL_DEFAULTS),
            DatabaseEngine::Oracle => Some(&*ORACLE_DEFAULTS),
            DatabaseEngine::Sqlite => None,
        }
    }
}

/// Build the effective default table: the engine's built-in table with the
/// configured overrides layered on top.
pub fn effective_defaults(
    engine: Option<DatabaseEngine>,
    overrides: Option<&HashMap<String, TypeDefaults>>,
) -> Option<DataTypeDefaults> {
    let base = engine.and_then(|engine| engine.default_values());

    match (base, overrides) {
        (None, None) => None,
        (base, overrides) => {
            let mut merged = base.cloned().unwrap_or_default();
            if let Some(overrides) = overrides {
                merged.extend(overrides.iter().map(|(k, v)| (k.clone(), *v)));
            }
            Some(merged)
        }
    }
}

fn clear_if_default(value: &mut Option<u32>, default: Option<u32>) -> bool {
    if value.is_some() && *value == default {
        *value = None;
        return true;
    }
    false
}

/// Clear column attributes that equal the implicit default of their storage
/// type. Does nothing without a default table.
pub fn strip_default_attributes(model: &mut SchemaModel, defaults: Option<&DataTypeDefaults>) {
    let Some(defaults) = defaults else {
        tracing::debug!("No type default table for this engine, keeping column attributes");
        return;
    };

    let mut cleared = 0usize;
    for entity in &mut model.entities {
        for column in &mut entity.columns {
            let Some(default) = defaults.get(&column.storage_type) else {
                continue;
            };
            for (value, implicit) in [
                (&mut column.length, default.length),
                (&mut column.precision, default.precision),
                (&mut column.scale, default.scale),
                (&mut column.width, default.width),
            ] {
                if clear_if_default(value, implicit) {
                    cleared += 1;
                }
            }
        }
    }

    tracing::info!(cleared, "Stripped default column attributes");
}

//! SchemaShaper: customizes introspected database schemas for code generation
//!
//! SchemaShaper takes the raw schema model produced by a database
//! introspection driver, renames it consistently according to a naming
//! policy, strips redundant type attributes, and annotates every column with
//! the type category and reference target a template renderer needs.

pub mod annotate;
pub mod config;
pub mod customize;
pub mod error;
pub mod render;
pub mod schema;
pub mod utils;

// Re-export main types for easier access
pub use annotate::{classify, resolve_reference, ReferenceTarget, TypeCategory};
pub use config::Config;
pub use customize::{customize_model, NamingPolicy, PolicyRegistry};
pub use error::{Error, Result};
pub use render::RenderContext;
pub use schema::types::SchemaModel;

use customize::defaults::{effective_defaults, DataTypeDefaults};

/// Initialize SchemaShaper with the specified configuration file
pub fn init(config_path: &str) -> Result<SchemaShaper> {
    let config = config::load_from_file(config_path)?;
    SchemaShaper::new(config)
}

/// The main entry point: configuration plus the naming policy and default
/// table resolved from it
pub struct SchemaShaper {
    config: Config,
    policy: Box<dyn NamingPolicy>,
    defaults: Option<DataTypeDefaults>,
}

impl SchemaShaper {
    /// Create a shaper with the built-in naming policies only
    pub fn new(config: Config) -> Result<Self> {
        Self::with_registry(config, &PolicyRegistry::new())
    }

    /// Create a shaper resolving the naming policy from `registry`
    pub fn with_registry(config: Config, registry: &PolicyRegistry) -> Result<Self> {
        let policy = registry.resolve(&config.naming)?;
        let defaults = effective_defaults(config.engine.database_type, config.type_defaults.as_ref());

        Ok(Self {
            config,
            policy,
            defaults,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the customization pipeline over a snapshot.
    ///
    /// `Ok(None)` means the snapshot was empty and nothing should be rendered.
    pub fn customize(&self, model: SchemaModel) -> Result<Option<SchemaModel>> {
        customize_model(
            model,
            self.policy.as_ref(),
            &self.config.generation,
            self.defaults.as_ref(),
        )
    }

    /// Helper context for the renderer
    pub fn render_context(&self) -> RenderContext {
        RenderContext::new(&self.config.generation)
    }
}

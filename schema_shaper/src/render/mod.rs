//! Rendering support
//!
//! Templates are rendered by an external collaborator; this module only
//! provides the explicit helper context it receives.

pub mod context;

pub use context::RenderContext;

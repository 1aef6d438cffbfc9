//! Utilities for SchemaShaper
//!
//! This module provides utility functions used across the library.

pub mod naming;
pub mod logging;

// Re-export key utility functions
pub use naming::{apply_naming_convention, generate_unique_name, strip_id_suffix, CaseStyle};

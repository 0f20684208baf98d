//! Subcommand implementations.

pub mod init;
pub mod questions;
pub mod score;
pub mod show;
pub mod take;
pub mod validate;

use std::path::Path;

use anyhow::Result;

use careerfit_core::catalog::{self, Catalog};

/// Load a catalog file, or the built-in catalog when no path is given.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(p) => catalog::parse_catalog(p),
        None => Ok(Catalog::builtin()),
    }
}

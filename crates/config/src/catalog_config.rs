//! Catalog file configuration section

use crate::error::ValidationError;
use crate::validation::{check_file_path, ConfigSection};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the book catalog lives
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog file path; relative paths resolve against the working directory
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("library.json"),
        }
    }
}

impl ConfigSection for CatalogConfig {
    const NAME: &'static str = "catalog";

    fn check(&self, problems: &mut Vec<ValidationError>) {
        check_file_path(Self::NAME, "path", &self.path, problems);
    }
}

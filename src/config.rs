// Library Catalog - single-user library catalog manager
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Catalog configuration
//!
//! ```toml
//! database_path = "library.db"
//! audit_log_path = "transaction_log.txt"
//! return_policy = "lenient"   # or "strict"
//! ```
//!
//! Every key is optional; missing keys fall back to the defaults above.

use crate::error::{CatalogError, Result};
use crate::loans::ReturnPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE_PATH: &str = "library.db";
pub const DEFAULT_AUDIT_LOG_PATH: &str = "transaction_log.txt";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub database_path: PathBuf,
    pub audit_log_path: PathBuf,
    pub return_policy: ReturnPolicy,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            audit_log_path: PathBuf::from(DEFAULT_AUDIT_LOG_PATH),
            return_policy: ReturnPolicy::default(),
        }
    }
}

impl CatalogConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CatalogError::ConfigurationError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Config with both files placed under one directory
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            database_path: dir.join(DEFAULT_DATABASE_PATH),
            audit_log_path: dir.join(DEFAULT_AUDIT_LOG_PATH),
            return_policy: ReturnPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.database_path, PathBuf::from("library.db"));
        assert_eq!(config.audit_log_path, PathBuf::from("transaction_log.txt"));
        assert_eq!(config.return_policy, ReturnPolicy::Lenient);
    }

    #[test]
    fn test_partial_toml() {
        let config = CatalogConfig::from_toml_str(
            r#"
            database_path = "/var/lib/catalog/books.db"
            return_policy = "strict"
            "#,
        )
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/var/lib/catalog/books.db"));
        assert_eq!(config.audit_log_path, PathBuf::from("transaction_log.txt"));
        assert_eq!(config.return_policy, ReturnPolicy::Strict);
    }

    #[test]
    fn test_bad_policy_is_rejected() {
        let result = CatalogConfig::from_toml_str(r#"return_policy = "whatever""#);
        assert!(matches!(result, Err(CatalogError::TomlError(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = CatalogConfig::from_toml_file(dir.path().join("nope.toml"));
        assert!(matches!(result, Err(CatalogError::ConfigurationError(_))));
    }
}

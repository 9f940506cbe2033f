//! Server configuration loaded from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use tablecheck_core::{SeverityTable, TablecheckError};

/// Environment variable naming an optional severity table JSON file.
pub(crate) const SEVERITY_TABLE_ENV: &str = "TABLECHECK_SEVERITY_TABLE";

/// Listen address, CORS origins, and classification source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Allowed CORS origins.
    pub ui_origins: Vec<String>,
    /// Severity table file; the built-in table is used when unset.
    pub severity_table_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Build config from process environment variables.
    #[cfg_attr(test, allow(dead_code))]
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let host = lookup("TABLECHECK_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port_raw = lookup("TABLECHECK_PORT").unwrap_or_else(|| "8080".to_string());
        let port = u16::from_str(port_raw.trim())
            .map_err(|_| format!("TABLECHECK_PORT must be a u16 number, got {port_raw:?}"))?;
        let origins = lookup("TABLECHECK_UI_ORIGINS")
            .unwrap_or_else(|| "http://127.0.0.1:4200,http://localhost:4200".to_string());
        let ui_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();
        let severity_table_path = lookup(SEVERITY_TABLE_ENV)
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            ui_origins,
            severity_table_path,
        })
    }

    /// Load the configured severity table, or the built-in one.
    pub fn load_severity_table(&self) -> Result<SeverityTable, TablecheckError> {
        match &self.severity_table_path {
            Some(path) => {
                log::info!("loading severity table from {}", path.display());
                SeverityTable::from_path(path)
            }
            None => Ok(SeverityTable::baltimore()),
        }
    }
}

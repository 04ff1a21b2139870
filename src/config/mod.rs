//! The edgecore agent configuration, as far as diagnostics need it.
//!
//! The agent keeps a YAML config at a well-known path. Only the database
//! location and the EdgeHub websocket settings matter here; everything else
//! in the file is ignored by the permissive serde shapes below.

use crate::error::{DiagError, Result};
use serde::Deserialize;
use std::path::Path;

/// Well-known path of the agent configuration file.
pub const EDGECORE_CONFIG_PATH: &str = "/etc/kubeedge/config/edgecore.yaml";

/// Built-in default location of the agent's metadata database.
pub const EDGECORE_DB_PATH: &str = "/var/lib/kubeedge/edgecore.db";

/// Binary name of the agent process.
pub const EDGECORE_BINARY: &str = "edgecore";

/// Parsed agent configuration (the subset diagnostics consume).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EdgecoreConfig {
    pub database: Database,
    pub modules: Modules,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Database {
    pub driver_name: String,
    pub alias_name: String,
    pub data_source: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Modules {
    pub edge_hub: EdgeHub,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EdgeHub {
    pub enable: bool,
    pub websocket: WebSocket,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebSocket {
    pub enable: bool,
    pub server: String,
}

impl EdgecoreConfig {
    /// The data source declared in the config, or the built-in default when
    /// the field is empty.
    pub fn data_source(&self) -> &str {
        if self.database.data_source.is_empty() {
            EDGECORE_DB_PATH
        } else {
            &self.database.data_source
        }
    }
}

/// Load and parse the agent configuration from `path`.
pub fn load(path: &Path) -> Result<EdgecoreConfig> {
    let content = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|e| DiagError::ConfigParse(e.to_string()))
}

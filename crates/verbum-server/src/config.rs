use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use verbum_types::{SupportedVersions, VersionId};

use crate::error::{ServerError, ServerResult};

/// Server settings. Every key is optional in a config file.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding `<code>.json` version files.
    pub data_dir: PathBuf,
    /// Version used when a request does not name one.
    pub default_version: VersionId,
    pub supported_versions: SupportedVersions,
    /// Send permissive CORS headers on every response.
    pub allow_any_origin: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            data_dir: PathBuf::from("versoes"),
            default_version: VersionId::default(),
            supported_versions: SupportedVersions::default(),
            allow_any_origin: true,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> ServerResult<()> {
        if self.supported_versions.is_empty() {
            return Err(ServerError::Config("supported_versions must not be empty".into()));
        }
        if !self.supported_versions.contains(&self.default_version) {
            return Err(ServerError::Config(format!(
                "default_version {} is not in supported_versions",
                self.default_version
            )));
        }
        Ok(())
    }
}

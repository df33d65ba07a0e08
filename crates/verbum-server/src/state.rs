use std::sync::Arc;

use verbum_query::{QueryResult, Verbum};
use verbum_types::{SupportedVersions, VersionId};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    service: Arc<Verbum>,
    supported: Arc<SupportedVersions>,
    default_version: VersionId,
}

impl AppState {
    pub fn new(service: Arc<Verbum>, config: &ServerConfig) -> Self {
        Self {
            service,
            supported: Arc::new(config.supported_versions.clone()),
            default_version: config.default_version.clone(),
        }
    }

    pub fn service(&self) -> &Verbum {
        &self.service
    }

    /// Validate a requested version code, falling back to the default.
    ///
    /// Runs before any store access so an unsupported code never reaches the
    /// cache.
    pub fn resolve_version(&self, requested: Option<&str>) -> ServerResult<VersionId> {
        match requested {
            None => Ok(self.default_version.clone()),
            Some(raw) => Ok(self.supported.resolve(raw)?),
        }
    }

    /// Run a query on the blocking pool; first access to a version reads
    /// its file from disk.
    pub async fn run<T, F>(&self, query: F) -> ServerResult<T>
    where
        F: FnOnce(&Verbum) -> QueryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let service = Arc::clone(&self.service);
        let result = tokio::task::spawn_blocking(move || query(&service))
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        Ok(result?)
    }
}

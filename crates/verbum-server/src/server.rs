use std::sync::Arc;

use tokio::net::TcpListener;
use verbum_query::Verbum;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Verbum HTTP server.
pub struct VerbumServer {
    config: ServerConfig,
    service: Arc<Verbum>,
}

impl VerbumServer {
    /// Serve versions from `config.data_dir`.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let service = Arc::new(Verbum::open(config.data_dir.clone()));
        Self::with_service(config, service)
    }

    pub fn with_service(config: ServerConfig, service: Arc<Verbum>) -> ServerResult<Self> {
        config.validate()?;
        Ok(Self { config, service })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn service(&self) -> &Arc<Verbum> {
        &self.service
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        let state = AppState::new(Arc::clone(&self.service), &self.config);
        build_router(state, self.config.allow_any_origin)
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            data_dir = %self.config.data_dir.display(),
            default_version = %self.config.default_version,
            "Verbum server listening on {}",
            self.config.bind_addr
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use verbum_types::VersionId;

    #[test]
    fn server_construction() {
        let server = VerbumServer::new(ServerConfig::default()).unwrap();
        assert_eq!(
            server.config().bind_addr,
            "127.0.0.1:5000".parse::<SocketAddr>().unwrap()
        );
        assert!(server.service().cache().is_empty());
    }

    #[test]
    fn invalid_config_rejected() {
        let config = ServerConfig {
            default_version: VersionId::new("XYZ").unwrap(),
            ..Default::default()
        };
        assert!(VerbumServer::new(config).is_err());
    }

    #[test]
    fn router_builds() {
        let server = VerbumServer::new(ServerConfig::default()).unwrap();
        let _router = server.router();
    }
}

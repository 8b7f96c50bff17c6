use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;

use crate::{OAuthClient, OAuthError, OAuthProvider, RefreshTokenSlot};

use super::config::ServerConfig;
use super::http::{AppState, fallback_handler, index_handler};

/// The single-route front controller: login link, code callback and refresh path on `/`.
pub struct LoginServer<P: OAuthProvider> {
    config: ServerConfig,
    client: Arc<OAuthClient<P>>,
    slot: RefreshTokenSlot,
}

impl<P: OAuthProvider + 'static> LoginServer<P> {
    pub fn new(client: OAuthClient<P>, config: ServerConfig) -> Self {
        Self {
            config,
            client: Arc::new(client),
            slot: RefreshTokenSlot::new(),
        }
    }

    /// Shares an existing slot, e.g. one seeded with a refresh token at startup.
    pub fn with_refresh_token_slot(mut self, slot: RefreshTokenSlot) -> Self {
        self.slot = slot;
        self
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn refresh_token_slot(&self) -> &RefreshTokenSlot {
        &self.slot
    }

    pub fn router(&self) -> Router {
        let state = AppState {
            client: Arc::clone(&self.client),
            slot: self.slot.clone(),
            remember_refresh_token: self.config.remember_refresh_token,
        };

        Router::new()
            .route("/", get(index_handler::<P>))
            .fallback(fallback_handler)
            .with_state(state)
    }

    pub async fn bind(&self) -> Result<TcpListener, OAuthError> {
        let host = self
            .config
            .host
            .trim_start_matches('[')
            .trim_end_matches(']');
        TcpListener::bind((host, self.config.port))
            .await
            .map_err(OAuthError::from)
    }

    pub async fn serve_with_shutdown<F>(
        &self,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<(), OAuthError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let address: SocketAddr = listener.local_addr()?;
        tracing::info!(%address, redirect_uri = %self.config.redirect_uri(), "listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("server stopped");
        Ok(())
    }

    /// Binds the configured address and serves until Ctrl-C.
    pub async fn run(&self) -> Result<(), OAuthError> {
        let listener = self.bind().await?;
        self.serve_with_shutdown(listener, async {
            if let Err(error) = tokio::signal::ctrl_c().await {
                tracing::error!(%error, "failed to listen for ctrl-c");
            }
        })
        .await
    }
}

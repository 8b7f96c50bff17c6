//! OAuth 2.0 authorization-code and refresh-token flows for a confidential client.
//!
//! The client posts to the provider's token endpoint with HTTP Basic credentials.
//! With the `server` feature a single-route local server drives the browser
//! login, exchanges the callback code and can reuse a held refresh token.

mod client;
mod credentials;
mod error;
mod providers;
#[cfg(feature = "server")]
mod server;
mod store;
mod types;
mod validator;

pub use client::{OAuthClient, OAuthClientConfig};
pub use credentials::ClientCredentials;
pub use error::OAuthError;
pub use providers::{EagleEyeProvider, OAuthProvider};
#[cfg(feature = "server")]
pub use server::{DEFAULT_HOST, DEFAULT_PORT, LoginServer, ServerConfig};
pub use store::RefreshTokenSlot;
pub use types::TokenResponse;
pub use validator::is_valid;

use std::time::Duration;

use reqwest::Client;
use serde_json::{Map, Value};
use url::Url;

use crate::{ClientCredentials, OAuthError, OAuthProvider};

#[derive(Debug, Clone)]
pub struct OAuthClientConfig {
    pub credentials: ClientCredentials,
    pub redirect_uri: String,
    pub scope: Option<String>,
    pub timeout: Option<Duration>,
}

impl OAuthClientConfig {
    pub fn new(credentials: ClientCredentials, redirect_uri: impl Into<String>) -> Self {
        Self {
            credentials,
            redirect_uri: redirect_uri.into(),
            scope: None,
            timeout: None,
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Talks to the provider's token endpoint on behalf of a confidential client.
#[derive(Debug, Clone)]
pub struct OAuthClient<P: OAuthProvider> {
    provider: P,
    config: OAuthClientConfig,
    http: Client,
}

impl<P: OAuthProvider> OAuthClient<P> {
    pub fn new(provider: P, config: OAuthClientConfig) -> Result<Self, OAuthError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self {
            provider,
            config,
            http,
        })
    }

    pub fn with_http_client(provider: P, config: OAuthClientConfig, http: Client) -> Self {
        Self {
            provider,
            config,
            http,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &OAuthClientConfig {
        &self.config
    }

    fn scope(&self) -> &str {
        self.config
            .scope
            .as_deref()
            .unwrap_or(self.provider.default_scope())
    }

    /// Login link the browser follows to the provider's authorization endpoint.
    pub fn authorization_url(&self) -> Result<String, OAuthError> {
        let mut url = Url::parse(self.provider.authorize_url())?;
        url.query_pairs_mut()
            .append_pair("client_id", self.config.credentials.client_id())
            .append_pair("response_type", "code")
            .append_pair("scope", self.scope())
            .append_pair("redirect_uri", &self.config.redirect_uri);
        Ok(url.to_string())
    }

    /// Trades an authorization code for tokens and returns the response as JSON text.
    pub async fn exchange_code(&self, code: &str) -> Result<String, OAuthError> {
        let payload = [
            ("grant_type", "authorization_code"),
            ("scope", self.scope()),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];
        self.send_token_request(&payload).await
    }

    /// Trades a refresh token for a new access token and returns the response as JSON text.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<String, OAuthError> {
        let payload = [
            ("grant_type", "refresh_token"),
            ("scope", self.scope()),
            ("refresh_token", refresh_token),
        ];
        self.send_token_request(&payload).await
    }

    async fn send_token_request(&self, payload: &[(&str, &str)]) -> Result<String, OAuthError> {
        tracing::debug!(
            provider = self.provider.id(),
            url = self.provider.token_url(),
            params = ?payload.iter().map(|(key, _)| *key).collect::<Vec<_>>(),
            "sending token request"
        );

        let credentials = &self.config.credentials;
        let response = self
            .http
            .post(self.provider.token_url())
            .basic_auth(credentials.client_id(), Some(credentials.client_secret()))
            .form(payload)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "token endpoint returned non-success status");
        }

        Ok(reserialize(&body))
    }
}

/// Round-trips the body through a generic JSON object.
///
/// Anything that is not a JSON object collapses to `{}`, which later fails validation.
fn reserialize(body: &str) -> String {
    let object = match serde_json::from_str::<Map<String, Value>>(body) {
        Ok(object) => object,
        Err(err) => {
            tracing::warn!(error = %err, body, "token endpoint returned a non-object body");
            Map::new()
        }
    };
    Value::Object(object).to_string()
}

use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{OAuthClient, OAuthProvider, RefreshTokenSlot, TokenResponse, validator};

use super::config::{LOGIN_HTML, render_login_page};

pub(super) struct AppState<P: OAuthProvider> {
    pub(super) client: Arc<OAuthClient<P>>,
    pub(super) slot: RefreshTokenSlot,
    pub(super) remember_refresh_token: bool,
}

impl<P: OAuthProvider> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            slot: self.slot.clone(),
            remember_refresh_token: self.remember_refresh_token,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Grant {
    AuthorizationCode,
    RefreshToken,
}

impl Grant {
    fn as_str(self) -> &'static str {
        match self {
            Self::AuthorizationCode => "authorization_code",
            Self::RefreshToken => "refresh_token",
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            Self::AuthorizationCode => "You are logged in",
            Self::RefreshToken => "You are logged in thanks to a refresh token.",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Self::AuthorizationCode => "Code Auth failed",
            Self::RefreshToken => "Refresh token failed",
        }
    }

    fn error_message(self) -> &'static str {
        match self {
            Self::AuthorizationCode => "Error getting tokens",
            Self::RefreshToken => "Error refreshing token",
        }
    }
}

/// `GET /`: exchange a callback code, else use the held refresh token, else show the login link.
pub(super) async fn index_handler<P: OAuthProvider + 'static>(
    State(state): State<AppState<P>>,
    RawQuery(query): RawQuery,
) -> Response {
    if let Some(code) = code_param(query.as_deref()) {
        let result = state.client.exchange_code(&code).await;
        return state.respond(Grant::AuthorizationCode, result);
    }

    if let Some(refresh_token) = state.slot.get() {
        let result = state.client.refresh_token(&refresh_token).await;
        return state.respond(Grant::RefreshToken, result);
    }

    match state.client.authorization_url() {
        Ok(url) => Html(render_login_page(LOGIN_HTML, &url)).into_response(),
        Err(error) => {
            tracing::error!(%error, "failed to build authorization url");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error building login link: {error}"),
            )
                .into_response()
        }
    }
}

pub(super) async fn fallback_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

impl<P: OAuthProvider> AppState<P> {
    fn respond(&self, grant: Grant, result: Result<String, crate::OAuthError>) -> Response {
        let body = match result {
            Ok(body) => body,
            Err(error) => {
                tracing::error!(grant = grant.as_str(), %error, "token request failed");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("{}: {error}", grant.error_message()),
                )
                    .into_response();
            }
        };

        if !validator::is_valid(&body) {
            tracing::warn!(grant = grant.as_str(), response = %body, "token exchange rejected");
            return (
                StatusCode::UNAUTHORIZED,
                format!("{}. Response: {body}", grant.failure_message()),
            )
                .into_response();
        }

        let token = TokenResponse::parse(&body);
        // On production, never print the refresh token.
        tracing::info!(
            grant = grant.as_str(),
            expires_in = ?token.as_ref().and_then(|token| token.expires_in),
            tokens = %body,
            "token exchange succeeded"
        );

        if self.remember_refresh_token {
            if let Some(refresh_token) = token.as_ref().and_then(TokenResponse::refresh_token) {
                self.slot.set(refresh_token);
                tracing::debug!(grant = grant.as_str(), "stored refresh token");
            }
        }

        (StatusCode::OK, grant.success_message()).into_response()
    }
}

/// First non-empty `code` value in the query string.
fn code_param(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
        .filter(|code| !code.is_empty())
}

use url::Url;

use crate::{OAuthError, OAuthProvider};

// References:
// - https://developer.eagleeyenetworks.com/docs/client-credentials

const DEFAULT_BASE_URL: &str = "https://auth.eagleeyenetworks.com";
const AUTHORIZE_PATH: &str = "/oauth2/authorize";
const TOKEN_PATH: &str = "/oauth2/token";

/// `vms.all` grants full access to the video management system.
const DEFAULT_SCOPE: &str = "vms.all";

#[derive(Debug, Clone)]
pub struct EagleEyeProvider {
    authorize_url: String,
    token_url: String,
}

impl Default for EagleEyeProvider {
    fn default() -> Self {
        Self {
            authorize_url: format!("{DEFAULT_BASE_URL}{AUTHORIZE_PATH}"),
            token_url: format!("{DEFAULT_BASE_URL}{TOKEN_PATH}"),
        }
    }
}

impl OAuthProvider for EagleEyeProvider {
    fn id(&self) -> &str {
        "eagle-eye"
    }

    fn authorize_url(&self) -> &str {
        &self.authorize_url
    }

    fn token_url(&self) -> &str {
        &self.token_url
    }

    fn default_scope(&self) -> &str {
        DEFAULT_SCOPE
    }
}

impl EagleEyeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points both endpoints at another auth host, e.g. a staging tenant or a mock server.
    pub fn with_base_url(base_url: &str) -> Result<Self, OAuthError> {
        let url = Url::parse(base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(OAuthError::InvalidBaseUrl(format!(
                "unsupported scheme `{}`",
                url.scheme()
            )));
        }
        if url.host_str().is_none() {
            return Err(OAuthError::InvalidBaseUrl(
                "base url is missing host".to_string(),
            ));
        }

        let base = base_url.trim_end_matches('/');
        Ok(Self {
            authorize_url: format!("{base}{AUTHORIZE_PATH}"),
            token_url: format!("{base}{TOKEN_PATH}"),
        })
    }

    pub fn default_base_url() -> &'static str {
        DEFAULT_BASE_URL
    }
}

#[cfg(test)]
mod tests {
    use super::EagleEyeProvider;
    use crate::{OAuthError, OAuthProvider};

    #[test]
    fn default_endpoints_point_at_eagle_eye() {
        let provider = EagleEyeProvider::new();
        assert_eq!(
            provider.authorize_url(),
            "https://auth.eagleeyenetworks.com/oauth2/authorize"
        );
        assert_eq!(
            provider.token_url(),
            "https://auth.eagleeyenetworks.com/oauth2/token"
        );
        assert_eq!(provider.default_scope(), "vms.all");
    }

    #[test]
    fn base_url_override_trims_trailing_slash() {
        let provider = EagleEyeProvider::with_base_url("http://127.0.0.1:9999/").unwrap();
        assert_eq!(provider.token_url(), "http://127.0.0.1:9999/oauth2/token");
    }

    #[test]
    fn base_url_override_rejects_other_schemes() {
        let result = EagleEyeProvider::with_base_url("ftp://example.com");
        assert!(matches!(result, Err(OAuthError::InvalidBaseUrl(_))));
    }
}

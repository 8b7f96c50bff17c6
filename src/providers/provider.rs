/// Endpoints and defaults of an OAuth 2.0 identity provider.
pub trait OAuthProvider: Send + Sync {
    fn id(&self) -> &str;
    fn authorize_url(&self) -> &str;
    fn token_url(&self) -> &str;
    fn default_scope(&self) -> &str;
}

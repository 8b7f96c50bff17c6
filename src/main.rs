use std::time::Duration;

use clap::Parser;
use oauth_code_flow::{
    ClientCredentials, DEFAULT_HOST, DEFAULT_PORT, EagleEyeProvider, LoginServer, OAuthClient,
    OAuthClientConfig, OAuthError, RefreshTokenSlot, ServerConfig,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "oauth-code-flow",
    about = "Serve a local login page and exchange OAuth codes and refresh tokens for access tokens."
)]
struct Cli {
    /// Address to listen on; also used in the redirect uri.
    #[arg(long, env = "OAUTH_HOST", default_value = DEFAULT_HOST)]
    host: String,

    #[arg(long, env = "OAUTH_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    #[arg(long, env = "OAUTH_CLIENT_ID")]
    client_id: String,

    #[arg(long, env = "OAUTH_CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,

    /// Refresh token to use when a request carries no code.
    #[arg(long, env = "OAUTH_REFRESH_TOKEN", hide_env_values = true)]
    refresh_token: Option<String>,

    /// Keep the refresh token from each successful exchange for later requests.
    #[arg(long)]
    remember_refresh_token: bool,

    /// Override the identity provider host.
    #[arg(long, env = "OAUTH_AUTH_BASE_URL")]
    auth_base_url: Option<String>,

    /// Timeout for token endpoint requests.
    #[arg(long, env = "OAUTH_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Open the login page in the default browser.
    #[arg(long)]
    open: bool,
}

#[tokio::main]
async fn main() -> Result<(), OAuthError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let provider = match &cli.auth_base_url {
        Some(base_url) => EagleEyeProvider::with_base_url(base_url)?,
        None => EagleEyeProvider::new(),
    };

    let server_config = ServerConfig::new(cli.host.clone(), cli.port)
        .with_remember_refresh_token(cli.remember_refresh_token);

    let mut client_config = OAuthClientConfig::new(
        ClientCredentials::new(cli.client_id, cli.client_secret),
        server_config.redirect_uri(),
    );
    if let Some(secs) = cli.timeout_secs {
        client_config = client_config.with_timeout(Duration::from_secs(secs));
    }

    let client = OAuthClient::new(provider, client_config)?;

    let slot = match cli.refresh_token {
        Some(token) => RefreshTokenSlot::with_token(token),
        None => RefreshTokenSlot::new(),
    };

    let server = LoginServer::new(client, server_config).with_refresh_token_slot(slot);

    let page_url = format!("{}/", server.config().redirect_uri());
    eprintln!("Open {page_url} to log in");
    if cli.open {
        if let Err(err) = webbrowser::open(&page_url) {
            tracing::warn!(error = %err, "failed to open browser automatically");
        }
    }

    server.run().await
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid provider base url: {0}")]
    InvalidBaseUrl(String),
}

/// `{{authorization_url}}` is replaced with the escaped login link.
pub(super) const LOGIN_HTML: &str = include_str!("html/login.html");

const URL_PLACEHOLDER: &str = "{{authorization_url}}";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3333;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Store the refresh token from each successful exchange back into the slot.
    pub remember_refresh_token: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            remember_refresh_token: false,
        }
    }

    /// Callback URL registered with the provider. Must match it exactly.
    pub fn redirect_uri(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("http://[{}]:{}", self.host, self.port)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }

    pub fn with_remember_refresh_token(mut self, remember: bool) -> Self {
        self.remember_refresh_token = remember;
        self
    }
}

pub(super) fn render_login_page(template: &str, authorization_url: &str) -> String {
    template.replace(URL_PLACEHOLDER, &escape_attribute(authorization_url))
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

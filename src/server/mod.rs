mod config;
mod http;
mod server;

pub use config::{DEFAULT_HOST, DEFAULT_PORT, ServerConfig};
pub use server::LoginServer;

use std::net::{IpAddr, SocketAddr};

use clap::Parser;

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Clone, Parser)]
#[command(name = "vibespec-server", about = "Credential-holding relay for vibespec")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "VIBESPEC_BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    #[arg(long, env = "VIBESPEC_PORT", default_value = "3720")]
    pub port: u16,

    /// Provider credential attached to every forwarded request
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Chat-completion endpoint requests are forwarded to
    #[arg(long, env = "VIBESPEC_UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    /// Origins allowed to call the relay cross-origin (comma-separated).
    /// Empty means same-origin only.
    #[arg(long, env = "VIBESPEC_ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// A config for forwarding to `upstream_url` on an ephemeral local port.
    pub fn local(upstream_url: &str, api_key: Option<&str>) -> Self {
        Self {
            bind: IpAddr::from([127, 0, 0, 1]),
            port: 0,
            api_key: api_key.map(str::to_string),
            upstream_url: upstream_url.to_string(),
            allowed_origins: Vec::new(),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// The configured credential, ignoring a blank value.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

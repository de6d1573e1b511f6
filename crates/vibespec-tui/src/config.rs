use std::path::PathBuf;

use clap::Parser;
use vibespec_service::{GatewayConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};

#[derive(Debug, Parser)]
#[command(name = "vibespec", about = "Turn a project idea into a build-ready specification")]
pub struct TuiConfig {
    /// Relay endpoint that holds the provider credential. Takes precedence
    /// over --api-key.
    #[arg(long, env = "VIBESPEC_RELAY_URL")]
    pub relay_url: Option<String>,

    /// Provider credential for calling the model directly
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Chat-completion endpoint used in direct mode
    #[arg(long, env = "VIBESPEC_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, env = "VIBESPEC_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Directory generated specifications are saved to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Write logs here. The terminal is never logged to.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl TuiConfig {
    pub fn gateway_config(&self) -> GatewayConfig {
        let config = match self.relay_url.as_deref().filter(|u| !u.trim().is_empty()) {
            Some(url) => GatewayConfig::relay(url),
            None => GatewayConfig::direct(self.api_key.clone()).with_endpoint(&self.endpoint),
        };
        config.with_model(&self.model)
    }
}

//! Configuration for the policy UI server

use clap::Parser;
use policy_client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "policy-ui")]
#[command(about = "Serves the insurance policy management page")]
pub struct Config {
    /// Base URL of the policy REST collection
    #[arg(long, env = "POLICY_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Backend request timeout in seconds
    #[arg(long, env = "POLICY_API_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Address to bind the HTTP server to
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
    pub bind_addr: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Skip loading policies at startup
    #[arg(long, env = "POLICY_UI_NO_INITIAL_LOAD")]
    pub no_initial_load: bool,
}

impl Config {
    /// Parse configuration from command-line args and environment variables
    pub fn parse_config() -> Self {
        Config::parse()
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone()).with_timeout(Duration::from_secs(self.timeout_secs))
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

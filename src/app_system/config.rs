use std::net::SocketAddr;

use clap::Parser;

/// Runtime configuration. Every flag can also be set through its environment variable.
#[derive(Parser, Debug, Clone)]
#[command(name = "user_api")]
#[command(about = "Demo HTTP service with health endpoints and an in-memory user API")]
pub struct Config {
    /// Address to bind the HTTP listener to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind the HTTP listener to
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Application name reported by the health endpoints
    #[arg(long, env = "APP_NAME", default_value = "spring-boot-demo")]
    pub app_name: String,

    /// Application version reported by the health endpoints
    #[arg(long, env = "APP_VERSION", default_value = "1.0.0")]
    pub app_version: String,

    /// Bounded queue size between request handlers and the user store
    #[arg(long, env = "STORE_CHANNEL_CAPACITY", default_value_t = 100, value_parser = parse_capacity)]
    pub channel_capacity: usize,
}

impl Config {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("invalid bind address {addr}: {e}"))
    }
}

fn parse_capacity(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("capacity must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

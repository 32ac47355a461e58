use std::net::SocketAddr;

use anyhow::Context;

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// A missing `DATABASE_URL` fails startup; `BIND_ADDR` falls back to the
    /// local default.
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let bind_addr = match std::env::var("BIND_ADDR") {
            Ok(addr) => addr
                .parse()
                .context("BIND_ADDR is not a valid socket address")?,
            Err(_) => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };
        Ok(Self {
            database_url,
            bind_addr,
        })
    }
}

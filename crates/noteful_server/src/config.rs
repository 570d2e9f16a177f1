//! Server configuration.
//!
//! Every setting is a CLI flag with an environment fallback.

use clap::Parser;
use std::net::SocketAddr;

const MEMORY_DATABASE: &str = ":memory:";

/// Noteful - a REST backend for notes, folders and tags
#[derive(Debug, Clone, Parser)]
#[command(name = "noteful", version, about, long_about = None)]
pub struct Config {
    /// Interface to bind
    #[arg(long, env = "NOTEFUL_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// TCP port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// SQLite database file, or `:memory:` for a scratch store
    #[arg(long, env = "NOTEFUL_DATABASE", default_value = "noteful.sqlite3")]
    pub database: String,

    /// trace|debug|info|warn|error (defaults by build mode)
    #[arg(long, env = "NOTEFUL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rotating log files; stderr when unset
    #[arg(long, env = "NOTEFUL_LOG_DIR")]
    pub log_dir: Option<String>,
}

impl Config {
    pub fn uses_memory_database(&self) -> bool {
        self.database.trim() == MEMORY_DATABASE
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|err| format!("invalid listen address `{}:{}`: {err}", self.host, self.port))
    }
}

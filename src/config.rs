use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Command-line and environment configuration for the web server
#[derive(Debug, Clone, Parser)]
#[command(name = "website", version, about = "Upload student score sheets and chart them")]
pub struct Config {
    /// Address the HTTP server listens on
    #[arg(long, env = "SCORE_DASHBOARD_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Scratch directory for uploaded files (created if absent)
    #[arg(long, env = "SCORE_DASHBOARD_UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,

    /// Largest accepted request body in bytes
    #[arg(long, env = "SCORE_DASHBOARD_MAX_UPLOAD_BYTES", default_value_t = 2 * 1024 * 1024)]
    pub max_upload_bytes: usize,
}

impl Config {
    /// Defaults with a custom scratch directory
    pub fn with_upload_dir(upload_dir: impl Into<PathBuf>) -> Self {
        Config {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            upload_dir: upload_dir.into(),
            max_upload_bytes: 2 * 1024 * 1024,
        }
    }
}

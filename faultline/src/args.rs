use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Problem-details HTTP service
#[derive(Debug, Parser)]
#[command(name = "faultline", about = "Serves the booking API with RFC 7807 problem responses")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "faultline.toml", env = "FAULTLINE_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "FAULTLINE_LISTEN")]
    pub listen: Option<SocketAddr>,
}

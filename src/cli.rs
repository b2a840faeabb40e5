use clap::Parser;

use crate::types::LogLevel;

#[derive(Parser, Debug)]
#[command(
    name = "album-proxy",
    version,
    about = "Serve photos and their EXIF metadata from a Nextcloud album"
)]
pub struct Cli {
    /// Nextcloud base URL, e.g. https://cloud.example.com
    #[arg(long, env = "DAV_URL")]
    pub dav_url: String,

    /// Nextcloud account owning the album
    #[arg(long, env = "DAV_USERNAME")]
    pub dav_username: String,

    /// Nextcloud password or app token.
    /// WARNING: passing via --dav-password is visible in process listings.
    /// Prefer the DAV_PASSWORD environment variable instead.
    #[arg(long, env = "DAV_PASSWORD", hide_env_values = true)]
    pub dav_password: String,

    /// Album (folder) name under the account's files
    #[arg(long, env = "DAV_ALBUM")]
    pub dav_album: String,

    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind: String,

    /// Timeout in seconds for each request to Nextcloud
    #[arg(long, env = "DAV_REQUEST_TIMEOUT", default_value_t = 30)]
    pub request_timeout: u64,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

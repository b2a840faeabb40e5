use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use reqwest::Url;

/// Application configuration.
pub struct Config {
    pub username: String,
    pub password: String,
    pub album: String,
    /// WebDAV collection holding the album, always ending in `/`.
    pub album_url: Url,
    pub bind: SocketAddr,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("album", &self.album)
            .field("album_url", &self.album_url.as_str())
            .field("bind", &self.bind)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    pub fn from_cli(cli: crate::cli::Cli) -> anyhow::Result<Self> {
        if cli.dav_username.is_empty() {
            anyhow::bail!("DAV username must not be empty");
        }
        if cli.dav_album.is_empty() {
            anyhow::bail!("DAV album must not be empty");
        }

        let album_url = album_url(&cli.dav_url, &cli.dav_username, &cli.dav_album)?;
        let bind = cli
            .bind
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid bind address '{}'", cli.bind))?;

        Ok(Self {
            username: cli.dav_username,
            password: cli.dav_password,
            album: cli.dav_album,
            album_url,
            bind,
            request_timeout: Duration::from_secs(cli.request_timeout),
        })
    }
}

/// Build `{base}/remote.php/dav/files/{username}/{album}/`, encoding the
/// username and album as single path segments.
fn album_url(base: &str, username: &str, album: &str) -> anyhow::Result<Url> {
    let mut url =
        Url::parse(base).with_context(|| format!("Invalid Nextcloud URL '{}'", base))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("Nextcloud URL must be http or https, got '{}'", base);
    }
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("Nextcloud URL '{}' cannot carry a path", base))?
        .pop_if_empty()
        .extend(["remote.php", "dav", "files", username, album, ""]);
    Ok(url)
}

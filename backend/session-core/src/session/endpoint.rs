//! Socket URL derivation from a page URL.
//!
//! `https` maps to `wss` and `http` to `ws`; host, port and path are copied verbatim.
//! The path doubles as the room identifier, which also decides the surface.

use crate::error::config::ConfigError;
use crate::protocol::Surface;

use common::ErrorLocation;

use std::panic::Location;

use url::Url;

/// Where a session connects and which surface it feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTarget {
    url: Url,
    surface: Surface,
}

impl SessionTarget {
    /// Derive the socket URL and surface from a page URL such as
    /// `https://chat.example.com/dev`.
    pub fn from_page_url(page_url: &str) -> Result<Self, ConfigError> {
        let page = Url::parse(page_url).map_err(|e| ConfigError::InvalidUrl {
            location: ErrorLocation::from(Location::caller()),
            url: page_url.to_string(),
            reason: e.to_string(),
        })?;

        let url = socket_url(&page)?;
        let surface = Surface::for_path(url.path());

        Ok(Self { url, surface })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// The room (or `/` for the directory) this session belongs to.
    pub fn room_path(&self) -> &str {
        self.url.path()
    }
}

/// Map a page URL onto the socket URL for the same room.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidUrl`] if the scheme is not `http`, `https`,
/// `ws` or `wss`, or the URL has no host.
pub fn socket_url(page: &Url) -> Result<Url, ConfigError> {
    let scheme = match page.scheme() {
        "https" | "wss" => "wss",
        "http" | "ws" => "ws",
        other => {
            return Err(ConfigError::InvalidUrl {
                location: ErrorLocation::from(Location::caller()),
                url: page.to_string(),
                reason: format!("unsupported scheme '{other}'"),
            });
        }
    };

    let host = page.host_str().ok_or_else(|| ConfigError::InvalidUrl {
        location: ErrorLocation::from(Location::caller()),
        url: page.to_string(),
        reason: "missing host".to_string(),
    })?;

    let port = page.port().map(|p| format!(":{p}")).unwrap_or_default();

    Ok(Url::parse(&format!("{scheme}://{host}{port}{}", page.path()))?)
}

//! Server configuration.

use dirshare_core::BrowseConfig;
use dirshare_core::BrowseError;
use std::net::IpAddr;
use std::net::Ipv4Addr;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default upload body limit: 100 MiB.
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 100 * 1024 * 1024;

/// Configuration for [`serve`](crate::serve).
///
/// Defaults listen on loopback only; exposing the browser on other
/// interfaces requires an explicit `bind` address.
///
/// # Examples
///
/// ```
/// use dirshare_server::ServeConfig;
/// use std::net::Ipv4Addr;
///
/// let config = ServeConfig::new("/srv/share")
///     .with_bind(Ipv4Addr::UNSPECIFIED.into())
///     .with_port(8080);
/// assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
/// ```
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Directory exposed to clients.
    pub root: PathBuf,

    /// Address to bind. Default: `127.0.0.1`.
    pub bind: IpAddr,

    /// Port to bind. Default: `5000`.
    pub port: u16,

    /// Largest accepted request body in bytes. Default: 100 MiB.
    pub max_upload_size: u64,

    /// Listing, resolution and archive settings.
    pub browse: BrowseConfig,
}

impl ServeConfig {
    /// Creates a configuration serving `root` with default settings.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            browse: BrowseConfig::default(),
        }
    }

    /// Sets the bind address.
    #[must_use]
    pub fn with_bind(mut self, bind: IpAddr) -> Self {
        self.bind = bind;
        self
    }

    /// Sets the port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the upload body limit in bytes.
    #[must_use]
    pub fn with_max_upload_size(mut self, bytes: u64) -> Self {
        self.max_upload_size = bytes;
        self
    }

    /// Sets the browsing configuration.
    #[must_use]
    pub fn with_browse(mut self, browse: BrowseConfig) -> Self {
        self.browse = browse;
        self
    }

    /// The socket address to listen on.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a zero upload limit or an invalid
    /// browsing configuration.
    pub fn validate(&self) -> dirshare_core::Result<()> {
        if self.max_upload_size == 0 {
            return Err(BrowseError::InvalidConfig {
                reason: "max upload size must be greater than zero".into(),
            });
        }
        self.browse.validate()
    }
}

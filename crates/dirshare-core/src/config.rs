//! Browsing and archival configuration.

use crate::BrowseError;
use crate::Result;

/// Highest compression level accepted by the ZIP writer.
pub const MAX_COMPRESSION_LEVEL: u8 = 9;

/// Default deflate level for folder archives.
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 6;

/// Configuration shared by path resolution, listing and archive building.
///
/// # Examples
///
/// ```
/// use dirshare_core::BrowseConfig;
///
/// let config = BrowseConfig::default()
///     .with_show_hidden(false)
///     .with_compression_level(Some(9));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseConfig {
    /// Expose entries whose name starts with `.`.
    ///
    /// When `false`, hidden entries are omitted from listings and archives
    /// and any path through a hidden component resolves as not found.
    ///
    /// Default: `true`.
    pub show_hidden: bool,

    /// Deflate level for folder archives.
    ///
    /// `Some(0)` stores entries uncompressed, `None` uses the writer's
    /// default.
    ///
    /// Default: `Some(6)`.
    pub compression_level: Option<u8>,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            show_hidden: true,
            compression_level: Some(DEFAULT_COMPRESSION_LEVEL),
        }
    }
}

impl BrowseConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether hidden entries are exposed.
    #[must_use]
    pub fn with_show_hidden(mut self, show: bool) -> Self {
        self.show_hidden = show;
        self
    }

    /// Sets the archive compression level.
    #[must_use]
    pub fn with_compression_level(mut self, level: Option<u8>) -> Self {
        self.compression_level = level;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::InvalidConfig` if the compression level is
    /// above 9.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && level > MAX_COMPRESSION_LEVEL
        {
            return Err(BrowseError::InvalidConfig {
                reason: format!(
                    "compression level {level} is out of range 0-{MAX_COMPRESSION_LEVEL}"
                ),
            });
        }
        Ok(())
    }

    /// Returns `true` if `name` must be hidden under this configuration.
    #[must_use]
    pub fn hides(&self, name: &str) -> bool {
        !self.show_hidden && name.starts_with('.')
    }
}

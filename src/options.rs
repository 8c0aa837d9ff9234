//! Options snapshot loaded from the host's preference storage.
//!
//! The browser keeps preferences as a loose JSON object; any key may be
//! absent. Deserialization fills missing keys with the defaults below, so a
//! freshly installed profile behaves the same as one that saved every value.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Process-wide configuration snapshot.
///
/// `parts` and `default_download_speed_limit` stay strings: they are passed
/// through to the download manager verbatim and never interpreted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Download-manager endpoint the control channel posts to.
    pub server: String,
    /// Basic-auth username for the control channel, empty for none.
    pub username: String,
    /// Basic-auth password for the control channel, empty for none.
    pub password: String,
    /// Number of connection parts the manager should use per download.
    pub parts: String,
    /// Speed limit in bytes per second, "0" for unlimited.
    pub default_download_speed_limit: String,
    /// Destination directory when the native download has no proposed path.
    pub default_directory: String,
    /// Attach a User-Agent header to handed-off downloads.
    pub user_agent: bool,
    /// Attach the Referer header when the triggering request had one.
    pub referer: bool,
    /// Take over native downloads at all. When false the interception and
    /// network-observation hooks are left unregistered.
    #[serde(rename = "override")]
    pub override_downloads: bool,
    /// Always show the confirmation window instead of sending directly.
    pub show_add_window: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            server: "http://localhost:80/".to_string(),
            username: String::new(),
            password: String::new(),
            parts: "1".to_string(),
            default_download_speed_limit: "0".to_string(),
            default_directory: String::new(),
            user_agent: true,
            referer: true,
            override_downloads: false,
            show_add_window: false,
        }
    }
}

impl Options {
    /// Build a snapshot from the JSON object the host's storage returns.
    pub fn from_storage(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Whether the control channel needs HTTP basic auth.
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() || !self.password.is_empty()
    }
}

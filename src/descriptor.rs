//! The normalized download descriptor and its assembly helpers.

use serde::{Deserialize, Serialize};

use crate::host::DownloadId;
use crate::options::Options;

/// HTTP method of a handed-off download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Single-character code used on the control channel.
    pub fn wire_code(self) -> &'static str {
        match self {
            Method::Get => "1",
            Method::Post => "2",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// The unit of work flowing through the pipeline: one download, normalized.
///
/// A descriptor is dispatched exactly once, after cookie resolution has
/// completed (found or exhausted).
#[derive(Debug, Clone)]
pub struct DownloadDescriptor {
    /// Native download id when intercepted, `None` for menu-triggered
    /// downloads. Used to purge the entry from download history.
    pub id: Option<DownloadId>,
    pub method: Method,
    pub url: String,
    /// `name=value; name=value` string, empty when no partition had cookies.
    pub cookie_string: String,
    /// Raw header block, `\r\n`-joined `Key: Value` lines.
    pub headers: String,
    /// URL-encoded body, empty unless the method is POST with a captured body.
    pub post_data: String,
    pub directory: String,
    /// Show the confirmation window instead of sending directly.
    pub confirm_requested: bool,
    /// Set only when a direct send failed and the descriptor fell back to
    /// the confirmation window.
    pub status_message: Option<String>,
}

/// Only these schemes are taken over; anything else keeps its native
/// download behavior.
pub fn eligible_scheme(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https" | "ftp"),
        Err(_) => false,
    }
}

/// Destination directory for an intercepted download: the proposed path with
/// its filename stripped, or the configured default. The path separator is
/// whichever the proposing side used; the manager may run on a different
/// platform than the browser.
pub fn directory_for(proposed_path: &str, options: &Options) -> String {
    if proposed_path.is_empty() {
        return default_directory(options);
    }
    match proposed_path.rfind(['\\', '/']) {
        Some(index) => proposed_path[..index].to_string(),
        None => String::new(),
    }
}

/// Configured default directory, falling back to the platform download
/// directory when nothing is configured.
pub fn default_directory(options: &Options) -> String {
    if !options.default_directory.is_empty() {
        return options.default_directory.clone();
    }
    dirs::download_dir()
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Assemble the raw header block from the options and request context.
/// Referer is included only when enabled and actually present.
pub fn header_block(options: &Options, referrer: Option<&str>, user_agent: &str) -> String {
    let mut headers = String::new();
    if options.user_agent {
        headers.push_str("User-Agent: ");
        headers.push_str(user_agent);
        headers.push_str("\r\n");
    }
    if options.referer {
        if let Some(referrer) = referrer.filter(|r| !r.is_empty()) {
            headers.push_str("Referer: ");
            headers.push_str(referrer);
            headers.push_str("\r\n");
        }
    }
    headers
}

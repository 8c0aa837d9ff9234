//! The browser host seam.
//!
//! Everything the pipeline needs from the browser — cookie stores, the
//! downloads API, popup windows, page scripts, preference storage — goes
//! through [`BrowserHost`]. The embedding application implements it against
//! the real browser; tests implement it in memory.

use serde::{Deserialize, Serialize};

use crate::cookies::Cookie;
use crate::error::Result;

/// Identifier of an isolated cookie partition (e.g. the default store vs. a
/// private-browsing store).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CookieStoreId(pub String);

/// Identifier of a native download entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DownloadId(pub i64);

/// Identifier of a browser window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u64);

/// Terminal or in-flight state of a native download at interception time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadState {
    InProgress,
    Interrupted,
    Complete,
}

/// A native download creation event.
#[derive(Debug, Clone)]
pub struct DownloadItem {
    pub id: DownloadId,
    pub url: String,
    /// Proposed destination path, empty when the browser has not chosen one.
    pub filename: String,
    pub referrer: Option<String>,
    pub state: DownloadState,
}

/// An outbound request seen by the passive network observer, before the
/// corresponding download event fires.
#[derive(Debug, Clone)]
pub struct ObservedRequest {
    pub method: String,
    pub url: String,
    /// Decoded form fields of the request body, possibly empty.
    pub form_data: Vec<(String, String)>,
}

/// Page-scoped URL extraction scripts backing the bulk menu actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageScript {
    Images,
    Media,
    Links,
}

/// Operations the pipeline delegates to the browser. Each async method is a
/// suspension point; implementations must not assume any ordering between
/// independent pipeline chains.
#[allow(async_fn_in_trait)]
pub trait BrowserHost {
    /// All cookie partitions, in resolution priority order.
    async fn cookie_stores(&self) -> Result<Vec<CookieStoreId>>;

    /// Cookies in one partition whose domain matches `domain` (a dotted
    /// registrable domain such as `.example.com`).
    async fn cookies(&self, domain: &str, store: &CookieStoreId) -> Result<Vec<Cookie>>;

    /// Cancel a native download before it begins transferring.
    async fn cancel_download(&self, id: DownloadId) -> Result<()>;

    /// Delete the file of an already completed native download from disk.
    async fn remove_file(&self, id: DownloadId) -> Result<()>;

    /// Erase a native download entry from the browser's download history.
    async fn erase_download(&self, id: DownloadId) -> Result<()>;

    /// Open a confirmation popup and return its window id.
    async fn open_confirmation_window(&self) -> Result<WindowId>;

    /// Run a URL-extraction script in the active page and collect its result.
    async fn run_page_script(&self, script: PageScript) -> Result<Vec<String>>;

    /// Raw preference storage contents as a JSON object.
    async fn load_options(&self) -> Result<serde_json::Value>;

    /// Register or deregister the download-interception and
    /// network-observation hooks.
    async fn set_hooks_enabled(&self, enabled: bool) -> Result<()>;

    /// The browser's User-Agent string.
    fn user_agent(&self) -> String;
}

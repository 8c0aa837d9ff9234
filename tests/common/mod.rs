#![allow(dead_code)]

//! In-memory `BrowserHost` used by the integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use dlbridge::cookies::Cookie;
use dlbridge::error::Result;
use dlbridge::host::{
    BrowserHost, CookieStoreId, DownloadId, DownloadItem, DownloadState, PageScript, WindowId,
};

/// Every host call with an observable side effect, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Cancelled(i64),
    RemovedFile(i64),
    Erased(i64),
    OpenedWindow(u64),
    HooksEnabled(bool),
    RanScript(PageScript),
}

pub struct FakeHost {
    stores: Vec<CookieStoreId>,
    /// (store id, dotted domain) -> cookies.
    cookies: HashMap<(String, String), Vec<Cookie>>,
    script_urls: Vec<String>,
    options_value: Mutex<serde_json::Value>,
    next_window: AtomicU64,
    events: Mutex<Vec<HostEvent>>,
}

impl FakeHost {
    pub fn new() -> Self {
        FakeHost {
            stores: vec![CookieStoreId("firefox-default".to_string())],
            cookies: HashMap::new(),
            script_urls: Vec::new(),
            options_value: Mutex::new(serde_json::json!({})),
            next_window: AtomicU64::new(1),
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn with_stores(mut self, stores: &[&str]) -> Self {
        self.stores = stores
            .iter()
            .map(|id| CookieStoreId(id.to_string()))
            .collect();
        self
    }

    pub fn with_cookies(mut self, store: &str, dotted_domain: &str, cookies: Vec<Cookie>) -> Self {
        self.cookies
            .insert((store.to_string(), dotted_domain.to_string()), cookies);
        self
    }

    pub fn with_script_urls(mut self, urls: &[&str]) -> Self {
        self.script_urls = urls.iter().map(|u| u.to_string()).collect();
        self
    }

    pub fn set_stored_options(&self, value: serde_json::Value) {
        *self.options_value.lock().unwrap() = value;
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn windows_opened(&self) -> Vec<WindowId> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HostEvent::OpenedWindow(id) => Some(WindowId(id)),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: HostEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl BrowserHost for FakeHost {
    async fn cookie_stores(&self) -> Result<Vec<CookieStoreId>> {
        Ok(self.stores.clone())
    }

    async fn cookies(&self, domain: &str, store: &CookieStoreId) -> Result<Vec<Cookie>> {
        Ok(self
            .cookies
            .get(&(store.0.clone(), domain.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn cancel_download(&self, id: DownloadId) -> Result<()> {
        self.push(HostEvent::Cancelled(id.0));
        Ok(())
    }

    async fn remove_file(&self, id: DownloadId) -> Result<()> {
        self.push(HostEvent::RemovedFile(id.0));
        Ok(())
    }

    async fn erase_download(&self, id: DownloadId) -> Result<()> {
        self.push(HostEvent::Erased(id.0));
        Ok(())
    }

    async fn open_confirmation_window(&self) -> Result<WindowId> {
        let id = self.next_window.fetch_add(1, Ordering::Relaxed);
        self.push(HostEvent::OpenedWindow(id));
        Ok(WindowId(id))
    }

    async fn run_page_script(&self, script: PageScript) -> Result<Vec<String>> {
        self.push(HostEvent::RanScript(script));
        Ok(self.script_urls.clone())
    }

    async fn load_options(&self) -> Result<serde_json::Value> {
        Ok(self.options_value.lock().unwrap().clone())
    }

    async fn set_hooks_enabled(&self, enabled: bool) -> Result<()> {
        self.push(HostEvent::HooksEnabled(enabled));
        Ok(())
    }

    fn user_agent(&self) -> String {
        "TestBrowser/1.0".to_string()
    }
}

/// A native download creation event with sensible defaults for tests.
pub fn download_item(id: i64, url: &str) -> DownloadItem {
    DownloadItem {
        id: DownloadId(id),
        url: url.to_string(),
        filename: String::new(),
        referrer: None,
        state: DownloadState::InProgress,
    }
}

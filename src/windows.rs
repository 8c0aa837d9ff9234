//! Registry of confirmation windows awaiting their payloads.
//!
//! A payload is registered under a freshly created window's id and consumed
//! exactly once, when that window asks for it. A window closed before asking
//! simply leaves its entry behind; the next `take` for that id is a no-op.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;

use crate::descriptor::{DownloadDescriptor, Method};
use crate::host::WindowId;
use crate::options::Options;

/// Everything a confirmation window needs to present and re-send a download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingPayload {
    pub server: String,
    pub username: String,
    pub password: String,
    pub parts: String,
    pub speed_limit: String,
    pub method: Method,
    /// One URL for intercepted and single-target downloads, many for the
    /// bulk menu actions.
    pub urls: Vec<String>,
    pub cookies: String,
    pub headers: String,
    pub post_data: String,
    pub directory: String,
    /// Failure message when the window was opened as a transport fallback,
    /// empty otherwise.
    pub message: String,
}

impl PendingPayload {
    /// Payload for a single descriptor, carrying the current server
    /// connection info alongside it.
    pub fn from_descriptor(options: &Options, descriptor: &DownloadDescriptor) -> Self {
        PendingPayload {
            server: options.server.clone(),
            username: options.username.clone(),
            password: options.password.clone(),
            parts: options.parts.clone(),
            speed_limit: options.default_download_speed_limit.clone(),
            method: descriptor.method,
            urls: vec![descriptor.url.clone()],
            cookies: descriptor.cookie_string.clone(),
            headers: descriptor.headers.clone(),
            post_data: descriptor.post_data.clone(),
            directory: descriptor.directory.clone(),
            message: descriptor.status_message.clone().unwrap_or_default(),
        }
    }

    /// Payload for a bulk menu action: a plain GET over a list of page URLs.
    pub fn bulk(options: &Options, urls: Vec<String>, headers: String, directory: String) -> Self {
        PendingPayload {
            server: options.server.clone(),
            username: options.username.clone(),
            password: options.password.clone(),
            parts: options.parts.clone(),
            speed_limit: options.default_download_speed_limit.clone(),
            method: Method::Get,
            urls,
            cookies: String::new(),
            headers,
            post_data: String::new(),
            directory,
            message: String::new(),
        }
    }
}

/// Short-lived window id to payload association, one payload per window.
#[derive(Debug, Default)]
pub struct PendingWindows {
    entries: Mutex<HashMap<WindowId, PendingPayload>>,
}

impl PendingWindows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the payload for a newly created window, replacing any earlier
    /// one for the same id.
    pub fn register(&self, window_id: WindowId, payload: PendingPayload) {
        self.entries.lock().unwrap().insert(window_id, payload);
    }

    /// Remove and return the payload queued for `window_id`. `None` means the
    /// window already consumed it or never had one; callers treat that as a
    /// no-op, not an error.
    pub fn take(&self, window_id: WindowId) -> Option<PendingPayload> {
        self.entries.lock().unwrap().remove(&window_id)
    }
}

//! Bounded cache of recently observed POST request bodies.
//!
//! The network-observation hook fires on every outbound POST before the
//! matching download-creation event does; this cache bridges the two
//! independent event streams. Lookup removes only the matched entry, so a
//! second in-flight POST download keeps its body until its own download
//! event arrives.

use std::collections::VecDeque;
use std::sync::Mutex;

use log::debug;

/// Most recent entries retained; older ones are evicted.
const MAX_CAPTURED: usize = 10;

#[derive(Debug, Clone)]
struct CapturedRequest {
    url: String,
    form_data: Vec<(String, String)>,
}

/// Ring of the most recent outbound POST bodies, most-recent-first.
#[derive(Debug, Default)]
pub struct RequestBodyCache {
    entries: Mutex<VecDeque<CapturedRequest>>,
}

impl RequestBodyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observed POST body, evicting the oldest entry past capacity.
    pub fn record(&self, url: &str, form_data: Vec<(String, String)>) {
        let mut entries = self.entries.lock().unwrap();
        entries.push_front(CapturedRequest {
            url: url.to_string(),
            form_data,
        });
        if entries.len() > MAX_CAPTURED {
            entries.pop_back();
        }
    }

    /// Take the most recent body recorded for exactly `url`, if any. The
    /// matched entry is consumed; everything else stays cached.
    pub fn take_body_for(&self, url: &str) -> Option<Vec<(String, String)>> {
        let mut entries = self.entries.lock().unwrap();
        let position = entries.iter().position(|entry| entry.url == url)?;
        let entry = entries.remove(position)?;
        debug!("matched captured POST body for {}", url);
        Some(entry.form_data)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

/// Encode form fields as an `application/x-www-form-urlencoded` body.
pub fn encode_form(form_data: &[(String, String)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in form_data {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

//! Confirmation-surface message protocol.
//!
//! The popup talks to the bridge with small tagged JSON messages: `loading`
//! to pull its one-shot payload, `server_info` to read the current server
//! connection details, `refresh_options` after the user saved preferences.

use serde::{Deserialize, Serialize};

use crate::host::WindowId;
use crate::windows::PendingPayload;

/// Request sent by a confirmation window or the options page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceRequest {
    /// A freshly opened window asks for its queued payload.
    Loading { window_id: WindowId },
    /// Read server endpoint and credentials without consuming anything.
    ServerInfo,
    /// Reload the options snapshot and re-register the hooks accordingly.
    RefreshOptions,
}

/// Current server connection details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    pub server: String,
    pub username: String,
    pub password: String,
}

/// Response to a surface request. `Loading` for a window with no queued
/// payload gets no response at all (see [`crate::bridge::DownloadBridge::handle_message`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SurfaceResponse {
    Payload(PendingPayload),
    ServerInfo(ServerInfo),
    Ack {},
}

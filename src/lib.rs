//! dlbridge - browser download interception and handoff
//!
//! This crate models the browser-side pipeline that takes over native
//! download attempts and hands them to an external download-manager process
//! over a private HTTP control channel, carrying the cookies, headers, and
//! POST body the browser would otherwise have sent itself. The browser
//! surface (cookie stores, downloads API, window creation, options storage)
//! is abstracted behind the [`host::BrowserHost`] trait so the pipeline can
//! be driven and tested without one.

pub mod bridge;
pub mod capture;
pub mod cookies;
pub mod descriptor;
pub mod error;
pub mod host;
pub mod i18n;
pub mod logging;
pub mod menu;
pub mod messages;
pub mod options;
pub mod transport;
pub mod windows;

pub use bridge::DownloadBridge;
pub use error::{BridgeError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

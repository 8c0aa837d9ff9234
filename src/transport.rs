//! Control-channel client for the download manager.
//!
//! One authenticated POST per handoff, an opaque 0x1F-separated octet stream
//! as the body, and a single literal acknowledgment as the reply. Failures
//! are classified so the dispatcher can surface the right message; nothing
//! here retries.

use std::time::Duration;

use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, ClientBuilder};

use crate::descriptor::DownloadDescriptor;
use crate::error::{BridgeError, Result};
use crate::options::Options;

/// Fixed bound on the whole handoff round trip.
pub const HANDOFF_TIMEOUT: Duration = Duration::from_secs(30);

/// Response body the manager sends when it accepted the download.
pub const ACKNOWLEDGMENT: &str = "DOWNLOADING";

/// Field separator of the wire format.
const UNIT_SEPARATOR: char = '\u{1f}';

/// Reserved field; the manager defines no semantics for it yet.
const DOWNLOAD_OPERATIONS_NONE: &str = "0";

/// HTTP client for the control channel.
pub struct HandoffClient {
    client: Client,
}

impl HandoffClient {
    pub fn new() -> Result<Self> {
        Self::with_timeout(HANDOFF_TIMEOUT)
    }

    /// Client with a non-default timeout; the production bound is
    /// [`HANDOFF_TIMEOUT`].
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .build()
            .map_err(BridgeError::Http)?;
        Ok(HandoffClient { client })
    }

    /// Send one descriptor to the configured server. `Ok(())` means the
    /// manager acknowledged the download; every other outcome is an error
    /// the caller degrades to a confirmation window.
    pub async fn send(&self, descriptor: &DownloadDescriptor, options: &Options) -> Result<()> {
        let body = encode_request(descriptor, options);

        let mut request = self
            .client
            .post(&options.server)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(body);

        if options.has_credentials() {
            request = request.basic_auth(&options.username, Some(&options.password));
        }

        let response = request.send().await.map_err(classify_send_error)?;

        // The manager replies with the acknowledgment in the body; the HTTP
        // status carries no meaning on this channel.
        let text = response.text().await.map_err(classify_send_error)?;
        if text != ACKNOWLEDGMENT {
            return Err(BridgeError::InvalidResponse(text));
        }

        debug!("download manager acknowledged {}", descriptor.url);
        Ok(())
    }
}

fn classify_send_error(error: reqwest::Error) -> BridgeError {
    if error.is_timeout() {
        BridgeError::Timeout
    } else {
        BridgeError::SendFailed(error.to_string())
    }
}

/// Serialize a descriptor for the control channel: eleven fields in fixed
/// order, each terminated by the unit separator. The wire username and
/// password are per-download credentials, unused by this pipeline and always
/// empty; server credentials travel as HTTP basic auth instead.
pub fn encode_request(descriptor: &DownloadDescriptor, options: &Options) -> String {
    let fields = [
        descriptor.method.wire_code(),
        descriptor.url.as_str(),
        "",
        "",
        options.parts.as_str(),
        options.default_download_speed_limit.as_str(),
        descriptor.directory.as_str(),
        DOWNLOAD_OPERATIONS_NONE,
        descriptor.cookie_string.as_str(),
        descriptor.headers.as_str(),
        descriptor.post_data.as_str(),
    ];

    let mut encoded = String::new();
    for field in fields {
        encoded.push_str(field);
        encoded.push(UNIT_SEPARATOR);
    }
    encoded
}

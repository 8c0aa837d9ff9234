//! The download bridge: ties the interception, cookie resolution, and
//! handoff stages together around one options snapshot.
//!
//! Every entry point clones the snapshot up front and threads it through the
//! whole chain, so a concurrent `refresh_options` never changes a pipeline
//! mid-flight.

use std::sync::Mutex;

use log::{debug, warn};

use crate::capture::{encode_form, RequestBodyCache};
use crate::cookies::{registrable_domain, resolve_cookies};
use crate::descriptor::{
    default_directory, directory_for, eligible_scheme, header_block, DownloadDescriptor, Method,
};
use crate::error::Result;
use crate::host::{BrowserHost, DownloadItem, DownloadState, ObservedRequest};
use crate::menu::{referer_from_page, MenuAction, MenuContext};
use crate::messages::{ServerInfo, SurfaceRequest, SurfaceResponse};
use crate::options::Options;
use crate::transport::HandoffClient;
use crate::i18n;
use crate::windows::{PendingPayload, PendingWindows};

/// Browser-side handoff pipeline over a [`BrowserHost`].
pub struct DownloadBridge<H: BrowserHost> {
    host: H,
    options: Mutex<Options>,
    cache: RequestBodyCache,
    windows: PendingWindows,
    client: HandoffClient,
}

impl<H: BrowserHost> DownloadBridge<H> {
    /// Bridge with an explicit initial options snapshot.
    pub fn new(host: H, options: Options) -> Result<Self> {
        Ok(Self::with_client(host, options, HandoffClient::new()?))
    }

    /// Bridge with a caller-supplied control-channel client (tests use one
    /// with a short timeout).
    pub fn with_client(host: H, options: Options, client: HandoffClient) -> Self {
        DownloadBridge {
            host,
            options: Mutex::new(options),
            cache: RequestBodyCache::new(),
            windows: PendingWindows::new(),
            client,
        }
    }

    /// Bridge initialized from the host's preference storage, with the
    /// interception hooks registered to match the loaded `override` setting.
    pub async fn from_host(host: H) -> Result<Self> {
        let bridge = Self::new(host, Options::default())?;
        bridge.reload_options().await?;
        Ok(bridge)
    }

    /// Current options snapshot.
    pub fn options(&self) -> Options {
        self.options.lock().unwrap().clone()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Re-read the options from host storage and re-register or deregister
    /// the interception and network-observation hooks to match `override`.
    pub async fn reload_options(&self) -> Result<()> {
        let raw = self.host.load_options().await?;
        let options = Options::from_storage(raw)?;
        let hooks = options.override_downloads;
        *self.options.lock().unwrap() = options;
        self.host.set_hooks_enabled(hooks).await?;
        debug!("options reloaded, hooks enabled: {}", hooks);
        Ok(())
    }

    /// Passive network-observation hook: remember the bodies of outbound
    /// POSTs so a matching download event can pick them up.
    pub fn on_request(&self, request: ObservedRequest) {
        if request.method.eq_ignore_ascii_case("POST") {
            self.cache.record(&request.url, request.form_data);
        }
    }

    /// Native download creation hook. Decides eligibility, cancels the
    /// native download, assembles a descriptor, and hands it off.
    pub async fn on_download_created(&self, item: &DownloadItem) -> Result<()> {
        let options = self.options();
        if !options.override_downloads {
            return Ok(());
        }
        if !eligible_scheme(&item.url) {
            debug!("ignoring ineligible download {}", item.url);
            return Ok(());
        }

        // A captured POST body turns the reconstructed request into a POST;
        // otherwise it is a plain GET.
        let (method, post_data) = match self.cache.take_body_for(&item.url) {
            Some(form_data) => (Method::Post, encode_form(&form_data)),
            None => (Method::Get, String::new()),
        };

        // The native download must be stopped before anything else happens
        // to its entry.
        self.host.cancel_download(item.id).await?;

        let descriptor = DownloadDescriptor {
            id: Some(item.id),
            method,
            url: item.url.clone(),
            cookie_string: String::new(),
            headers: header_block(&options, item.referrer.as_deref(), &self.host.user_agent()),
            post_data,
            directory: directory_for(&item.filename, &options),
            confirm_requested: options.show_add_window,
            status_message: None,
        };

        // Cancellation does not delete a file the download already finished
        // writing; clean it up here.
        if item.state == DownloadState::Complete {
            if let Err(error) = self.host.remove_file(item.id).await {
                warn!(
                    "could not remove completed file for download {}: {}",
                    item.id.0, error
                );
            }
        }

        let descriptor = self.fill_cookies(descriptor).await?;
        self.dispatch(&options, descriptor).await
    }

    /// Context-menu hook. Menu downloads always go through the confirmation
    /// window.
    pub async fn on_menu_clicked(&self, action: MenuAction, context: &MenuContext) -> Result<()> {
        let options = self.options();
        let referer = context.page_url.as_deref().map(referer_from_page);
        let headers = header_block(&options, referer, &self.host.user_agent());

        if let Some(script) = action.bulk_script() {
            let urls = self.host.run_page_script(script).await?;
            debug!("page script returned {} url(s)", urls.len());
            let payload =
                PendingPayload::bulk(&options, urls, headers, default_directory(&options));
            return self.open_surface(payload).await;
        }

        let Some(url) = action.target_url(context) else {
            return Ok(());
        };

        let descriptor = DownloadDescriptor {
            id: None,
            method: Method::Get,
            url,
            cookie_string: String::new(),
            headers,
            post_data: String::new(),
            directory: default_directory(&options),
            confirm_requested: true,
            status_message: None,
        };

        let descriptor = self.fill_cookies(descriptor).await?;
        self.dispatch(&options, descriptor).await
    }

    /// One message from a confirmation window or the options page. `None`
    /// means no response is owed (a `loading` request with nothing queued).
    pub async fn handle_message(&self, request: SurfaceRequest) -> Result<Option<SurfaceResponse>> {
        match request {
            SurfaceRequest::Loading { window_id } => Ok(self
                .windows
                .take(window_id)
                .map(SurfaceResponse::Payload)),
            SurfaceRequest::ServerInfo => {
                let options = self.options();
                Ok(Some(SurfaceResponse::ServerInfo(ServerInfo {
                    server: options.server,
                    username: options.username,
                    password: options.password,
                })))
            }
            SurfaceRequest::RefreshOptions => {
                self.reload_options().await?;
                Ok(Some(SurfaceResponse::Ack {}))
            }
        }
    }

    /// Resolve cookies for the descriptor's registrable domain. Resolution
    /// always completes before dispatch; no domain or no cookies both leave
    /// the string empty.
    async fn fill_cookies(&self, mut descriptor: DownloadDescriptor) -> Result<DownloadDescriptor> {
        descriptor.cookie_string = match registrable_domain(&descriptor.url) {
            Some(domain) => resolve_cookies(&self.host, &domain).await?,
            None => String::new(),
        };
        Ok(descriptor)
    }

    /// Deliver a completed descriptor: confirmation window when requested,
    /// direct send otherwise, and a fallback window on any transport
    /// failure. Afterwards the native history entry, if any, is purged.
    async fn dispatch(&self, options: &Options, descriptor: DownloadDescriptor) -> Result<()> {
        let native_id = descriptor.id;

        if descriptor.confirm_requested {
            self.open_surface(PendingPayload::from_descriptor(options, &descriptor))
                .await?;
        } else {
            match self.client.send(&descriptor, options).await {
                Ok(()) => {}
                Err(error) if error.is_transport() => {
                    warn!(
                        "handoff of {} failed ({}), falling back to confirmation window",
                        descriptor.url, error
                    );
                    let mut descriptor = descriptor;
                    descriptor.status_message = Some(i18n::transport_failure_message(&error));
                    self.open_surface(PendingPayload::from_descriptor(options, &descriptor))
                        .await?;
                }
                Err(error) => return Err(error),
            }
        }

        // Fire-and-forget: history cleanup does not gate the handoff.
        if let Some(id) = native_id {
            if let Err(error) = self.host.erase_download(id).await {
                warn!("could not erase download {} from history: {}", id.0, error);
            }
        }
        Ok(())
    }

    async fn open_surface(&self, payload: PendingPayload) -> Result<()> {
        let window_id = self.host.open_confirmation_window().await?;
        self.windows.register(window_id, payload);
        Ok(())
    }
}

// Transport constants are part of the bridge's public contract; re-export
// them where embedders look first.
pub use crate::transport::{ACKNOWLEDGMENT, HANDOFF_TIMEOUT};

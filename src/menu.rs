//! Context-menu download actions.
//!
//! Single-target actions pick one URL out of the click context; bulk actions
//! run a page-scoped extraction script and collect a URL list. Either way the
//! result always goes through the confirmation window, never a direct send.

use crate::host::PageScript;

/// The registered context-menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    DownloadLink,
    DownloadImage,
    DownloadAudio,
    DownloadVideo,
    DownloadPage,
    DownloadAllImages,
    DownloadAllMedia,
    DownloadAllLinks,
}

/// Click context the browser delivers with a menu event.
#[derive(Debug, Clone, Default)]
pub struct MenuContext {
    /// URL of the link under the cursor, for link items.
    pub link_url: Option<String>,
    /// URL of the media element under the cursor, for image/audio/video items.
    pub src_url: Option<String>,
    /// URL of the page the menu was opened on.
    pub page_url: Option<String>,
}

impl MenuAction {
    /// The extraction script backing a bulk action, `None` for single-target
    /// actions.
    pub fn bulk_script(self) -> Option<PageScript> {
        match self {
            MenuAction::DownloadAllImages => Some(PageScript::Images),
            MenuAction::DownloadAllMedia => Some(PageScript::Media),
            MenuAction::DownloadAllLinks => Some(PageScript::Links),
            _ => None,
        }
    }

    /// The URL a single-target action downloads, from the click context.
    pub fn target_url(self, context: &MenuContext) -> Option<String> {
        match self {
            MenuAction::DownloadLink => context.link_url.clone(),
            MenuAction::DownloadImage | MenuAction::DownloadAudio | MenuAction::DownloadVideo => {
                context.src_url.clone()
            }
            MenuAction::DownloadPage => context.page_url.clone(),
            _ => None,
        }
    }
}

/// Referer value for menu downloads: the page URL without its fragment.
pub fn referer_from_page(page_url: &str) -> &str {
    page_url.split('#').next().unwrap_or(page_url)
}

//! Cookie resolution across browser cookie partitions.
//!
//! Cookies for a download may live in a partition other than the default one
//! (private-browsing sessions get their own store), so resolution walks every
//! partition in order and stops at the first one that yields anything.

use log::debug;

use crate::error::Result;
use crate::host::BrowserHost;

/// A cookie as returned by a browser cookie store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
}

impl Cookie {
    pub fn new(name: &str, value: &str, domain: &str) -> Self {
        Cookie {
            name: name.to_string(),
            value: value.to_string(),
            domain: domain.to_string(),
            path: "/".to_string(),
            secure: false,
            http_only: false,
        }
    }
}

/// Join cookies into an HTTP `Cookie` header value.
pub fn cookie_header(cookies: &[Cookie]) -> String {
    cookies
        .iter()
        .map(|c| format!("{}={}", c.name, c.value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Coarse registrable-domain used as the cookie-matching key: the last two
/// dot-separated labels of the hostname. This is not a public-suffix
/// computation (`a.b.example.co.uk` yields `co.uk`); it matches what the
/// cookie stores are queried with and is kept as-is.
pub fn registrable_domain(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() > 2 {
        Some(format!(
            "{}.{}",
            labels[labels.len() - 2],
            labels[labels.len() - 1]
        ))
    } else {
        Some(host.to_string())
    }
}

/// Walk all cookie partitions for `domain`, in the host's order, and return
/// the first non-empty cookie string. Partitions are probed sequentially so
/// an early match skips the remaining stores. Exhausting every partition
/// without a match is a valid outcome and yields an empty string.
pub async fn resolve_cookies<H: BrowserHost>(host: &H, domain: &str) -> Result<String> {
    let stores = host.cookie_stores().await?;
    let dotted = format!(".{}", domain);

    for store in &stores {
        let cookies = host.cookies(&dotted, store).await?;
        let cookie_string = cookie_header(&cookies);
        if !cookie_string.is_empty() {
            debug!(
                "resolved {} cookie(s) for {} in store {}",
                cookies.len(),
                domain,
                store.0
            );
            return Ok(cookie_string);
        }
    }

    debug!("no cookies for {} in {} store(s)", domain, stores.len());
    Ok(String::new())
}

use fluent_templates::{static_loader, Loader};
use unic_langid::LanguageIdentifier;

use crate::error::BridgeError;

static_loader! {
    static LOCALES = {
        locales: "locales",
        fallback_language: "en-US",
    };
}

/// Localized message for a failed handoff, shown in the fallback
/// confirmation window.
pub fn transport_failure_message(error: &BridgeError) -> String {
    let langid = resolve_language();
    let key = match error {
        BridgeError::Timeout => "connection-timeout",
        BridgeError::InvalidResponse(_) => "invalid-response",
        _ => "send-failed",
    };
    LOCALES.lookup(&langid, key)
}

fn resolve_language() -> LanguageIdentifier {
    for key in ["LC_ALL", "LC_MESSAGES", "LANG"] {
        if let Ok(value) = std::env::var(key) {
            if let Some(lang) = normalize_lang(value) {
                if let Ok(langid) = lang.parse::<LanguageIdentifier>() {
                    return langid;
                }
            }
        }
    }
    "en-US".parse().expect("valid fallback language")
}

fn normalize_lang(value: String) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let value = value.split('.').next().unwrap_or(value);
    let value = value.replace('_', "-");
    Some(value)
}

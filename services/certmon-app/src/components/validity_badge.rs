//! Validity badge

use crate::html;
use crate::validity::Validity;

/// A colored badge showing Valid (green), Invalid (red), or Unknown (gray)
pub fn validity_badge(label: &str, validity: Option<Validity>) -> String {
    let (color, bg) = match validity {
        Some(Validity::Valid) => ("#155724", "#d4edda"),
        Some(Validity::Invalid) | None => ("#721c24", "#f8d7da"),
        Some(Validity::Unknown) => ("#383d41", "#e2e3e5"),
    };

    format!(
        "<span class=\"badge\" style=\"display: inline-block; padding: 0.25em 0.6em; border-radius: 0.25rem; \
         font-size: 0.85em; font-weight: 600; color: {}; background-color: {};\">{}</span>",
        color,
        bg,
        html::escape(label)
    )
}

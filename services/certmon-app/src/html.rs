//! Small helpers for building HTML fragments

/// Escape text for use in element content and double-quoted attributes
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Number of visible characters in a fragment, ignoring tags
pub fn visible_len(fragment: &str) -> usize {
    let mut in_tag = false;
    let mut len = 0;
    for c in fragment.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => len += 1,
            _ => {}
        }
    }
    len
}

/// Format an RFC 3339 timestamp for display, keeping the raw text if it does not parse
pub fn timestamp(raw: Option<&str>) -> String {
    match raw {
        None => String::new(),
        Some(raw) => match chrono::DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => ts
                .with_timezone(&chrono::Utc)
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            Err(_) => raw.to_string(),
        },
    }
}

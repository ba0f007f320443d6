//! On-demand host check panel

use crate::api::{ChainCertificate, CheckResponse};
use crate::components::validity_badge::validity_badge;
use crate::html;
use crate::validity::{self, Validity};

/// Parsed `host` or `host/sni` query
///
/// Only the first two `/`-separated components are used. There is no escape
/// for a literal `/` inside the host or SNI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckQuery {
    pub host: String,
    pub sni: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Enter a host to check, optionally followed by /sni")]
    EmptyHost,
}

impl CheckQuery {
    pub fn parse(query: &str) -> Result<Self, QueryError> {
        let mut parts = query.trim().split('/');
        let host = parts.next().map(str::trim).unwrap_or_default();
        if host.is_empty() {
            return Err(QueryError::EmptyHost);
        }
        let sni = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Ok(Self {
            host: host.to_string(),
            sni,
        })
    }

    /// Query parameters for the backend's /check endpoint
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![("host", self.host.as_str())];
        if let Some(sni) = &self.sni {
            params.push(("sni", sni.as_str()));
        }
        params
    }
}

impl std::fmt::Display for CheckQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.sni {
            Some(sni) => write!(f, "{}/{}", self.host, sni),
            None => write!(f, "{}", self.host),
        }
    }
}

/// Rendered outcome of a check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckView {
    pub label: String,
    pub validity: Option<Validity>,
    pub description: String,
    pub certificates: Vec<String>,
}

impl From<&CheckResponse> for CheckView {
    fn from(response: &CheckResponse) -> Self {
        let (label, validity) = validity::label_for(&response.valid);
        Self {
            label,
            validity,
            description: response.description.trim().to_string(),
            certificates: response.certificates.iter().map(summary).collect(),
        }
    }
}

/// Multi-line text summary of a chain certificate
pub fn summary(cert: &ChainCertificate) -> String {
    format!(
        "Common name: {}\nDomains: {}\nFingerprint: {}\nIssuer hash: {}\nValid from: {}\nValid until: {}",
        cert.common_name,
        cert.domains.join(", "),
        cert.fingerprint,
        cert.issuer_hash,
        html::timestamp(cert.not_before.as_deref()),
        html::timestamp(cert.not_after.as_deref()),
    )
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum CheckContent {
    #[default]
    Empty,
    Result {
        query: String,
        view: CheckView,
    },
    Failed {
        query: Option<String>,
        message: String,
    },
}

/// Detail panel holding the most recent check
///
/// Every new result or error replaces the previous content entirely.
#[derive(Debug, Clone, Default)]
pub struct CheckPanel {
    content: CheckContent,
}

impl CheckPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.content = CheckContent::Empty;
    }

    pub fn is_empty(&self) -> bool {
        self.content == CheckContent::Empty
    }

    pub fn view(&self) -> Option<&CheckView> {
        match &self.content {
            CheckContent::Result { view, .. } => Some(view),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.content {
            CheckContent::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn show_result(&mut self, query: &CheckQuery, response: &CheckResponse) {
        self.clear();
        self.content = CheckContent::Result {
            query: query.to_string(),
            view: CheckView::from(response),
        };
    }

    pub fn show_error(&mut self, query: Option<&CheckQuery>, message: impl Into<String>) {
        self.clear();
        self.content = CheckContent::Failed {
            query: query.map(ToString::to_string),
            message: message.into(),
        };
    }

    pub fn render(&self) -> String {
        match &self.content {
            CheckContent::Empty => r#"<div id="onlinecheck-result"></div>"#.to_string(),
            CheckContent::Failed { query, message } => format!(
                r#"<div id="onlinecheck-result"><h3>{}</h3><div class="panel-error">{}</div></div>"#,
                html::escape(query.as_deref().unwrap_or("Check")),
                html::escape(message)
            ),
            CheckContent::Result { query, view } => {
                let items: String = view
                    .certificates
                    .iter()
                    .map(|c| format!("<li><pre>{}</pre></li>", html::escape(c)))
                    .collect();
                format!(
                    r#"<div id="onlinecheck-result"><h3>{}</h3><p id="onlinecheck-status">{}</p><p id="onlinecheck-msg">{}</p><ul id="onlinecheck-certificates">{}</ul></div>"#,
                    html::escape(query),
                    validity_badge(&view.label, view.validity),
                    html::escape(&view.description),
                    items
                )
            }
        }
    }
}

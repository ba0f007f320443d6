//! Certificate chains per state, flattened to one row per certificate

use crate::api::{ChainCertificate, StateCertRecord};
use crate::html;
use crate::table::{RowClass, Table, TableRow};
use crate::validity::{self, Validity};

pub const COLUMNS: &[&str] = &[
    "Host",
    "Type",
    "Valid",
    "Description",
    "Common Name",
    "Fingerprint",
    "Expires In (days)",
];

/// One certificate of one state's chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateCertRow {
    pub host: String,
    pub sni: Option<String>,
    pub kind: Option<i64>,
    pub label: String,
    pub validity: Option<Validity>,
    pub description: String,
    pub common_name: String,
    pub fingerprint: String,
    pub subject_hash: String,
    pub issuer_hash: String,
    pub expires_in_days: Option<i64>,
    pub not_before: Option<String>,
    pub not_after: Option<String>,
}

impl StateCertRow {
    fn new(state: &StateCertRecord, label: &str, validity: Option<Validity>, cert: &ChainCertificate) -> Self {
        Self {
            host: state.host.clone(),
            sni: state.sni.clone(),
            kind: state.kind,
            label: label.to_string(),
            validity,
            description: state.description.clone(),
            common_name: cert.common_name.clone(),
            fingerprint: cert.fingerprint.clone(),
            subject_hash: cert.subject_hash.clone(),
            issuer_hash: cert.issuer_hash.clone(),
            expires_in_days: cert.expired,
            not_before: cert.not_before.clone(),
            not_after: cert.not_after.clone(),
        }
    }

    /// `host/sni` when the SNI differs from the host, otherwise just the host
    pub fn display_host(&self) -> String {
        match self.sni.as_deref() {
            Some(sni) if sni != self.host => format!("{}/{}", self.host, sni),
            _ => self.host.clone(),
        }
    }
}

/// Label of the backend's state origin
pub fn kind_label(kind: Option<i64>) -> String {
    match kind {
        None => String::new(),
        Some(0) => "Custom".to_string(),
        Some(1) => "Discovered".to_string(),
        Some(other) => other.to_string(),
    }
}

impl TableRow for StateCertRow {
    fn cells(&self) -> Vec<String> {
        vec![
            html::escape(&self.display_host()),
            kind_label(self.kind),
            html::escape(&self.label),
            html::escape(&self.description),
            html::escape(&self.common_name),
            html::escape(&self.fingerprint),
            self.expires_in_days
                .map(|days| days.to_string())
                .unwrap_or_default(),
        ]
    }

    fn detail(&self) -> Option<String> {
        Some(format!(
            r#"<dl class="cert-detail"><dt>Subject Hash</dt><dd>{}</dd><dt>Issuer Hash</dt><dd>{}</dd><dt>Common Name</dt><dd>{}</dd><dt>Not Before</dt><dd>{}</dd><dt>Not After</dt><dd>{}</dd></dl>"#,
            html::escape(&self.subject_hash),
            html::escape(&self.issuer_hash),
            html::escape(&self.common_name),
            html::escape(&html::timestamp(self.not_before.as_deref())),
            html::escape(&html::timestamp(self.not_after.as_deref())),
        ))
    }
}

/// Expand every state into one row per chain certificate
///
/// States with an empty chain contribute no rows.
pub fn flatten(records: &[StateCertRecord]) -> Vec<StateCertRow> {
    let mut rows = Vec::new();
    for state in records {
        if state.certificates.is_empty() {
            tracing::debug!("State {} has no certificates", state.host);
            continue;
        }
        let (label, validity) = validity::label_for(&state.valid);
        rows.extend(
            state
                .certificates
                .iter()
                .map(|cert| StateCertRow::new(state, &label, validity, cert)),
        );
    }
    rows
}

pub fn validity_style(row: &StateCertRow) -> Option<RowClass> {
    match row.validity {
        Some(Validity::Invalid) | None => Some(RowClass::Danger),
        _ => None,
    }
}

pub fn state_certs_table() -> Table<StateCertRow> {
    Table::new("stateCertsTable", COLUMNS, validity_style).expandable()
}

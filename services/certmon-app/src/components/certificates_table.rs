//! Known certificates table

use crate::api::CertificateRecord;
use crate::html;
use crate::table::{RowClass, Table, TableRow};

/// Certificates expiring in fewer days than this are highlighted
pub const EXPIRY_WARNING_DAYS: i64 = 35;

pub const COLUMNS: &[&str] = &[
    "Name",
    "Fingerprint",
    "Subject Hash",
    "Issuer Hash",
    "Domains",
    "Expires In (days)",
];

/// One row of the certificates table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRow {
    pub common_name: String,
    pub fingerprint: String,
    pub subject_hash: String,
    pub issuer_hash: String,
    pub domains: Vec<String>,
    pub expires_in_days: Option<i64>,
}

impl From<&CertificateRecord> for CertificateRow {
    fn from(record: &CertificateRecord) -> Self {
        Self {
            common_name: record.common_name.clone(),
            fingerprint: record.fingerprint.clone(),
            subject_hash: record.subject_hash.clone(),
            issuer_hash: record.issuer_hash.clone(),
            domains: record.domains.clone(),
            expires_in_days: record.expired,
        }
    }
}

impl TableRow for CertificateRow {
    fn cells(&self) -> Vec<String> {
        vec![
            html::escape(&self.common_name),
            html::escape(&self.fingerprint),
            html::escape(&self.subject_hash),
            html::escape(&self.issuer_hash),
            html::escape(&self.domains.join(", ")),
            self.expires_in_days
                .map(|days| days.to_string())
                .unwrap_or_default(),
        ]
    }
}

pub fn build_rows(records: &[CertificateRecord]) -> Vec<CertificateRow> {
    records.iter().map(CertificateRow::from).collect()
}

/// Rows expiring within [`EXPIRY_WARNING_DAYS`] get the danger style
pub fn expiry_style(row: &CertificateRow) -> Option<RowClass> {
    match row.expires_in_days {
        Some(days) if days < EXPIRY_WARNING_DAYS => Some(RowClass::Danger),
        _ => None,
    }
}

pub fn certificates_table() -> Table<CertificateRow> {
    Table::new("certsTable", COLUMNS, expiry_style)
}

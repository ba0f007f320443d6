//! Monitored states table

use crate::api::StateRecord;
use crate::html;
use crate::table::{RowClass, Table, TableRow};
use crate::validity::{self, Validity};

pub const COLUMNS: &[&str] = &["Host", "SNI", "Valid", "Description"];

/// One row of the states table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRow {
    pub host: String,
    pub sni: Option<String>,
    pub label: String,
    /// `None` when the backend sent an unrecognized code
    pub validity: Option<Validity>,
    pub description: String,
}

impl From<&StateRecord> for StateRow {
    fn from(record: &StateRecord) -> Self {
        let (label, validity) = validity::label_for(&record.valid);
        Self {
            host: record.host.clone(),
            sni: record.sni.clone(),
            label,
            validity,
            description: record.description.clone(),
        }
    }
}

impl TableRow for StateRow {
    fn cells(&self) -> Vec<String> {
        vec![
            html::escape(&self.host),
            sni_link(&self.host, self.sni.as_deref()),
            html::escape(&self.label),
            html::escape(&self.description),
        ]
    }
}

/// Link to the SNI name, falling back to the host for both target and text
pub fn sni_link(host: &str, sni: Option<&str>) -> String {
    let name = html::escape(sni.unwrap_or(host));
    format!(r#"<a href="https://{}">{}</a>"#, name, name)
}

pub fn build_rows(records: &[StateRecord]) -> Vec<StateRow> {
    records.iter().map(StateRow::from).collect()
}

/// Invalid states, and states with an unrecognized code, get the danger style
pub fn validity_style(row: &StateRow) -> Option<RowClass> {
    match row.validity {
        Some(Validity::Invalid) | None => Some(RowClass::Danger),
        _ => None,
    }
}

pub fn states_table() -> Table<StateRow> {
    Table::new("statesTable", COLUMNS, validity_style)
}

//! Loads dashboard panels from the backend
//!
//! Each loader owns exactly one panel for the duration of its request, so the
//! three page loads can run concurrently and finish in any order.

use certmon_app::components::certificates_table::{self, CertificateRow};
use certmon_app::components::check_panel::{CheckPanel, CheckQuery};
use certmon_app::components::state_certs_table::{self, StateCertRow};
use certmon_app::components::states_table::{self, StateRow};
use certmon_app::table::TableRow;
use certmon_app::{App, Tab, TablePanel};

use crate::backend::BackendClient;

/// Append loaded rows in one batch, or record the failure on the panel
pub fn fill<R: TableRow>(panel: &mut TablePanel<R>, what: &str, rows: crate::Result<Vec<R>>) {
    match rows {
        Ok(rows) => {
            let added = panel.table.append(rows);
            tracing::debug!("Loaded {} {}", added, what);
        }
        Err(e) => {
            tracing::warn!("Failed to load {}: {}", what, e);
            panel.fail(e.to_string());
        }
    }
}

pub async fn load_certificates(backend: &BackendClient, panel: &mut TablePanel<CertificateRow>) {
    let rows = backend
        .certificates()
        .await
        .map(|records| certificates_table::build_rows(&records));
    fill(panel, "certificates", rows);
}

pub async fn load_states(backend: &BackendClient, panel: &mut TablePanel<StateRow>) {
    let rows = backend
        .states()
        .await
        .map(|records| states_table::build_rows(&records));
    fill(panel, "states", rows);
}

pub async fn load_state_certificates(
    backend: &BackendClient,
    panel: &mut TablePanel<StateCertRow>,
) {
    let rows = backend
        .state_certificates()
        .await
        .map(|records| state_certs_table::flatten(&records));
    fill(panel, "state certificates", rows);
}

/// Run the three page loads concurrently
pub async fn load_all(backend: &BackendClient, app: &mut App) {
    tokio::join!(
        load_certificates(backend, &mut app.certificates),
        load_states(backend, &mut app.states),
        load_state_certificates(backend, &mut app.state_certs),
    );
}

/// Build a freshly loaded page with `tab` shown
pub async fn bootstrap(backend: &BackendClient, tab: Tab) -> App {
    let mut app = App::new();
    load_all(backend, &mut app).await;
    app.show_tab(tab);
    app
}

/// Parse the user's query, run the check and replace the panel content
pub async fn run_check(backend: &BackendClient, panel: &mut CheckPanel, raw_query: &str) {
    let query = match CheckQuery::parse(raw_query) {
        Ok(query) => query,
        Err(e) => {
            tracing::debug!("Rejected check query {:?}: {}", raw_query, e);
            panel.show_error(None, e.to_string());
            return;
        }
    };

    match backend.check(&query).await {
        Ok(response) => panel.show_result(&query, &response),
        Err(e) => {
            tracing::warn!("Check of {} failed: {}", query, e);
            panel.show_error(Some(&query), e.to_string());
        }
    }
}

//! Web dashboard routes

use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use certmon_app::api::ValidityCode;
use certmon_app::app::render_report;
use certmon_app::components::certificates_table::{self, EXPIRY_WARNING_DAYS};
use certmon_app::components::check_panel::{CheckPanel, CheckQuery, QueryError};
use certmon_app::components::states_table;
use certmon_app::html;
use certmon_app::{Tab, TablePanel, Validity};

use crate::backend::BackendClient;
use crate::loader;

/// Dashboard application state
#[derive(Clone)]
pub struct DashboardState {
    pub backend: BackendClient,
}

/// Build the dashboard axum router
pub fn build_router(backend: BackendClient) -> Router {
    let dashboard_state = DashboardState { backend };

    Router::new()
        .route("/", get(index_handler))
        .route("/onlinecheck", get(check_handler))
        .route("/states", axum::routing::post(add_state_handler))
        .route("/report/expire", get(expire_report_handler))
        .route("/report/valid", get(validity_report_handler))
        .route("/health", get(health_handler))
        .with_state(dashboard_state)
}

#[derive(Debug, Deserialize)]
pub struct IndexParams {
    tab: Option<String>,
}

async fn index_handler(
    State(dashboard): State<DashboardState>,
    Query(params): Query<IndexParams>,
) -> impl IntoResponse {
    let tab = params
        .tab
        .as_deref()
        .and_then(Tab::from_slug)
        .unwrap_or_default();
    let app = loader::bootstrap(&dashboard.backend, tab).await;
    Html(app.render())
}

#[derive(Debug, Deserialize)]
pub struct CheckParams {
    #[serde(default)]
    query: String,
}

/// Returns the check panel fragment that replaces `#onlinecheck-result`
async fn check_handler(
    State(dashboard): State<DashboardState>,
    Query(params): Query<CheckParams>,
) -> impl IntoResponse {
    let mut panel = CheckPanel::new();
    loader::run_check(&dashboard.backend, &mut panel, &params.query).await;
    Html(panel.render())
}

#[derive(Debug, Deserialize)]
pub struct AddStateForm {
    host: String,
    #[serde(default)]
    sni: Option<String>,
}

impl AddStateForm {
    fn query(&self) -> Result<CheckQuery, QueryError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(QueryError::EmptyHost);
        }
        let sni = self
            .sni
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Ok(CheckQuery {
            host: host.to_string(),
            sni,
        })
    }
}

async fn add_state_handler(
    State(dashboard): State<DashboardState>,
    Form(form): Form<AddStateForm>,
) -> Response {
    let result = match form.query() {
        Ok(query) => dashboard
            .backend
            .add_state(&query)
            .await
            .map_err(|e| (StatusCode::BAD_GATEWAY, e.to_string())),
        Err(e) => Err((StatusCode::BAD_REQUEST, e.to_string())),
    };

    match result {
        Ok(()) => Redirect::to(&format!("/?tab={}", Tab::States.slug())).into_response(),
        Err((status, message)) => {
            tracing::warn!("Adding state {:?} failed: {}", form.host, message);
            let panel = format!(
                r#"<div class="panel-error">Failed to add state: {}</div>"#,
                html::escape(&message)
            );
            (status, Html(render_report("Add State", &panel))).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExpireParams {
    days: Option<u32>,
}

async fn expire_report_handler(
    State(dashboard): State<DashboardState>,
    Query(params): Query<ExpireParams>,
) -> impl IntoResponse {
    let days = params.days.unwrap_or(EXPIRY_WARNING_DAYS as u32);
    let title = format!("Certificates expiring within {} days", days);

    let mut panel = TablePanel::new(certificates_table::certificates_table());
    let rows = dashboard
        .backend
        .expiring_certificates(days)
        .await
        .map(|records| certificates_table::build_rows(&records));
    loader::fill(&mut panel, "expiring certificates", rows);
    panel.table.set_visible(true);

    Html(render_report(&title, &panel.render("Expiring Certificates")))
}

#[derive(Debug, Deserialize)]
pub struct ValidityParams {
    valid: Option<i64>,
}

async fn validity_report_handler(
    State(dashboard): State<DashboardState>,
    Query(params): Query<ValidityParams>,
) -> Response {
    let code = ValidityCode::from(params.valid.unwrap_or(Validity::Invalid.code() as i64));
    let validity = match Validity::from_code(&code) {
        Ok(validity) => validity,
        Err(e) => {
            let panel = format!(
                r#"<div class="panel-error">{}</div>"#,
                html::escape(&e.to_string())
            );
            return (
                StatusCode::BAD_REQUEST,
                Html(render_report("States by validity", &panel)),
            )
                .into_response();
        }
    };
    let title = format!("{} states", validity.label());

    let mut panel = TablePanel::new(states_table::states_table());
    let rows = dashboard
        .backend
        .states_by_validity(validity)
        .await
        .map(|records| states_table::build_rows(&records));
    loader::fill(&mut panel, "states", rows);
    panel.table.set_visible(true);

    Html(render_report(&title, &panel.render("States"))).into_response()
}

async fn health_handler() -> impl IntoResponse {
    "OK"
}

//! Dashboard page
//!
//! [`App`] owns the three table controllers and the check panel for a single
//! page visit. Loaders fill the panels, then [`App::render`] produces the page.

use crate::components::certificates_table::{certificates_table, CertificateRow};
use crate::components::check_panel::CheckPanel;
use crate::components::state_certs_table::{state_certs_table, StateCertRow};
use crate::components::states_table::{states_table, StateRow};
use crate::html;
use crate::table::{Table, TableRow, COLLAPSE_GLYPH, EXPAND_GLYPH};

/// Tabs of the dashboard, each showing one table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Certificates,
    States,
    StateCertificates,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Certificates, Tab::States, Tab::StateCertificates];

    pub fn slug(self) -> &'static str {
        match self {
            Tab::Certificates => "certs",
            Tab::States => "states",
            Tab::StateCertificates => "statecerts",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Certificates => "Certificates",
            Tab::States => "States",
            Tab::StateCertificates => "State Certificates",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Tab> {
        Tab::ALL.into_iter().find(|t| t.slug() == slug)
    }
}

/// A table together with the outcome of loading it
#[derive(Debug)]
pub struct TablePanel<R> {
    pub table: Table<R>,
    error: Option<String>,
}

impl<R: TableRow> TablePanel<R> {
    pub fn new(table: Table<R>) -> Self {
        Self { table, error: None }
    }

    /// Record a load failure, shown above the (empty) table
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn render(&self, title: &str) -> String {
        let mut out = String::new();
        if let Some(error) = &self.error {
            out.push_str(&format!(
                r#"<div class="panel-error">Failed to load {}: {}</div>"#,
                html::escape(&title.to_lowercase()),
                html::escape(error)
            ));
        }
        out.push_str(&self.table.render());
        out
    }
}

/// All panels of one dashboard page
#[derive(Debug)]
pub struct App {
    pub certificates: TablePanel<CertificateRow>,
    pub states: TablePanel<StateRow>,
    pub state_certs: TablePanel<StateCertRow>,
    pub check: CheckPanel,
    tab: Tab,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        let mut app = Self {
            certificates: TablePanel::new(certificates_table()),
            states: TablePanel::new(states_table()),
            state_certs: TablePanel::new(state_certs_table()),
            check: CheckPanel::new(),
            tab: Tab::default(),
        };
        app.show_tab(Tab::default());
        app
    }

    pub fn active_tab(&self) -> Tab {
        self.tab
    }

    /// Make `tab` the visible one and refresh its table layout
    pub fn show_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.certificates
            .table
            .set_visible(tab == Tab::Certificates);
        self.states.table.set_visible(tab == Tab::States);
        self.state_certs
            .table
            .set_visible(tab == Tab::StateCertificates);
        self.on_tab_shown(tab);
    }

    /// Column widths computed while a table was hidden are stale
    fn on_tab_shown(&mut self, tab: Tab) {
        match tab {
            Tab::Certificates => self.certificates.table.adjust_columns(),
            Tab::States => self.states.table.adjust_columns(),
            Tab::StateCertificates => self.state_certs.table.adjust_columns(),
        }
    }

    pub fn render(&self) -> String {
        let nav: String = Tab::ALL
            .into_iter()
            .map(|tab| {
                let class = if tab == self.tab { r#" class="active""# } else { "" };
                format!(
                    r#"<li><a href="/?tab={}"{}>{}</a></li>"#,
                    tab.slug(),
                    class,
                    tab.title()
                )
            })
            .collect();

        let section = |tab: Tab, body: String| {
            let hidden = if tab == self.tab { "" } else { " hidden" };
            format!(
                r#"<section id="tab-{}"{}><h2>{}</h2>{}</section>"#,
                tab.slug(),
                hidden,
                tab.title(),
                body
            )
        };

        let body = format!(
            r#"<h1>Certificate Monitor</h1>
    <section id="onlinecheck">
        <h2>Online Check</h2>
        <input id="onlinecheck-query" type="text" placeholder="host:port/sni">
        <button id="btn-onlinecheck" type="button">Check</button>
        {check}
    </section>
    <ul class="tabs">{nav}</ul>
    {certs}
    {states}
    {state_certs}"#,
            check = self.check.render(),
            nav = nav,
            certs = section(
                Tab::Certificates,
                self.certificates.render(Tab::Certificates.title())
            ),
            states = section(
                Tab::States,
                format!("{}{}", ADD_STATE_FORM, self.states.render(Tab::States.title()))
            ),
            state_certs = section(
                Tab::StateCertificates,
                self.state_certs.render(Tab::StateCertificates.title())
            ),
        );

        page("Certificate Monitor", &body, &page_script())
    }
}

/// Standalone page for a backend report
pub fn render_report(title: &str, panel: &str) -> String {
    let body = format!(
        r#"<h1>{}</h1><p><a href="/">Back to dashboard</a></p>{}"#,
        html::escape(title),
        panel
    );
    page(title, &body, "")
}

const ADD_STATE_FORM: &str = r#"<form class="add-state" method="post" action="/states">
        <input name="host" type="text" placeholder="host:port" required>
        <input name="sni" type="text" placeholder="sni (optional)">
        <button type="submit">Monitor</button>
    </form>"#;

const STYLE: &str = r#"body { font-family: system-ui, sans-serif; max-width: 1200px; margin: 0 auto; padding: 1rem; }
        table { width: 100%; border-collapse: collapse; }
        th, td { padding: 0.5rem; text-align: left; border-bottom: 1px solid #dee2e6; }
        tr.danger td { background-color: #f8d7da; }
        td.details-control { cursor: pointer; font-weight: 600; text-align: center; }
        .panel-error { color: #721c24; background-color: #f8d7da; padding: 0.5rem; margin: 0.5rem 0; }
        ul.tabs { list-style: none; display: flex; gap: 1rem; padding: 0; }
        ul.tabs a.active { font-weight: 600; }"#;

/// Check button handler and delegated expand/collapse handler
const SCRIPT: &str = r#"
        document.getElementById('btn-onlinecheck').addEventListener('click', function () {
            const query = document.getElementById('onlinecheck-query').value;
            const replace = function (html) {
                document.getElementById('onlinecheck-result').outerHTML = html;
            };
            fetch('/onlinecheck?query=' + encodeURIComponent(query))
                .then(r => r.text())
                .then(replace)
                .catch(e => replace('<div id="onlinecheck-result"><div class="panel-error">' + e + '</div></div>'));
        });
        const body = document.querySelector('#stateCertsTable tbody');
        if (body) {
            body.addEventListener('click', function (e) {
                const control = e.target.closest('td.details-control');
                if (!control) return;
                const detail = body.querySelector('tr[data-detail="' + control.parentElement.dataset.row + '"]');
                const expanded = control.dataset.expanded !== 'true';
                control.dataset.expanded = String(expanded);
                control.textContent = expanded ? '{collapse}' : '{expand}';
                if (detail) detail.hidden = !expanded;
            });
        }
"#;

fn page_script() -> String {
    SCRIPT
        .replace("{collapse}", COLLAPSE_GLYPH)
        .replace("{expand}", EXPAND_GLYPH)
}

fn page(title: &str, body: &str, script: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <style>
        {style}
    </style>
</head>
<body>
    {body}
    <script>{script}</script>
</body>
</html>"#,
        title = html::escape(title),
        style = STYLE,
        body = body,
        script = script,
    )
}

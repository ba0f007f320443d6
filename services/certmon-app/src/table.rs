//! Table controller
//!
//! A [`Table`] exclusively owns its rows. Rows are appended in batches and
//! each batch triggers a single redraw. While a table is hidden its redraws
//! skip the column layout, so [`Table::adjust_columns`] must be called once it
//! becomes visible again.
//!
//! Expandable tables render every row collapsed. The page script flips a
//! row's `data-expanded` flag, glyph and detail panel together.

use std::fmt;

use crate::html;

/// A row that can be displayed by a [`Table`]
pub trait TableRow {
    /// Cell fragments, already HTML-escaped
    fn cells(&self) -> Vec<String>;

    /// Inline detail panel shown when an expandable row is opened
    fn detail(&self) -> Option<String> {
        None
    }
}

/// Conditional style applied to a row when it is appended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowClass {
    Danger,
}

impl RowClass {
    pub fn css(self) -> &'static str {
        match self {
            RowClass::Danger => "danger",
        }
    }
}

/// Per-row style rule supplied when a table is constructed
pub type RowStyle<R> = fn(&R) -> Option<RowClass>;

/// Glyph of a collapsed row's expand control
pub const EXPAND_GLYPH: &str = "+";
/// Glyph of an expanded row's expand control
pub const COLLAPSE_GLYPH: &str = "-";

/// Width of the expand control column, in characters
const CONTROL_WIDTH: usize = 3;

pub struct Table<R> {
    id: &'static str,
    columns: &'static [&'static str],
    rows: Vec<R>,
    classes: Vec<Option<RowClass>>,
    expandable: bool,
    row_style: RowStyle<R>,
    visible: bool,
    redraws: usize,
    column_widths: Option<Vec<usize>>,
}

impl<R> fmt::Debug for Table<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("id", &self.id)
            .field("rows", &self.rows.len())
            .field("visible", &self.visible)
            .field("redraws", &self.redraws)
            .finish()
    }
}

impl<R: TableRow> Table<R> {
    pub fn new(id: &'static str, columns: &'static [&'static str], row_style: RowStyle<R>) -> Self {
        Self {
            id,
            columns,
            rows: Vec::new(),
            classes: Vec::new(),
            expandable: false,
            row_style,
            visible: true,
            redraws: 0,
            column_widths: None,
        }
    }

    /// Give every row an expand control and a hidden detail panel
    pub fn expandable(mut self) -> Self {
        self.expandable = true;
        self
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_expandable(&self) -> bool {
        self.expandable
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    pub fn row_class(&self, index: usize) -> Option<RowClass> {
        self.classes.get(index).copied().flatten()
    }

    pub fn column_widths(&self) -> Option<&[usize]> {
        self.column_widths.as_deref()
    }

    /// Append a batch of rows in order and redraw once
    pub fn append(&mut self, rows: impl IntoIterator<Item = R>) -> usize {
        let before = self.rows.len();
        for row in rows {
            self.classes.push((self.row_style)(&row));
            self.rows.push(row);
        }
        let added = self.rows.len() - before;
        tracing::debug!("Appended {} rows to table {}", added, self.id);
        self.redraw();
        added
    }

    pub fn redraw(&mut self) {
        self.redraws += 1;
        if self.visible {
            self.adjust_columns();
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Recompute column widths from the header and current rows
    pub fn adjust_columns(&mut self) {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row.cells()) {
                *width = (*width).max(html::visible_len(&cell));
            }
        }
        self.column_widths = Some(widths);
    }


    pub fn render(&self) -> String {
        let span = self.columns.len() + usize::from(self.expandable);
        let mut out = format!(r#"<table id="{}" class="table">"#, self.id);

        if let Some(widths) = &self.column_widths {
            out.push_str("<colgroup>");
            if self.expandable {
                out.push_str(&format!(r#"<col style="width: {}ch">"#, CONTROL_WIDTH));
            }
            for width in widths {
                out.push_str(&format!(r#"<col style="width: {}ch">"#, width));
            }
            out.push_str("</colgroup>");
        }

        out.push_str("<thead><tr>");
        if self.expandable {
            out.push_str("<th></th>");
        }
        for column in self.columns {
            out.push_str(&format!("<th>{}</th>", html::escape(column)));
        }
        out.push_str("</tr></thead><tbody>");

        if self.rows.is_empty() {
            out.push_str(&format!(
                r#"<tr><td class="empty" colspan="{}">No data available in table</td></tr>"#,
                span
            ));
        }

        for (index, row) in self.rows.iter().enumerate() {
            match self.row_class(index) {
                Some(class) => out.push_str(&format!(
                    r#"<tr class="{}" data-row="{}">"#,
                    class.css(),
                    index
                )),
                None => out.push_str(&format!(r#"<tr data-row="{}">"#, index)),
            }
            if self.expandable {
                out.push_str(&format!(
                    r#"<td class="details-control" data-expanded="false">{}</td>"#,
                    EXPAND_GLYPH
                ));
            }
            for cell in row.cells() {
                out.push_str(&format!("<td>{}</td>", cell));
            }
            out.push_str("</tr>");

            if self.expandable {
                out.push_str(&format!(
                    r#"<tr class="detail-row" data-detail="{}" hidden><td colspan="{}">{}</td></tr>"#,
                    index,
                    span,
                    row.detail().unwrap_or_default()
                ));
            }
        }

        out.push_str("</tbody></table>");
        out
    }
}

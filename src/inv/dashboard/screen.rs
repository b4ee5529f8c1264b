// Copyright (c) 2026 Inventory Dashboard Developers. All Rights Reserved.

//! The dashboard view-model: which panels are shown, and the inventory table.

use crate::inv::model::InventoryRecord;

/// Column headers of the inventory table, in display order.
pub const HEADERS: [&str; 5] = ["ID", "Server Name", "OS", "Environment", "Application ID"];

// Column positions read back by the filter:
pub const SERVERNAME_COLUMN: usize = 1;
pub const OS_COLUMN: usize = 2;
pub const ENVIRONMENT_COLUMN: usize = 3;
pub const APPLICATION_ID_COLUMN: usize = 4;

/// The details view a server name links to.
pub fn details_href(id: &str) -> String {
    format!("details.html?id={}", id)
}

/// A single table cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Link { href: String, text: String },
}

impl Cell {
    /// The text content of the cell, ignoring any link target.
    pub fn text(&self) -> &str {
        match *self {
            Cell::Text(ref text) => text,
            Cell::Link { ref text, .. } => text,
        }
    }

    pub fn href(&self) -> Option<&str> {
        match *self {
            Cell::Link { ref href, .. } => Some(href),
            Cell::Text(_) => None,
        }
    }
}

/// One rendered inventory record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    cells: Vec<Cell>,
    visible: bool,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            visible: true,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Text of the cell at `column`; empty when the row is short.
    pub fn text(&self, column: usize) -> &str {
        self.cells.get(column).map(Cell::text).unwrap_or("")
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// Build the rows for a set of records, preserving their order.
pub fn render_rows(records: &[InventoryRecord]) -> Vec<Row> {
    records
        .iter()
        .map(|record| {
            let id = record.id().to_string();
            Row::new(vec![
                Cell::Text(id.clone()),
                Cell::Link {
                    href: details_href(&id),
                    text: record.servername().clone(),
                },
                Cell::Text(record.os().clone()),
                Cell::Text(record.environment().clone()),
                Cell::Text(record.application_id().to_string()),
            ])
        })
        .collect()
}

/// The inventory table: fixed headers over a body of rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Default for Table {
    fn default() -> Self {
        Self { rows: vec![] }
    }
}

impl Table {
    pub fn headers(&self) -> &[&'static str] {
        &HEADERS
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    /// Rows not hidden by a filter.
    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|row| row.is_visible())
    }

    /// Discard the current body and install `rows` in its place.
    pub fn replace_body(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }
}

/// Everything the dashboard shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    pub login_visible: bool,
    pub login_error_visible: bool,
    pub dashboard_visible: bool,
    pub table: Table,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            login_visible: true,
            login_error_visible: false,
            dashboard_visible: false,
            table: Table::default(),
        }
    }
}

impl Screen {
    pub fn show_login(&mut self) {
        self.login_visible = true;
        self.dashboard_visible = false;
    }

    pub fn show_dashboard(&mut self) {
        self.login_visible = false;
        self.dashboard_visible = true;
    }

    pub fn show_login_error(&mut self) {
        self.login_error_visible = true;
    }
}

// Copyright (c) 2026 Inventory Dashboard Developers. All Rights Reserved.

//! Spreadsheet export of the inventory table.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;

use crate::inv;
use crate::inv::dashboard::screen::Table;

pub const DEFAULT_EXPORT_FILE: &str = "inventory.xlsx";
pub const DEFAULT_SHEET_NAME: &str = "Inventory";

/// Something that can take the inventory table off the screen.
pub trait ExportSink {
    fn export(&self, table: &Table) -> inv::Result<()>;
}

/// The cell grid of an export: the header line, then every row of the
/// table in order. Rows hidden by a filter are included; the export works
/// on the table itself, not on what the filter currently shows.
pub fn sheet_rows(table: &Table) -> Vec<Vec<String>> {
    let mut grid = Vec::with_capacity(table.rows().len() + 1);
    grid.push(table.headers().iter().map(|h| h.to_string()).collect());
    for row in table.rows() {
        grid.push(row.cells().iter().map(|c| c.text().to_string()).collect());
    }
    grid
}

/// Writes a single-sheet `.xlsx` workbook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XlsxExport {
    path: PathBuf,
    sheet_name: String,
}

impl Default for XlsxExport {
    fn default() -> Self {
        Self::new(DEFAULT_EXPORT_FILE)
    }
}

impl XlsxExport {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }

    pub fn with_sheet_name<S: Into<String>>(mut self, sheet_name: S) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn workbook(&self, table: &Table) -> inv::Result<Workbook> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(self.sheet_name.as_str())?;
        for (r, line) in sheet_rows(table).into_iter().enumerate() {
            for (c, text) in line.into_iter().enumerate() {
                worksheet.write_string(r as u32, c as u16, text)?;
            }
        }
        Ok(workbook)
    }
}

impl ExportSink for XlsxExport {
    fn export(&self, table: &Table) -> inv::Result<()> {
        info!(
            "inv:dashboard:export<{}> rows = {}",
            self.path.display(),
            table.rows().len()
        );
        self.workbook(table)?.save(&self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inv::dashboard::filter::FilterCriteria;
    use crate::inv::dashboard::screen::render_rows;
    use crate::inv::model::{ApplicationId, InventoryId, InventoryRecord};
    use std::fs;
    use tempfile::tempdir;

    fn table() -> Table {
        let mut table = Table::default();
        table.replace_body(render_rows(&[
            InventoryRecord::new(
                InventoryId::new("1"),
                "web01",
                "linux",
                "prod",
                ApplicationId::new("A1"),
            ),
            InventoryRecord::new(
                InventoryId::new("2"),
                "db01",
                "windows",
                "dev",
                ApplicationId::new("A2"),
            ),
        ]));
        table
    }

    #[test]
    fn grid_starts_with_headers_and_keeps_cell_text() {
        let grid = sheet_rows(&table());
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[0][1], "Server Name");
        assert_eq!(grid[1], vec!["1", "web01", "linux", "prod", "A1"]);
    }

    #[test]
    fn rows_hidden_by_the_filter_are_still_exported() {
        let mut table = table();
        FilterCriteria::default().servername("web").apply(&mut table);
        assert_eq!(table.visible_rows().count(), 1);

        let grid = sheet_rows(&table);
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[2][1], "db01");
    }

    #[test]
    fn xlsx_export_writes_a_workbook() {
        let dir = tempdir().unwrap();
        let sink = XlsxExport::new(dir.path().join(DEFAULT_EXPORT_FILE));
        sink.export(&table()).unwrap();

        let bytes = fs::read(sink.path()).unwrap();
        // xlsx files are zip archives:
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn invalid_sheet_names_are_rejected() {
        let dir = tempdir().unwrap();
        let sink = XlsxExport::new(dir.path().join("bad.xlsx")).with_sheet_name("bad/name");
        assert!(sink.export(&table()).is_err());
        assert!(!sink.path().exists());
    }
}

// Copyright (c) 2026 Inventory Dashboard Developers. All Rights Reserved.

use crate::inv::dashboard::screen::{
    Row, Table, APPLICATION_ID_COLUMN, ENVIRONMENT_COLUMN, OS_COLUMN, SERVERNAME_COLUMN,
};

/// Free-text criteria over four table columns. A row matches when every
/// criterion is a case-insensitive substring of its column; an empty
/// criterion matches anything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    servername: String,
    os: String,
    application_id: String,
    environment: String,
}

impl FilterCriteria {
    pub fn new<S, O, A, E>(servername: S, os: O, application_id: A, environment: E) -> Self
    where
        S: AsRef<str>,
        O: AsRef<str>,
        A: AsRef<str>,
        E: AsRef<str>,
    {
        Self {
            servername: servername.as_ref().to_lowercase(),
            os: os.as_ref().to_lowercase(),
            application_id: application_id.as_ref().to_lowercase(),
            environment: environment.as_ref().to_lowercase(),
        }
    }

    pub fn servername<S: AsRef<str>>(mut self, servername: S) -> Self {
        self.servername = servername.as_ref().to_lowercase();
        self
    }

    pub fn os<S: AsRef<str>>(mut self, os: S) -> Self {
        self.os = os.as_ref().to_lowercase();
        self
    }

    pub fn application_id<S: AsRef<str>>(mut self, application_id: S) -> Self {
        self.application_id = application_id.as_ref().to_lowercase();
        self
    }

    pub fn environment<S: AsRef<str>>(mut self, environment: S) -> Self {
        self.environment = environment.as_ref().to_lowercase();
        self
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.servername.is_empty()
            && self.os.is_empty()
            && self.application_id.is_empty()
            && self.environment.is_empty()
    }

    pub fn matches(&self, row: &Row) -> bool {
        let contains = |column: usize, needle: &str| {
            row.text(column).to_lowercase().contains(needle)
        };
        contains(SERVERNAME_COLUMN, &self.servername)
            && contains(OS_COLUMN, &self.os)
            && contains(APPLICATION_ID_COLUMN, &self.application_id)
            && contains(ENVIRONMENT_COLUMN, &self.environment)
    }

    /// Show the rows that match and hide the rest. Rows are neither
    /// reordered nor removed. Returns the number of visible rows.
    pub fn apply(&self, table: &mut Table) -> usize {
        let mut visible = 0;
        for row in table.rows_mut() {
            let matched = self.matches(row);
            row.set_visible(matched);
            if matched {
                visible += 1;
            }
        }
        debug!("inv:dashboard:filter {:?} visible = {}", self, visible);
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inv::dashboard::screen::render_rows;
    use crate::inv::model::{ApplicationId, InventoryId, InventoryRecord};

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

    fn visible_servernames(table: &Table) -> Vec<String> {
        table
            .visible_rows()
            .map(|row| row.text(SERVERNAME_COLUMN).to_string())
            .collect()
    }

    #[test]
    fn servername_criterion_selects_matching_rows() {
        let mut table = table();
        let shown = FilterCriteria::default().servername("web").apply(&mut table);
        assert_eq!(shown, 1);
        assert_eq!(visible_servernames(&table), vec!["web01"]);
    }

    #[test]
    fn empty_criteria_show_everything() {
        let mut table = table();
        FilterCriteria::default().servername("web").apply(&mut table);
        let shown = FilterCriteria::default().apply(&mut table);
        assert_eq!(shown, 2);
        assert_eq!(visible_servernames(&table), vec!["web01", "db01"]);
    }

    #[test]
    fn matching_ignores_case() {
        let mut table = table();
        FilterCriteria::new("", "WIN", "a2", "DeV").apply(&mut table);
        assert_eq!(visible_servernames(&table), vec!["db01"]);
    }

    #[test]
    fn criteria_are_conjunctive() {
        let mut table = table();
        let shown = FilterCriteria::default()
            .servername("web")
            .os("windows")
            .apply(&mut table);
        assert_eq!(shown, 0);
        assert_eq!(table.rows().len(), 2);
    }

    #[test]
    fn filtering_is_idempotent() {
        let mut table = table();
        let criteria = FilterCriteria::default().environment("prod");
        criteria.apply(&mut table);
        let once = table.clone();
        criteria.apply(&mut table);
        assert_eq!(table, once);
    }

    #[test]
    fn application_id_matches_substrings() {
        let mut table = table();
        FilterCriteria::default().application_id("a").apply(&mut table);
        assert_eq!(visible_servernames(&table).len(), 2);
    }
}

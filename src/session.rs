// Session state shared between the pipeline and the terminal views

use crate::display::DisplayRecord;
use crate::filter;
use crate::pipeline::{Aggregation, FailedPackage};

/// Listing state: loading flag, loaded records, search query and selection
#[derive(Debug)]
pub struct Showcase {
    loading: bool,
    records: Vec<DisplayRecord>,
    failed: Vec<FailedPackage>,
    query: String,
    selected: Option<String>,
}

impl Default for Showcase {
    fn default() -> Self {
        Self::new()
    }
}

impl Showcase {
    /// A fresh session starts out loading
    pub fn new() -> Self {
        Self {
            loading: true,
            records: Vec::new(),
            failed: Vec::new(),
            query: String::new(),
            selected: None,
        }
    }

    /// Store a finished pipeline run and leave the loading state
    pub fn finish_loading(&mut self, aggregation: Aggregation) {
        self.records = aggregation.records;
        self.failed = aggregation.failed;
        self.selected = None;
        self.loading = false;
    }

    pub fn records(&self) -> &[DisplayRecord] {
        &self.records
    }

    pub fn failed(&self) -> &[FailedPackage] {
        &self.failed
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Records matching the current query
    pub fn visible(&self) -> Vec<DisplayRecord> {
        filter::filter(&self.records, &self.query)
    }

    /// Select a record by id or name. Returns false if nothing matches.
    pub fn select(&mut self, key: &str) -> bool {
        match self
            .records
            .iter()
            .find(|r| r.id == key || r.name == key)
        {
            Some(record) => {
                self.selected = Some(record.id.clone());
                true
            }
            None => false,
        }
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&DisplayRecord> {
        let id = self.selected.as_deref()?;
        self.records.iter().find(|r| r.id == id)
    }

    /// Empty-state notice once loading is done and nothing is visible.
    /// Cannot tell "no match" apart from "nothing loaded".
    pub fn empty_notice(&self) -> Option<String> {
        if self.loading || !self.visible().is_empty() {
            return None;
        }
        Some(format!("No packages found matching \"{}\"", self.query))
    }
}

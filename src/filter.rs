// Search utilities for the package listing

use crate::display::DisplayRecord;

/// Trait for items that can be searched
pub trait Searchable {
    /// Text fields a query is matched against
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for DisplayRecord {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.description.as_str()];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}

/// Check whether any field contains the query (case-insensitive).
/// The empty query matches everything.
pub fn matches<T: Searchable>(item: &T, query: &str) -> bool {
    let query_lower = query.to_lowercase();
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&query_lower))
}

/// Return the records matching the query, in their original order
pub fn filter<T: Searchable + Clone>(records: &[T], query: &str) -> Vec<T> {
    if query.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| matches(*record, query))
        .cloned()
        .collect()
}

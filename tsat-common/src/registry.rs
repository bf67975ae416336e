///! Ordered, name-indexed collection of catalog records

use std::collections::HashMap;

use crate::types::Record;

/// Records in stored order plus a name index.
///
/// Duplicate names are allowed; the index always points at the earliest
/// stored record carrying a name, so lookups return the first match.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    records: Vec<Record>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return the new count
    pub fn append(&mut self, record: Record) -> usize {
        let position = self.records.len();
        self.index.entry(record.name().to_string()).or_insert(position);
        self.records.push(record);
        self.records.len()
    }

    /// Exact, case-sensitive lookup by full name line
    pub fn find(&self, name: &str) -> Option<&Record> {
        self.index.get(name).map(|&position| &self.records[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Drop every record and index entry
    pub fn reset(&mut self) {
        self.records.clear();
        self.index.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Name of the record at `position`.
    ///
    /// # Panics
    /// If `position` is out of bounds.
    pub fn name_at(&self, position: usize) -> &str {
        self.records[position].name()
    }

    /// Record at `position`.
    ///
    /// # Panics
    /// If `position` is out of bounds.
    pub fn record_at(&self, position: usize) -> &Record {
        &self.records[position]
    }

    pub fn get(&self, position: usize) -> Option<&Record> {
        self.records.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Case-insensitive substring search over names, in stored order
    pub fn search(&self, query: &str) -> Vec<&Record> {
        let query_lower = query.to_lowercase();
        self.records
            .iter()
            .filter(|record| record.name().to_lowercase().contains(&query_lower))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

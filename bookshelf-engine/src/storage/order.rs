//! Insertion-order index
//!
//! Append-only sequence of records used for "list all". Removal exists only
//! for the cascade delete policy.

use super::record::Record;

/// Records in the order they were added
#[derive(Debug, Default, Clone)]
pub struct InsertionOrderIndex {
    records: Vec<Record>,
}

impl InsertionOrderIndex {
    pub fn new() -> Self {
        InsertionOrderIndex {
            records: Vec::new(),
        }
    }

    /// Append a record at the end of the sequence
    pub fn append(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Iterate all records in insertion order. Calling again restarts.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Remove the earliest record with the given ISBN
    pub(crate) fn remove_first(&mut self, isbn: &str) -> Option<Record> {
        let pos = self.records.iter().position(|r| r.isbn == isbn)?;
        Some(self.records.remove(pos))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a InsertionOrderIndex {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut index = InsertionOrderIndex::new();
        for (title, isbn) in [("Dune", "111"), ("Emma", "222"), ("Annie", "333")] {
            index.append(Record::new(title, "x", isbn));
        }

        let titles: Vec<_> = index.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Dune", "Emma", "Annie"]);
        assert_eq!(index.len(), 3);

        // Restartable
        assert_eq!(index.iter().count(), 3);
    }

    #[test]
    fn test_remove_first_only_takes_earliest() {
        let mut index = InsertionOrderIndex::new();
        index.append(Record::new("A", "x", "1"));
        index.append(Record::new("B", "x", "2"));
        index.append(Record::new("C", "x", "1"));

        let removed = index.remove_first("1").unwrap();
        assert_eq!(removed.title, "A");
        let titles: Vec<_> = index.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["B", "C"]);

        assert!(index.remove_first("missing").is_none());
        assert_eq!(index.len(), 2);
    }
}

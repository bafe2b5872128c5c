use core::ops::Index;

use crate::Record;

/// The ordered records behind a list. Insertion order is display order.
///
/// A record occurs at most once; inserting a record that is already present is a no-op.
#[derive(Clone, Debug, PartialEq)]
pub struct DataStore<T> {
    records: Vec<T>,
}

impl<T> Default for DataStore<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> DataStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&T> {
        self.records.get(position)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    pub fn position(&self, record: &T) -> Option<usize> {
        self.records.iter().position(|r| r == record)
    }

    pub fn contains(&self, record: &T) -> bool {
        self.records.contains(record)
    }

    /// Appends `record`. Returns `false` if it is already present.
    pub fn push(&mut self, record: T) -> bool {
        if self.contains(&record) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Inserts `record` before `position` (`position == len` appends).
    ///
    /// Returns `false` if `position > len` or the record is already present.
    pub fn insert(&mut self, position: usize, record: T) -> bool {
        if position > self.records.len() || self.contains(&record) {
            return false;
        }
        self.records.insert(position, record);
        true
    }

    pub fn remove_at(&mut self, position: usize) -> Option<T> {
        (position < self.records.len()).then(|| self.records.remove(position))
    }

    /// Removes `record` and returns the position it had.
    pub fn remove(&mut self, record: &T) -> Option<usize> {
        let position = self.position(record)?;
        self.records.remove(position);
        Some(position)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<T> Index<usize> for DataStore<T> {
    type Output = T;

    fn index(&self, position: usize) -> &T {
        &self.records[position]
    }
}

impl<T: Record> FromIterator<T> for DataStore<T> {
    /// Collects records, skipping duplicates.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut store = Self::new();
        for record in iter {
            store.push(record);
        }
        store
    }
}

impl<'a, T> IntoIterator for &'a DataStore<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

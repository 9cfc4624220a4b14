use crate::entry::FitnessEntry;

/// insertion-ordered collection of entries, rebuilt from the record file on every request
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EntryList {
    entries: Vec<FitnessEntry>,
}

impl EntryList {
    /// constructs an empty list
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// adds the entry at the end
    pub fn append(&mut self, entry: FitnessEntry) {
        self.entries.push(entry);
    }

    /// removes the first entry dated `date`; returns whether one was removed
    pub fn delete_by_date(&mut self, date: &str) -> bool {
        match self.entries.iter().position(|e| e.date == date) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// flattens the list into an owned sequence, preserving order
    pub fn to_vec(&self) -> Vec<FitnessEntry> {
        self.entries.clone()
    }

    /// discards the current contents and repopulates from `entries`
    pub fn load_from<I: IntoIterator<Item = FitnessEntry>>(&mut self, entries: I) {
        self.entries.clear();
        self.entries.extend(entries);
    }

    pub fn first(&self) -> Option<&FitnessEntry> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&FitnessEntry> {
        self.entries.last()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// returns the num of entries in the list
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn as_slice(&self) -> &[FitnessEntry] {
        &self.entries
    }
}

impl From<Vec<FitnessEntry>> for EntryList {
    fn from(entries: Vec<FitnessEntry>) -> Self {
        Self { entries }
    }
}

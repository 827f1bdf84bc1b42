//! Buckets records into release-note sections.

use std::collections::BTreeMap;

use relnote_commit::{Category, CommitRecord};

/// Records grouped by release-note section.
#[derive(Debug, Clone, Default)]
pub struct NotesBucket {
    /// The release label, used as the document title.
    pub name: String,

    /// Records per section. Empty sections are absent.
    pub sections: BTreeMap<Category, Vec<CommitRecord>>,
}

impl NotesBucket {
    /// Returns the records of a section.
    #[must_use]
    pub fn section(&self, category: Category) -> &[CommitRecord] {
        self.sections.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Returns the total number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    /// Returns true if no section holds a record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classifies records by their type; untyped records are unknown.
#[must_use]
pub fn classify(name: impl Into<String>, commits: Vec<CommitRecord>) -> NotesBucket {
    let mut sections: BTreeMap<Category, Vec<CommitRecord>> = BTreeMap::new();

    for commit in commits {
        let category = Category::of(commit.commit_type.as_ref());
        sections.entry(category).or_default().push(commit);
    }

    NotesBucket {
        name: name.into(),
        sections,
    }
}

//! Quote records and deduplication

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Separator used when joining tag names into the display string
pub const TAG_SEPARATOR: &str = ", ";

/// A single quote pulled from a listing page
///
/// Identity is `(text, author)`. Tags ride along as one display string and
/// are not part of the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub text: String,
    pub author: String,
    pub tags: String,
}

impl QuoteRecord {
    pub fn new(text: impl Into<String>, author: impl Into<String>, tags: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            tags: tags.into(),
        }
    }

    /// Builds a record from individual tag names, joining them for display
    pub fn with_tag_list<S: AsRef<str>>(
        text: impl Into<String>,
        author: impl Into<String>,
        tags: &[S],
    ) -> Self {
        let joined = tags
            .iter()
            .map(|t| t.as_ref())
            .collect::<Vec<_>>()
            .join(TAG_SEPARATOR);
        Self::new(text, author, joined)
    }

    /// The identity key used for deduplication
    pub fn key(&self) -> (&str, &str) {
        (&self.text, &self.author)
    }

    /// Splits the display string back into tag names
    ///
    /// Tokens are trimmed and empty tokens are dropped, so `"love, , life"`
    /// yields `["love", "life"]` and an empty string yields nothing.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Collapses records to one per `(text, author)`
///
/// The last occurrence of a key wins entirely, tags included. Each key keeps
/// the position where it was first seen, so output order is deterministic
/// and follows first appearance in the input.
pub fn dedupe(records: Vec<QuoteRecord>) -> Vec<QuoteRecord> {
    let mut positions: HashMap<(String, String), usize> = HashMap::new();
    let mut unique: Vec<QuoteRecord> = Vec::with_capacity(records.len());

    for record in records {
        let key = (record.text.clone(), record.author.clone());
        match positions.get(&key) {
            Some(&index) => unique[index] = record,
            None => {
                positions.insert(key, unique.len());
                unique.push(record);
            }
        }
    }

    unique
}

//! Per-author and per-tag counts over the unique record set
//!
//! Both views are recomputed from scratch on every run. Ties on count are
//! broken by ascending key in both views, so output is stable across runs.

use crate::quote::QuoteRecord;
use std::collections::HashMap;

/// One row of an aggregate table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRow {
    /// Author name or tag name
    pub key: String,

    /// Number of occurrences, always >= 1
    pub count: usize,
}

impl CountRow {
    pub fn new(key: impl Into<String>, count: usize) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }
}

/// Counts records per exact author string
///
/// Sorted by count descending, then author ascending.
pub fn author_counts(records: &[QuoteRecord]) -> Vec<CountRow> {
    count_keys(records.iter().map(|r| r.author.as_str()))
}

/// Counts tag occurrences across all records
///
/// Each record's tag string is split on commas, trimmed, and empty tokens
/// are dropped. A tag repeated within one record counts each time. Sorted by
/// count descending, then tag ascending.
pub fn tag_counts(records: &[QuoteRecord]) -> Vec<CountRow> {
    count_keys(records.iter().flat_map(|r| r.tag_names()))
}

fn count_keys<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<CountRow> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut rows: Vec<CountRow> = counts
        .into_iter()
        .map(|(key, count)| CountRow::new(key, count))
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(author: &str, tags: &str) -> QuoteRecord {
        QuoteRecord::new(format!("{} on {}", author, tags), author, tags)
    }

    #[test]
    fn test_author_counts_sorted() {
        let records = vec![
            QuoteRecord::new("q1", "Einstein", ""),
            QuoteRecord::new("q2", "Einstein", ""),
            QuoteRecord::new("q3", "Twain", ""),
        ];

        assert_eq!(
            author_counts(&records),
            vec![CountRow::new("Einstein", 2), CountRow::new("Twain", 1)]
        );
    }

    #[test]
    fn test_author_ties_alphabetical() {
        let records = vec![
            QuoteRecord::new("q1", "Rowling", ""),
            QuoteRecord::new("q2", "Austen", ""),
            QuoteRecord::new("q3", "Martin", ""),
            QuoteRecord::new("q4", "Martin", ""),
        ];

        let keys: Vec<_> = author_counts(&records)
            .into_iter()
            .map(|r| r.key)
            .collect();
        assert_eq!(keys, vec!["Martin", "Austen", "Rowling"]);
    }

    #[test]
    fn test_author_counts_sum_to_record_count() {
        let records: Vec<_> = (0..23)
            .map(|i| QuoteRecord::new(format!("q{}", i), format!("author{}", i % 4), ""))
            .collect();

        let total: usize = author_counts(&records).iter().map(|r| r.count).sum();
        assert_eq!(total, records.len());
    }

    #[test]
    fn test_tag_counts_explode_and_repeat() {
        let records = vec![record("A", "love, life, love")];
        assert_eq!(
            tag_counts(&records),
            vec![CountRow::new("love", 2), CountRow::new("life", 1)]
        );
    }

    #[test]
    fn test_tag_counts_skip_empty() {
        let records = vec![record("A", ""), record("B", "  "), record("C", "books")];
        assert_eq!(tag_counts(&records), vec![CountRow::new("books", 1)]);
    }

    #[test]
    fn test_tag_ties_alphabetical() {
        let records = vec![
            record("A", "zen, humor"),
            record("B", "abc, humor"),
        ];

        assert_eq!(
            tag_counts(&records),
            vec![
                CountRow::new("humor", 2),
                CountRow::new("abc", 1),
                CountRow::new("zen", 1),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(author_counts(&[]).is_empty());
        assert!(tag_counts(&[]).is_empty());
    }
}

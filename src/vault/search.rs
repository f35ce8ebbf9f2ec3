//! Record search.
//!
//! A linear scan is plenty for a personal vault.  Matching is a
//! case-insensitive substring test against `name`, `url`, and `note`;
//! the secret value is never inspected.  An empty query matches nothing,
//! callers wanting everything use `list_records`.

use super::record::Credential;

/// A lowercased search needle.
#[derive(Debug, Clone)]
pub struct Query {
    needle: String,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// True if any searchable field contains the needle.
    pub fn matches(&self, record: &Credential) -> bool {
        if self.is_empty() {
            return false;
        }
        record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

/// Filter `records` down to those matching `query`, preserving order.
pub fn filter<'a, I>(records: I, query: &Query) -> Vec<&'a Credential>
where
    I: IntoIterator<Item = &'a Credential>,
{
    records.into_iter().filter(|r| query.matches(r)).collect()
}

//! Credential records and the snapshot that holds them.
//!
//! A `Snapshot` is the whole decrypted vault: every `Credential` keyed by
//! id plus the time of the last persisted mutation.  It is serialized to
//! JSON as a single blob and encrypted by `format::encode`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single stored credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Minted by the store on `add`; never reused within a vault.
    pub id: Uuid,

    /// Display name (e.g. "Google").
    pub name: String,

    /// The secret itself.  Never matched by search.
    pub secret_value: String,

    pub url: String,

    pub note: String,

    pub created_at: DateTime<Utc>,

    pub last_edited_at: DateTime<Utc>,
}

impl Credential {
    /// The fields `find` looks at, in display order.
    pub fn search_fields(&self) -> [&str; 3] {
        [&self.name, &self.url, &self.note]
    }
}

/// The caller-supplied fields of a credential that has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialDraft {
    pub name: String,
    pub secret_value: String,
    pub url: String,
    pub note: String,
}

impl CredentialDraft {
    /// Shorthand for a draft with just a name, secret, and URL.
    pub fn new(name: impl Into<String>, secret_value: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secret_value: secret_value.into(),
            url: url.into(),
            note: String::new(),
        }
    }

    /// Attach a free-text note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Turn the draft into a stored record with a fresh id.
    pub(crate) fn into_credential(self, now: DateTime<Utc>) -> Credential {
        Credential {
            id: Uuid::new_v4(),
            name: self.name,
            secret_value: self.secret_value,
            url: self.url,
            note: self.note,
            created_at: now,
            last_edited_at: now,
        }
    }
}

/// The decrypted contents of a vault file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub records: HashMap<Uuid, Credential>,
    pub last_update_at: DateTime<Utc>,
}

impl Snapshot {
    /// An empty snapshot stamped with `now`.
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            records: HashMap::new(),
            last_update_at: now,
        }
    }

    /// All records in a stable order: oldest first, ties broken by id.
    pub fn sorted_records(&self) -> Vec<&Credential> {
        let mut list: Vec<&Credential> = self.records.values().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        list
    }
}

//! High-level vault operations used by CLI commands.
//!
//! `VaultStore` wraps the binary format layer and the crypto layer so
//! that the rest of the application can work with simple method calls
//! like `store.add(draft)` or `store.find("google")`.
//!
//! A store only exists in the unlocked state: `create` and `unlock` are
//! its constructors, and there is no lock operation.  Dropping the store
//! zeroizes the master key.
//!
//! The store has no internal locking.  Callers sharing one across threads
//! must serialize access themselves (e.g. `Mutex<VaultStore>`), and only
//! one process may use a given vault file at a time.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::crypto::kdf::derive_key;
use crate::crypto::keys::MasterKey;
use crate::errors::{Result, VaultError};

use super::format;
use super::record::{Credential, CredentialDraft, Snapshot};
use super::search::{self, Query};

/// The main vault handle.  Create one with `VaultStore::create` or
/// `VaultStore::unlock`, then use its methods to manage records.
pub struct VaultStore {
    /// Path to the vault file on disk.
    path: PathBuf,

    /// Decrypted records, mirrored to disk after every mutation.
    snapshot: Snapshot,

    /// The derived master key (zeroized on drop).
    key: MasterKey,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Returns `true` if a vault file is present at `path`.
    ///
    /// A path that cannot be inspected counts as absent here; `create` and
    /// `unlock` report it as an `Io` error instead.
    pub fn exists(path: &Path) -> bool {
        matches!(path.try_exists(), Ok(true))
    }

    /// Create a brand-new vault file at `path`.
    ///
    /// Refuses to touch an existing file.  Missing parent directories are
    /// created.  The empty vault is written before this returns.
    ///
    /// The existence check is advisory: it runs before key derivation, and
    /// a file appearing at `path` in the meantime is replaced.  Only one
    /// process may use a vault path at a time.
    pub fn create(path: &Path, passphrase: &[u8]) -> Result<Self> {
        if path.try_exists()? {
            return Err(VaultError::VaultAlreadyExists(path.to_path_buf()));
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let key = derive_key(passphrase);
        let snapshot = Snapshot::empty(Utc::now());

        format::write_vault(path, &format::encode(&snapshot, &key)?)?;
        info!(path = %path.display(), "created vault");

        Ok(Self {
            path: path.to_path_buf(),
            snapshot,
            key,
        })
    }

    /// Open an existing vault file.
    ///
    /// Any decode failure is reported as `WrongPassword`: a bad key and a
    /// corrupted file cannot be told apart.
    pub fn unlock(path: &Path, passphrase: &[u8]) -> Result<Self> {
        if !path.try_exists()? {
            return Err(VaultError::VaultNotFound(path.to_path_buf()));
        }

        let key = derive_key(passphrase);
        let data = format::read_vault(path)?;

        let snapshot = match format::decode(&data, &key) {
            Ok(snapshot) => snapshot,
            Err(VaultError::WrongKeyOrCorrupt) => {
                warn!(path = %path.display(), "vault unlock failed");
                return Err(VaultError::WrongPassword);
            }
            Err(e) => return Err(e),
        };

        info!(
            path = %path.display(),
            records = snapshot.records.len(),
            "unlocked vault"
        );

        Ok(Self {
            path: path.to_path_buf(),
            snapshot,
            key,
        })
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Every record, oldest first.
    pub fn list_records(&self) -> Vec<Credential> {
        self.snapshot
            .sorted_records()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Records whose name, URL, or note contains `query`, ignoring case.
    ///
    /// An empty query returns nothing; use `list_records` to see all.
    pub fn find(&self, query: &str) -> Vec<Credential> {
        let query = Query::new(query);
        search::filter(self.snapshot.sorted_records(), &query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Look up a single record by id.
    pub fn get(&self, id: &Uuid) -> Option<&Credential> {
        self.snapshot.records.get(id)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Store a new record and persist.  Returns the record as stored,
    /// including its freshly minted id.
    pub fn add(&mut self, draft: CredentialDraft) -> Result<Credential> {
        let now = Utc::now();
        let record = draft.into_credential(now);

        let mut next = self.snapshot.clone();
        next.records.insert(record.id, record.clone());
        self.commit(next, now)?;

        info!(id = %record.id, total = self.len(), "added record");
        Ok(record)
    }

    /// Replace an existing record and persist.
    ///
    /// The stored `created_at` wins over whatever the caller passes;
    /// `last_edited_at` becomes now.
    pub fn update(&mut self, record: Credential) -> Result<()> {
        let existing = self
            .snapshot
            .records
            .get(&record.id)
            .ok_or(VaultError::RecordNotFound(record.id))?;

        let now = Utc::now();
        let created_at = existing.created_at;
        let updated = Credential {
            created_at,
            last_edited_at: now.max(created_at),
            ..record
        };

        let id = updated.id;
        let mut next = self.snapshot.clone();
        next.records.insert(id, updated);
        self.commit(next, now)?;

        info!(%id, "updated record");
        Ok(())
    }

    /// Remove a record and persist.
    pub fn delete(&mut self, id: &Uuid) -> Result<()> {
        if !self.snapshot.records.contains_key(id) {
            return Err(VaultError::RecordNotFound(*id));
        }

        let now = Utc::now();
        let mut next = self.snapshot.clone();
        next.records.remove(id);
        self.commit(next, now)?;

        info!(%id, total = self.len(), "deleted record");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Encrypt `next` and write it to disk, then adopt it in memory.
    ///
    /// If encoding or writing fails the store keeps its previous snapshot,
    /// which still matches the file on disk.
    fn commit(&mut self, mut next: Snapshot, now: DateTime<Utc>) -> Result<()> {
        next.last_update_at = now;

        let bytes = format::encode(&next, &self.key)?;
        format::write_vault(&self.path, &bytes)?;
        debug!(
            path = %self.path.display(),
            bytes = bytes.len(),
            "persisted vault"
        );

        self.snapshot = next;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of records in the vault.
    pub fn len(&self) -> usize {
        self.snapshot.records.len()
    }

    /// Returns `true` if the vault holds no records.
    pub fn is_empty(&self) -> bool {
        self.snapshot.records.is_empty()
    }

    /// When the vault was last written.
    pub fn last_update_at(&self) -> DateTime<Utc> {
        self.snapshot.last_update_at
    }
}

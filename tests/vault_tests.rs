//! Integration tests for the PassVault vault module.

use std::collections::HashSet;
use std::fs;
use std::thread;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use passvault::crypto::MasterKey;
use passvault::errors::VaultError;
use passvault::vault::format::{decode, encode};
use passvault::vault::{Credential, CredentialDraft, Snapshot, VaultStore};
use tempfile::TempDir;
use uuid::Uuid;

/// Helper: create a temporary vault file path inside a fresh temp dir.
fn vault_path() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("test.pvlt");
    (dir, path)
}

fn ids(records: &[Credential]) -> HashSet<Uuid> {
    records.iter().map(|r| r.id).collect()
}

fn snapshot_with_records() -> Snapshot {
    let now = Utc::now();
    let mut records = std::collections::HashMap::new();
    for (i, name) in ["Google", "Yandex", ""].iter().enumerate() {
        let created = now - Duration::minutes(i as i64) + Duration::nanoseconds(987_654_321);
        let record = Credential {
            id: Uuid::new_v4(),
            name: name.to_string(),
            secret_value: format!("secret-{i} ✓"),
            url: format!("https://example.com/{i}"),
            note: "multi\nline \"note\"".to_string(),
            created_at: created,
            last_edited_at: created + Duration::microseconds(1),
        };
        records.insert(record.id, record);
    }
    Snapshot {
        records,
        last_update_at: now,
    }
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

#[test]
fn codec_roundtrip_is_exact() {
    let snapshot = snapshot_with_records();
    let key = MasterKey::new([0x5Au8; 32]);

    let bytes = encode(&snapshot, &key).expect("encode");
    let decoded = decode(&bytes, &key).expect("decode");

    assert_eq!(decoded, snapshot);
}

#[test]
fn codec_roundtrip_empty_snapshot() {
    let snapshot = Snapshot::empty(Utc::now());
    let key = MasterKey::new([0x01u8; 32]);

    let decoded = decode(&encode(&snapshot, &key).unwrap(), &key).unwrap();
    assert_eq!(decoded, snapshot);
}

#[test]
fn codec_rejects_wrong_key() {
    let snapshot = snapshot_with_records();
    let bytes = encode(&snapshot, &MasterKey::new([0x01u8; 32])).unwrap();

    let result = decode(&bytes, &MasterKey::new([0x02u8; 32]));
    assert!(matches!(result, Err(VaultError::WrongKeyOrCorrupt)));
}

#[test]
fn codec_rejects_every_single_byte_flip_in_body() {
    let snapshot = Snapshot::empty(Utc::now());
    let key = MasterKey::new([0x07u8; 32]);
    let bytes = encode(&snapshot, &key).unwrap();

    // Skip the magic and version bytes, which have their own checks.
    for i in 5..bytes.len() {
        let mut tampered = bytes.clone();
        tampered[i] ^= 0x01;
        assert!(
            matches!(decode(&tampered, &key), Err(VaultError::WrongKeyOrCorrupt)),
            "flip at byte {i} was not detected"
        );
    }
}

// ---------------------------------------------------------------------------
// Create / unlock
// ---------------------------------------------------------------------------

#[test]
fn create_vault_and_unlock() {
    let (_dir, path) = vault_path();
    assert!(!VaultStore::exists(&path));

    let mut store = VaultStore::create(&path, b"test-password").expect("create vault");
    assert!(VaultStore::exists(&path));
    assert!(store.is_empty());

    store
        .add(CredentialDraft::new("DB", "postgres-pw", "db.local"))
        .unwrap();

    let store2 = VaultStore::unlock(&path, b"test-password").expect("unlock vault");
    assert_eq!(store2.len(), 1);
    assert_eq!(store2.list_records()[0].secret_value, "postgres-pw");
}

#[test]
fn create_creates_missing_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("v.pvlt");

    VaultStore::create(&path, b"pw").expect("create vault");
    assert!(path.exists());
}

#[test]
fn create_vault_twice_fails_and_keeps_original() {
    let (_dir, path) = vault_path();

    let mut store = VaultStore::create(&path, b"first").unwrap();
    store.add(CredentialDraft::new("keep me", "s", "")).unwrap();
    let before = fs::read(&path).unwrap();

    let result = VaultStore::create(&path, b"second");
    assert!(matches!(result, Err(VaultError::VaultAlreadyExists(p)) if p == path));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn unlock_nonexistent_vault_fails() {
    let (_dir, path) = vault_path();
    let result = VaultStore::unlock(&path, b"any-password");
    assert!(matches!(result, Err(VaultError::VaultNotFound(_))));
}

#[test]
fn vault_path_under_a_regular_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("plain-file");
    fs::write(&blocker, b"not a directory").unwrap();
    let path = blocker.join("vault.pvlt");

    let unlocked = VaultStore::unlock(&path, b"pw");
    assert!(matches!(unlocked, Err(VaultError::Io(_))));

    let created = VaultStore::create(&path, b"pw");
    assert!(matches!(created, Err(VaultError::Io(_))));
    assert!(!VaultStore::exists(&path));
}

#[test]
fn wrong_password_fails_to_unlock() {
    let (_dir, path) = vault_path();

    let mut store = VaultStore::create(&path, b"correct-password").unwrap();
    store.add(CredentialDraft::new("Secret", "value", "")).unwrap();

    let result = VaultStore::unlock(&path, b"wrong-password");
    assert!(matches!(result, Err(VaultError::WrongPassword)));
}

#[test]
fn tampered_file_reports_wrong_password() {
    let (_dir, path) = vault_path();

    let mut store = VaultStore::create(&path, b"tamper-pw").unwrap();
    store.add(CredentialDraft::new("KEY", "value", "")).unwrap();

    // Flip a byte in the middle of the ciphertext.
    let mut data = fs::read(&path).expect("read vault file");
    let mid = data.len() / 2;
    data[mid] ^= 0xFF;
    fs::write(&path, &data).expect("write tampered file");

    let result = VaultStore::unlock(&path, b"tamper-pw");
    assert!(matches!(result, Err(VaultError::WrongPassword)));
}

#[test]
fn truncated_file_reports_wrong_password() {
    let (_dir, path) = vault_path();
    VaultStore::create(&path, b"pw").unwrap();

    fs::write(&path, b"PVLT").unwrap();
    let result = VaultStore::unlock(&path, b"pw");
    assert!(matches!(result, Err(VaultError::WrongPassword)));
}

#[test]
fn future_format_version_is_reported() {
    let (_dir, path) = vault_path();
    VaultStore::create(&path, b"pw").unwrap();

    let mut data = fs::read(&path).unwrap();
    data[4] = 9;
    fs::write(&path, &data).unwrap();

    let result = VaultStore::unlock(&path, b"pw");
    assert!(matches!(result, Err(VaultError::UnsupportedVersion(9))));
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[test]
fn add_then_find_then_delete() {
    let (_dir, path) = vault_path();
    let mut store = VaultStore::create(&path, b"crud-pw").unwrap();

    let added = store
        .add(CredentialDraft::new("GitHub", "ghp_token", "github.com"))
        .unwrap();
    assert_eq!(added.created_at, added.last_edited_at);
    assert_eq!(store.get(&added.id), Some(&added));

    assert!(ids(&store.find("GitHub")).contains(&added.id));

    store.delete(&added.id).unwrap();
    assert!(!ids(&store.find("GitHub")).contains(&added.id));
    assert!(store.get(&added.id).is_none());
}

#[test]
fn core_accepts_empty_fields() {
    let (_dir, path) = vault_path();
    let mut store = VaultStore::create(&path, b"pw").unwrap();

    let added = store.add(CredentialDraft::default()).unwrap();
    assert_eq!(added.name, "");
    assert_eq!(store.len(), 1);
}

#[test]
fn update_preserves_created_at() {
    let (_dir, path) = vault_path();
    let mut store = VaultStore::create(&path, b"update-pw").unwrap();

    let original = store.add(CredentialDraft::new("Mail", "v1", "")).unwrap();
    let t0 = original.created_at;

    thread::sleep(StdDuration::from_millis(5));

    // The caller's timestamps are ignored.
    let mut edited = original.clone();
    edited.secret_value = "v2".to_string();
    edited.created_at = t0 - Duration::days(365);
    store.update(edited).unwrap();

    let stored = store.get(&original.id).unwrap();
    assert_eq!(stored.created_at, t0);
    assert!(stored.last_edited_at > t0);
    assert_eq!(stored.secret_value, "v2");
    assert_eq!(store.last_update_at(), stored.last_edited_at);

    let reopened = VaultStore::unlock(&path, b"update-pw").unwrap();
    assert_eq!(reopened.get(&original.id), Some(stored));
}

#[test]
fn update_unknown_id_fails() {
    let (_dir, path) = vault_path();
    let mut store = VaultStore::create(&path, b"pw").unwrap();

    let ghost = CredentialDraft::new("ghost", "", "");
    let mut record = store.add(ghost).unwrap();
    store.delete(&record.id).unwrap();

    record.name = "back from the dead".to_string();
    let id = record.id;
    let result = store.update(record);
    assert!(matches!(result, Err(VaultError::RecordNotFound(missing)) if missing == id));
    assert!(store.is_empty());
}

#[test]
fn delete_unknown_id_fails() {
    let (_dir, path) = vault_path();
    let mut store = VaultStore::create(&path, b"pw").unwrap();
    store.add(CredentialDraft::new("stay", "s", "")).unwrap();

    let id = Uuid::new_v4();
    let result = store.delete(&id);
    assert!(matches!(result, Err(VaultError::RecordNotFound(missing)) if missing == id));
    assert_eq!(store.len(), 1);
}

#[test]
fn ids_are_unique() {
    let (_dir, path) = vault_path();
    let mut store = VaultStore::create(&path, b"pw").unwrap();

    for _ in 0..20 {
        store.add(CredentialDraft::new("same", "same", "same")).unwrap();
    }
    assert_eq!(ids(&store.list_records()).len(), 20);
}

#[test]
fn list_records_is_oldest_first() {
    let (_dir, path) = vault_path();
    let mut store = VaultStore::create(&path, b"pw").unwrap();

    for name in ["first", "second", "third"] {
        store.add(CredentialDraft::new(name, "s", "")).unwrap();
        thread::sleep(StdDuration::from_millis(2));
    }

    let names: Vec<String> = store.list_records().into_iter().map(|r| r.name).collect();
    assert_eq!(names, ["first", "second", "third"]);
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[test]
fn find_is_case_insensitive() {
    let (_dir, path) = vault_path();
    let mut store = VaultStore::create(&path, b"pw").unwrap();
    store.add(CredentialDraft::new("Google", "s", "")).unwrap();

    assert_eq!(ids(&store.find("GOOGLE")), ids(&store.find("google")));
    assert_eq!(store.find("gOoGlE").len(), 1);
}

#[test]
fn find_ignores_secret_value() {
    let (_dir, path) = vault_path();
    let mut store = VaultStore::create(&path, b"pw").unwrap();
    store
        .add(CredentialDraft::new("Bank", "correct-horse", "bank.example").with_note("savings"))
        .unwrap();

    assert!(store.find("horse").is_empty());
    assert_eq!(store.find("savings").len(), 1);
    assert_eq!(store.find("BANK.EX").len(), 1);
}

#[test]
fn find_empty_query_matches_nothing() {
    let (_dir, path) = vault_path();
    let mut store = VaultStore::create(&path, b"pw").unwrap();
    store.add(CredentialDraft::new("a", "b", "c")).unwrap();

    assert!(store.find("").is_empty());
    assert_eq!(store.list_records().len(), 1);
}

// ---------------------------------------------------------------------------
// The full walkthrough from the original program
// ---------------------------------------------------------------------------

#[test]
fn google_walkthrough() {
    let (_dir, path) = vault_path();

    let mut store = VaultStore::create(&path, b"privet").unwrap();
    assert!(store.list_records().is_empty());

    let russia = store
        .add(CredentialDraft::new("Google Russia", "qwerty12345", "google.ru"))
        .unwrap();
    let global = store
        .add(CredentialDraft::new("Google", "qwerty12345", "google.com"))
        .unwrap();

    assert_eq!(store.list_records().len(), 2);
    assert_eq!(ids(&store.find("google")), HashSet::from([russia.id, global.id]));
    assert_eq!(ids(&store.find("google.com")), HashSet::from([global.id]));
    assert_eq!(ids(&store.find("russia")), HashSet::from([russia.id]));

    store.delete(&global.id).unwrap();
    assert_eq!(store.list_records().len(), 1);

    let reopened = VaultStore::unlock(&path, b"privet").unwrap();
    assert_eq!(reopened.list_records(), vec![russia]);
}

// ---------------------------------------------------------------------------
// Durability
// ---------------------------------------------------------------------------

#[test]
fn every_mutation_is_persisted_exactly_once() {
    let (_dir, path) = vault_path();
    let mut store = VaultStore::create(&path, b"durable").unwrap();

    let a = store.add(CredentialDraft::new("a", "1", "")).unwrap();
    let b = store.add(CredentialDraft::new("b", "2", "")).unwrap();

    let mut edited = a.clone();
    edited.note = "edited".to_string();
    store.update(edited).unwrap();
    store.delete(&b.id).unwrap();

    let reopened = VaultStore::unlock(&path, b"durable").unwrap();
    let records = reopened.list_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, a.id);
    assert_eq!(records[0].note, "edited");
    assert_eq!(records, store.list_records());
    assert_eq!(reopened.last_update_at(), store.last_update_at());
}

#[test]
fn no_temp_file_left_behind() {
    let (dir, path) = vault_path();
    let mut store = VaultStore::create(&path, b"pw").unwrap();
    store.add(CredentialDraft::new("x", "y", "")).unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["test.pvlt"]);
}

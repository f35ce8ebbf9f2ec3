//! Binary vault file format.
//!
//! A `.pvlt` file has this layout:
//!
//! ```text
//! [PVLT: 4 bytes][version: 1 byte][nonce: 12 bytes][ciphertext + GCM tag: 16 bytes]
//! ```
//!
//! - **Magic** (`PVLT`): identifies the file as a PassVault vault.
//! - **Version**: format version (currently `1`).
//! - **Nonce**: fresh for every write, so one key never reuses a nonce.
//! - **Ciphertext**: the `Snapshot` as JSON, sealed with AES-256-GCM.  The
//!   magic and version bytes are the associated data, so editing them
//!   breaks the tag.
//!
//! A wrong key and a damaged file both decode to `WrongKeyOrCorrupt`.  Only
//! an intact magic with an unknown version gets its own error.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use zeroize::Zeroize;

use super::record::Snapshot;
use crate::crypto::encryption::{decrypt, encrypt, NONCE_LEN, TAG_LEN};
use crate::crypto::keys::MasterKey;
use crate::errors::{Result, VaultError};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic bytes at the start of every vault file.
const MAGIC: &[u8; 4] = b"PVLT";

/// Current binary format version.
pub const CURRENT_VERSION: u8 = 1;

/// Fixed-size prefix: 4 (magic) + 1 (version).
const PREFIX_LEN: usize = 5;

/// Smallest file that could possibly decode.
const MIN_LEN: usize = PREFIX_LEN + NONCE_LEN + TAG_LEN;

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// Serialize and encrypt a snapshot.
pub fn encode(snapshot: &Snapshot, key: &MasterKey) -> Result<Vec<u8>> {
    let mut plaintext = serde_json::to_vec(snapshot)
        .map_err(|e| VaultError::SerializationError(format!("snapshot: {e}")))?;

    let prefix = prefix(CURRENT_VERSION);
    let sealed = encrypt(key.as_bytes(), &plaintext, &prefix);
    plaintext.zeroize();
    let sealed = sealed?;

    let mut buf = Vec::with_capacity(PREFIX_LEN + sealed.len());
    buf.extend_from_slice(&prefix);
    buf.extend_from_slice(&sealed);
    Ok(buf)
}

/// Decrypt and deserialize a snapshot produced by `encode`.
pub fn decode(data: &[u8], key: &MasterKey) -> Result<Snapshot> {
    if data.len() < MIN_LEN || &data[0..4] != MAGIC {
        return Err(VaultError::WrongKeyOrCorrupt);
    }

    let version = data[4];
    if version != CURRENT_VERSION {
        return Err(VaultError::UnsupportedVersion(version));
    }

    let (prefix, sealed) = data.split_at(PREFIX_LEN);
    let mut plaintext = decrypt(key.as_bytes(), sealed, prefix)?;

    let snapshot = serde_json::from_slice::<Snapshot>(&plaintext);
    plaintext.zeroize();

    snapshot.map_err(|_| VaultError::WrongKeyOrCorrupt)
}

fn prefix(version: u8) -> [u8; PREFIX_LEN] {
    let mut out = [0u8; PREFIX_LEN];
    out[..4].copy_from_slice(MAGIC);
    out[4] = version;
    out
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

/// Read the raw bytes of a vault file.
///
/// A path that cannot be inspected (permissions, a file where a directory
/// should be) is an `Io` error, not `VaultNotFound`.
pub fn read_vault(path: &Path) -> Result<Vec<u8>> {
    if !path.try_exists()? {
        return Err(VaultError::VaultNotFound(path.to_path_buf()));
    }
    Ok(fs::read(path)?)
}

/// Write a vault file to disk **atomically**.
///
/// 1. Write the bytes to a temp file in the same directory.
/// 2. `fsync` it.
/// 3. Rename the temp file over the target path.
///
/// A crash at any point leaves either the old file or the new one, never
/// a truncated mix.  The temp file is always freshly created, so the
/// installed vault is owner-only on Unix even if a stale temp file with
/// wider permissions was left behind.
pub fn write_vault(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    // A leftover temp file would keep its old mode when reopened.
    match fs::remove_file(&tmp_path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e.into()),
        _ => {}
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let written = options.open(&tmp_path).and_then(|mut file| {
        file.write_all(bytes)?;
        file.sync_all()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

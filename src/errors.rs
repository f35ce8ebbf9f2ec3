use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// All errors that can occur in PassVault.
///
/// Messages never carry key material, passphrases, or secret values.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Authentication tag mismatch or undecodable plaintext.  A wrong key
    /// and a corrupted file look the same from the ciphertext alone.
    #[error("Vault could not be decrypted: wrong key or corrupted file")]
    WrongKeyOrCorrupt,

    // --- Vault errors ---
    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Wrong master password")]
    WrongPassword,

    #[error("Unsupported vault format version {0}")]
    UnsupportedVersion(u8),

    #[error("Record {0} not found")]
    RecordNotFound(Uuid),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("No records match '{0}'")]
    NoMatch(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, VaultError>;

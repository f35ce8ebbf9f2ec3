//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - PBKDF2-HMAC-SHA512 master-key derivation (`kdf`)
//! - The zeroize-on-drop `MasterKey` wrapper (`keys`)

pub mod encryption;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key, MasterKey};
pub use encryption::{decrypt, encrypt};
pub use kdf::derive_key;
pub use keys::MasterKey;

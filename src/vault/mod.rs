//! Vault module: encrypted credential storage.
//!
//! This module provides:
//! - `Credential`, `CredentialDraft`, and `Snapshot` types (`record`)
//! - Binary vault file format and atomic writes (`format`)
//! - Case-insensitive record search (`search`)
//! - High-level `VaultStore` for creating, unlocking, and editing vaults (`store`)

pub mod format;
pub mod record;
pub mod search;
pub mod store;

// Re-export the most commonly used items.
pub use record::{Credential, CredentialDraft, Snapshot};
pub use store::VaultStore;

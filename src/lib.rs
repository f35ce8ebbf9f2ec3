//! PassVault: a local, single-user encrypted password vault.
//!
//! The engine lives in [`vault`] and [`crypto`]; [`cli`] is a thin
//! front-end over [`vault::VaultStore`].

pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod vault;

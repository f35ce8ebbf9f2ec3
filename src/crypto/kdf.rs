//! Password-based key derivation using PBKDF2-HMAC-SHA512.
//!
//! The salt is a constant and the iteration count is fixed, so the same
//! passphrase always produces the same key.  The vault file carries no
//! KDF parameters; unlocking depends on this determinism.
//!
//! One million rounds takes a few hundred milliseconds.  That latency is
//! the throttle against offline guessing.

use std::time::Instant;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use tracing::debug;
use zeroize::Zeroize;

use super::keys::{MasterKey, KEY_LEN};

/// Number of PBKDF2 rounds.
pub const ITERATIONS: u32 = 1_000_000;

/// Constant salt, shared by every vault.
const SALT: &[u8] = b"passvault/kdf/v1";

/// Derive the 32-byte master key from a passphrase.
///
/// Accepts any passphrase, including an empty one; length policy lives in
/// the front-end.
pub fn derive_key(passphrase: &[u8]) -> MasterKey {
    let started = Instant::now();

    let mut bytes = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha512>(passphrase, SALT, ITERATIONS, &mut bytes);
    let key = MasterKey::new(bytes);
    bytes.zeroize();

    debug!(
        iterations = ITERATIONS,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "derived master key"
    );
    key
}

use sha2::{Digest, Sha256};

/// Salt appended to every password before digesting. Fixed for all users
/// and all installs, which means the digest is no stronger than the
/// password itself; the endpoint stores and compares these digests, so the
/// exact bytes are part of the wire contract.
const SALT: &str = "auth_salt";

/// Digest a password for transport: lowercase hex of
/// `SHA-256(password ++ SALT)`. Always 64 characters. This is obfuscation
/// for a spreadsheet backend, not a security boundary.
#[must_use]
pub fn digest_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(SALT.as_bytes());

    hex::encode(hasher.finalize())
}

use sha2::{Digest, Sha256};

use super::matcher::IdentityKey;

const DIGEST_LEN: usize = 12;

/// Short fingerprint of a normalized identity, safe to put in logs.
pub fn query_digest(key: &IdentityKey) -> String {
    let mut hasher = Sha256::new();
    for part in [
        &key.first_name,
        &key.last_name,
        &key.patronymic,
        &key.birth_date,
    ] {
        hasher.update(part.as_bytes());
        hasher.update([0x1fu8]);
    }
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(DIGEST_LEN);
    digest
}

use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

const TOKEN_BYTES: usize = 20;

/// A freshly minted reset token. Only `digest` is ever persisted; `plain`
/// goes out once, inside the recovery email.
#[derive(Debug)]
pub struct ResetToken {
    pub plain: String,
    pub digest: String,
}

pub fn generate_reset_token() -> ResetToken {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);

    let plain: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    let digest = hash_reset_token(&plain);

    ResetToken { plain, digest }
}

/// Hex-encoded SHA-256 of the plaintext token.
pub fn hash_reset_token(plain: &str) -> String {
    format!("{:x}", Sha256::digest(plain.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_matches_rehash_of_plain_value() {
        let token = generate_reset_token();

        assert_eq!(token.plain.len(), TOKEN_BYTES * 2);
        assert_eq!(token.digest.len(), 64);
        assert_ne!(token.plain, token.digest);
        assert_eq!(hash_reset_token(&token.plain), token.digest);
    }

    #[test]
    fn tokens_are_not_repeated() {
        assert_ne!(generate_reset_token().plain, generate_reset_token().plain);
    }

    #[test]
    fn known_vector() {
        assert_eq!(
            hash_reset_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}

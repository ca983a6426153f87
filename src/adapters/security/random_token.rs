//! OS-entropy hex token source.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::ports::TokenGenerator;

/// Default token length in bytes (64 hex characters).
pub const DEFAULT_TOKEN_BYTES: usize = 32;

/// Generates hex tokens from the operating system's CSPRNG.
///
/// Used for every session, confirmation, reset and SSO token and for
/// comment and commenter identifiers.
#[derive(Debug, Clone, Copy)]
pub struct RandomTokenGenerator {
    bytes: usize,
}

impl RandomTokenGenerator {
    /// Create a generator producing `bytes` random bytes per token.
    pub fn new(bytes: usize) -> Self {
        Self { bytes }
    }
}

impl Default for RandomTokenGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_BYTES)
    }
}

impl TokenGenerator for RandomTokenGenerator {
    fn hex_token(&self) -> String {
        let mut buf = vec![0u8; self.bytes];
        OsRng.fill_bytes(&mut buf);
        hex::encode(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_length_follows_byte_count() {
        assert_eq!(RandomTokenGenerator::default().hex_token().len(), 64);
        assert_eq!(RandomTokenGenerator::new(8).hex_token().len(), 16);
    }

    #[test]
    fn tokens_are_lowercase_hex() {
        let token = RandomTokenGenerator::default().hex_token();
        assert!(token.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn tokens_do_not_repeat() {
        let tokens = RandomTokenGenerator::default();
        assert_ne!(tokens.hex_token(), tokens.hex_token());
    }
}

//! Archive digest recorded in the install index

use std::fmt;

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of a cached archive
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn of(bytes: &[u8]) -> Self {
        Self(format!("{:x}", Sha256::digest(bytes)))
    }

    /// Rebuild from the hex digest stored in `installed.toml`
    pub fn from_hex(hex: &str) -> Self {
        Self(hex.to_ascii_lowercase())
    }

    pub fn hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_of_known_input() {
        assert_eq!(
            ContentHash::of(b"hello").hex(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn stored_digest_compares_case_insensitively() {
        let computed = ContentHash::of(b"hello");
        let stored = ContentHash::from_hex(&computed.hex().to_ascii_uppercase());
        assert_eq!(stored, computed);
    }
}

use std::fmt::Display;

use serde::Deserialize;
use sha1::Digest;

/// Hash algorithm named by the metadata source alongside
/// each download's expected hex digest.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumKind {
    Sha1,
    Sha256,
}

impl ChecksumKind {
    #[must_use]
    pub fn hash(self, bytes: &[u8]) -> String {
        match self {
            ChecksumKind::Sha1 => format!("{:x}", sha1::Sha1::digest(bytes)),
            ChecksumKind::Sha256 => format!("{:x}", sha2::Sha256::digest(bytes)),
        }
    }

    /// Byte-exact verification against an expected hex digest
    /// (case-insensitive on the hex text).
    #[must_use]
    pub fn matches(self, expected_hex: &str, bytes: &[u8]) -> bool {
        self.hash(bytes).eq_ignore_ascii_case(expected_hex)
    }
}

impl Display for ChecksumKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ChecksumKind::Sha1 => "sha1",
            ChecksumKind::Sha256 => "sha256",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        // sha256("abc")
        let expected = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
        assert_eq!(ChecksumKind::Sha256.hash(b"abc"), expected);
        assert!(ChecksumKind::Sha256.matches(expected, b"abc"));
        assert!(ChecksumKind::Sha256.matches(&expected.to_uppercase(), b"abc"));
        assert!(!ChecksumKind::Sha256.matches(expected, b"abd"));
    }

    #[test]
    fn sha1_known_vector() {
        // sha1("abc")
        let expected = "a9993e364706816aba3e25717850c26c9cd0d89d";
        assert!(ChecksumKind::Sha1.matches(expected, b"abc"));
    }
}

//! Checksum of the raw metadata text a document was built from

use sha2::{Digest, Sha256};
use std::fmt;

/// SHA256 checksum of metadata document content
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Checksum(String);

impl Checksum {
    /// Hex SHA-256 of the document text
    pub fn from_content(content: &str) -> Self {
        Self(format!("{:x}", Sha256::digest(content.as_bytes())))
    }

    /// Short prefix for log lines
    pub fn short(&self) -> &str {
        &self.0[..12.min(self.0.len())]
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_text_same_checksum() {
        let content = r#"{"datamodel": {"models": []}}"#;
        assert_eq!(Checksum::from_content(content), Checksum::from_content(content));
        assert_ne!(Checksum::from_content(content), Checksum::from_content("{}"));
    }

    #[test]
    fn test_short_form_prefixes_full_hex() {
        let checksum = Checksum::from_content(r#"{"schema": {}}"#);
        let full = checksum.to_string();
        assert_eq!(full.len(), 64);
        assert_eq!(checksum.short(), &full[..12]);
    }
}

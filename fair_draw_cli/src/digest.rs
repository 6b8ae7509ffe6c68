// Hex digests for publishing a commitment to the draw text.
//
// The organizer publishes the digest before the draw and reveals the text
// afterwards; anyone can then check the text against the published digest.
// The draw itself never depends on the digest. MD5 is the default because
// it is what earlier releases published; SHA-256 is available for new
// commitments.

use std::fmt;

use clap::ValueEnum;
use fair_draw::trim_label;
use serde::{Deserialize, Serialize};
use sha2::Digest;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    #[default]
    Md5,
    Sha256,
}

impl DigestAlgorithm {
    /// Lowercase hex digest of the trimmed text's UTF-8 bytes.
    pub fn hex_digest(self, text: &str) -> String {
        let bytes = trim_label(text).as_bytes();
        match self {
            DigestAlgorithm::Md5 => hex::encode(md5::Md5::digest(bytes)),
            DigestAlgorithm::Sha256 => hex::encode(sha2::Sha256::digest(bytes)),
        }
    }

    /// Whether `expected` is the digest of `text`. Surrounding whitespace
    /// and hex letter case in `expected` are ignored.
    pub fn matches(self, text: &str, expected: &str) -> bool {
        self.hex_digest(text).eq_ignore_ascii_case(expected.trim())
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestAlgorithm::Md5 => write!(f, "md5"),
            DigestAlgorithm::Sha256 => write!(f, "sha256"),
        }
    }
}

//! Hash related utils.

use sha2::Digest;
use sha2::Sha256;

/// SHA256 digest.
pub fn sha256(content: &[u8]) -> [u8; 32] {
    Sha256::digest(content).into()
}

/// Double SHA256 digest, as used by the Bitcoin message signing scheme.
pub fn double_sha256(content: &[u8]) -> [u8; 32] {
    sha256(&sha256(content))
}

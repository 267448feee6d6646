//! Whole-file content hashing.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Algorithm label recorded in scan-cache metadata.
pub const HASH_ALGORITHM: &str = "sha256";

const CHUNK_SIZE: usize = 64 * 1024;

/// Compute the SHA-256 hex digest of a file with sequential chunked reads.
pub fn hash_file(path: &Path) -> std::io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

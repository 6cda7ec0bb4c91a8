//! Common utilities

use std::path::Path;
use xxhash_rust::xxh3::xxh3_64;

/// Compute the XXH3 content hash of bytes
pub fn hash_bytes(data: &[u8]) -> String {
    format!("{:016x}", xxh3_64(data))
}

/// Get file size in bytes
pub fn get_file_size(path: &Path) -> std::io::Result<u64> {
    let metadata = std::fs::metadata(path)?;
    Ok(metadata.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_bytes() {
        let hash = hash_bytes(b"Processor:");
        assert_eq!(hash.len(), 16); // 64-bit hex
        assert_eq!(hash, hash_bytes(b"Processor:"));
        assert_ne!(hash, hash_bytes(b"Core:"));
    }

    #[test]
    fn test_get_file_size() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("r.txt");
        std::fs::write(&path, "12345").unwrap();
        assert_eq!(get_file_size(&path).unwrap(), 5);
    }
}

//! Symbol table caching with fingerprint support.
//!
//! Frozen symbol tables are serialized so later runs can borrow them instead
//! of recompiling. A cache entry may carry a fingerprint of the source it
//! was compiled from; a mismatching fingerprint means the source changed
//! and the entry must not be used.
//!
//! # File Format
//!
//! Cache files use the `.smic` extension by convention:
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │ Header (9 or 41 bytes)                 │
//! │   magic: [u8; 4]        "SMIC"         │
//! │   version: u32          Schema version │
//! │   has_fingerprint: u8   0 or 1         │
//! │   fingerprint: [u8; 32] (if present)   │
//! ├────────────────────────────────────────┤
//! │ Payload (postcard-encoded SymbolTable) │
//! └────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! let fp = compute_fingerprint(&source.module, source.text.as_bytes());
//! save_cache(&table, "IF-MIB.smic", Some(fp))?;
//! let table = load_cache_verified("IF-MIB.smic", &fp)?;
//! ```

use std::fs;
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};
use smic_core::SymbolTable;
use thiserror::Error;

/// Current schema version. Bump on any breaking change to serialized format.
pub const SCHEMA_VERSION: u32 = 1;

/// Conventional cache file extension.
pub const EXTENSION: &str = "smic";

/// Magic bytes identifying a smic cache file.
const MAGIC: [u8; 4] = *b"SMIC";

const HEADER_LEN: usize = 9;
const FINGERPRINT_LEN: usize = 32;

/// Cache error.
#[derive(Debug, Error)]
pub enum CacheError {
    /// File does not start with expected magic bytes.
    #[error("invalid magic bytes (expected SMIC)")]
    InvalidMagic,
    /// Schema version mismatch.
    #[error("version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Expected version.
        expected: u32,
        /// Found version.
        found: u32,
    },
    /// Fingerprint does not match expected value.
    #[error("fingerprint mismatch")]
    FingerprintMismatch,
    /// Header is truncated.
    #[error("truncated header")]
    TruncatedHeader,
    /// Postcard serialization or deserialization failed.
    #[error("postcard encoding failed: {0}")]
    Encoding(#[from] postcard::Error),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Compute a fingerprint of one module's source.
///
/// The fingerprint includes the schema version so that a format change
/// invalidates every cache entry.
#[must_use]
pub fn compute_fingerprint(module: &str, content: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(SCHEMA_VERSION.to_le_bytes());
    hasher.update(module.as_bytes());
    hasher.update([0]);
    hasher.update(content);
    hasher.finalize().into()
}

/// Serialize a symbol table to cache bytes.
///
/// # Errors
///
/// Returns an error if postcard encoding fails.
pub fn serialize_table(
    table: &SymbolTable,
    fingerprint: Option<[u8; 32]>,
) -> Result<Vec<u8>, CacheError> {
    let payload = postcard::to_allocvec(table)?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + FINGERPRINT_LEN + payload.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&SCHEMA_VERSION.to_le_bytes());
    match fingerprint {
        Some(fp) => {
            bytes.push(1);
            bytes.extend_from_slice(&fp);
        }
        None => bytes.push(0),
    }
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Deserialize a symbol table from cache bytes.
///
/// # Arguments
///
/// * `bytes` - Cache file contents
/// * `expected_fingerprint` - If `Some`, verify the fingerprint matches; if `None`, skip verification
///
/// # Errors
///
/// Returns an error if:
/// - Magic bytes don't match
/// - Schema version doesn't match
/// - Fingerprint doesn't match (when verification requested)
/// - Postcard deserialization fails
pub fn deserialize_table(
    bytes: &[u8],
    expected_fingerprint: Option<&[u8; 32]>,
) -> Result<SymbolTable, CacheError> {
    let stored = get_fingerprint(bytes)?;
    let payload_start = match (stored, expected_fingerprint) {
        (Some(stored), Some(expected)) if stored != *expected => {
            return Err(CacheError::FingerprintMismatch)
        }
        (None, Some(_)) => return Err(CacheError::FingerprintMismatch),
        (Some(_), _) => HEADER_LEN + FINGERPRINT_LEN,
        (None, None) => HEADER_LEN,
    };
    Ok(postcard::from_bytes(&bytes[payload_start..])?)
}

/// Get the fingerprint from cache bytes without deserializing the payload.
///
/// Returns `None` if the cache has no embedded fingerprint.
///
/// # Errors
///
/// Returns an error if the header is invalid.
pub fn get_fingerprint(bytes: &[u8]) -> Result<Option<[u8; 32]>, CacheError> {
    if bytes.len() < HEADER_LEN {
        return Err(CacheError::TruncatedHeader);
    }
    if bytes[0..4] != MAGIC {
        return Err(CacheError::InvalidMagic);
    }

    let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    if version != SCHEMA_VERSION {
        return Err(CacheError::VersionMismatch {
            expected: SCHEMA_VERSION,
            found: version,
        });
    }

    if bytes[8] == 0 {
        return Ok(None);
    }
    let Some(stored) = bytes.get(HEADER_LEN..HEADER_LEN + FINGERPRINT_LEN) else {
        return Err(CacheError::TruncatedHeader);
    };
    let mut fp = [0u8; FINGERPRINT_LEN];
    fp.copy_from_slice(stored);
    Ok(Some(fp))
}

// === File-based convenience API ===

/// Save a symbol table to a cache file.
///
/// # Errors
///
/// Returns an error if encoding fails or the file cannot be written.
pub fn save_cache<P: AsRef<Path>>(
    table: &SymbolTable,
    path: P,
    fingerprint: Option<[u8; 32]>,
) -> Result<(), CacheError> {
    let bytes = serialize_table(table, fingerprint)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Load a symbol table from a cache file without fingerprint verification.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the cache is invalid.
pub fn load_cache<P: AsRef<Path>>(path: P) -> Result<SymbolTable, CacheError> {
    let bytes = fs::read(path)?;
    deserialize_table(&bytes, None)
}

/// Load a symbol table from a cache file with fingerprint verification.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the cache is invalid,
/// or the fingerprint doesn't match.
pub fn load_cache_verified<P: AsRef<Path>>(
    path: P,
    expected_fingerprint: &[u8; 32],
) -> Result<SymbolTable, CacheError> {
    let bytes = fs::read(path)?;
    deserialize_table(&bytes, Some(expected_fingerprint))
}

#[cfg(test)]
mod tests {
    use super::*;
    use smic_core::{compile, CompileOptions};
    use tempfile::NamedTempFile;

    const SOURCE: &str = "TEST-MIB DEFINITIONS ::= BEGIN
        IMPORTS TEXTUAL-CONVENTION FROM SNMPv2-TC
                enterprises FROM SNMPv2-SMI;
        TestString ::= TEXTUAL-CONVENTION
            DISPLAY-HINT \"255a\"
            STATUS current
            DESCRIPTION \"cached\"
            SYNTAX OCTET STRING (SIZE (0..16))
        test-root OBJECT IDENTIFIER ::= { enterprises 9999 }
        END";

    fn table(retain_text: bool) -> SymbolTable {
        let options = CompileOptions::new().retain_text(retain_text);
        let module = compile(SOURCE, &options).unwrap();
        (*module.table).clone()
    }

    #[test]
    fn test_compute_fingerprint_deterministic() {
        let fp1 = compute_fingerprint("TEST-MIB", SOURCE.as_bytes());
        let fp2 = compute_fingerprint("TEST-MIB", SOURCE.as_bytes());
        assert_eq!(fp1, fp2);
    }

    #[test]
    fn test_compute_fingerprint_content_sensitive() {
        let fp1 = compute_fingerprint("TEST-MIB", b"content a");
        let fp2 = compute_fingerprint("TEST-MIB", b"content b");
        let fp3 = compute_fingerprint("OTHER-MIB", b"content a");
        assert_ne!(fp1, fp2);
        assert_ne!(fp1, fp3);
    }

    #[test]
    fn test_round_trip_keeps_texts_state() {
        for retain in [true, false] {
            let table = table(retain);
            let bytes = serialize_table(&table, None).unwrap();
            let restored = deserialize_table(&bytes, None).unwrap();
            assert_eq!(restored, table);
            let tc = restored.get("TestString").unwrap();
            assert_eq!(tc.description().is_ok(), retain);
        }
    }

    #[test]
    fn test_fingerprint_mismatch() {
        let fp = [42u8; 32];
        let bytes = serialize_table(&table(true), Some(fp)).unwrap();
        assert!(deserialize_table(&bytes, Some(&fp)).is_ok());
        assert!(matches!(
            deserialize_table(&bytes, Some(&[0u8; 32])),
            Err(CacheError::FingerprintMismatch)
        ));

        let unstamped = serialize_table(&table(true), None).unwrap();
        assert!(matches!(
            deserialize_table(&unstamped, Some(&fp)),
            Err(CacheError::FingerprintMismatch)
        ));
    }

    #[test]
    fn test_invalid_header() {
        assert!(matches!(get_fingerprint(b"SMI"), Err(CacheError::TruncatedHeader)));
        assert!(matches!(
            get_fingerprint(b"WMIB\x01\x00\x00\x00\x00"),
            Err(CacheError::InvalidMagic)
        ));
        assert!(matches!(
            get_fingerprint(b"SMIC\x63\x00\x00\x00\x00"),
            Err(CacheError::VersionMismatch { found: 99, .. })
        ));
        assert!(matches!(
            get_fingerprint(b"SMIC\x01\x00\x00\x00\x01\x02"),
            Err(CacheError::TruncatedHeader)
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let table = table(true);
        let fp = compute_fingerprint("TEST-MIB", SOURCE.as_bytes());

        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_owned();

        save_cache(&table, &path, Some(fp)).unwrap();
        assert_eq!(load_cache_verified(&path, &fp).unwrap(), table);
        assert_eq!(load_cache(&path).unwrap(), table);
    }
}

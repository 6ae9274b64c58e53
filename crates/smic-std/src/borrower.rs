//! Reusing previously compiled modules.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use smic_core::SymbolTable;
use tracing::debug;

use crate::cache::{self, compute_fingerprint, CacheError, EXTENSION};
use crate::reader::Source;

/// Supplies already-compiled tables so their modules need not be rebuilt.
///
/// Tables are keyed by the module name `source` declares, which may differ
/// from the name it was read under.
pub trait Borrower {
    /// A previously compiled table of `module` for `source`, if one is still
    /// valid.
    fn borrow(&self, module: &str, source: &Source) -> Option<Arc<SymbolTable>>;

    /// Remember `table`, compiled from `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be stored.
    fn store(&self, table: &SymbolTable, source: &Source) -> Result<(), CacheError>;
}

/// Borrows from `<dir>/<module>.smic` cache files.
///
/// Entries are stamped with a fingerprint of the module source; a stale
/// entry is never borrowed. An entry compiled with a different text
/// retention setting is refused too. A text filter is not part of the
/// fingerprint, so a cache must not be shared between runs with different
/// filters.
#[derive(Clone, Debug)]
pub struct CacheBorrower {
    dir: PathBuf,
    retain_text: bool,
}

impl CacheBorrower {
    /// Cache in `dir`; only tables matching `retain_text` are borrowed.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, retain_text: bool) -> Self {
        Self {
            dir: dir.into(),
            retain_text,
        }
    }

    fn path(&self, module: &str) -> PathBuf {
        self.dir.join(format!("{module}.{EXTENSION}"))
    }
}

impl Borrower for CacheBorrower {
    fn borrow(&self, module: &str, source: &Source) -> Option<Arc<SymbolTable>> {
        let path = self.path(module);
        if !path.is_file() {
            return None;
        }
        let fingerprint = compute_fingerprint(module, source.text.as_bytes());
        match cache::load_cache_verified(&path, &fingerprint) {
            Ok(table) if table.module() != module => {
                debug!(module, cached = table.module(), "cached table is for another module");
                None
            }
            Ok(table) if table.texts_retained() == self.retain_text => Some(Arc::new(table)),
            Ok(_) => {
                debug!(module, "cached table has different text retention");
                None
            }
            Err(e) => {
                debug!(module, error = %e, "cached table refused");
                None
            }
        }
    }

    fn store(&self, table: &SymbolTable, source: &Source) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir)?;
        let module = table.module();
        let fingerprint = compute_fingerprint(module, source.text.as_bytes());
        cache::save_cache(table, self.path(module), Some(fingerprint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smic_core::{compile, CompileOptions};
    use tempfile::TempDir;

    const TEXT: &str = "A-MIB DEFINITIONS ::= BEGIN
        aRoot OBJECT IDENTIFIER ::= { 1 3 6 }
        END";

    fn source(text: &str) -> Source {
        source_named("A-MIB", text)
    }

    fn source_named(name: &str, text: &str) -> Source {
        Source {
            module: name.into(),
            path: None,
            text: text.into(),
        }
    }

    fn table(retain_text: bool) -> SymbolTable {
        let options = CompileOptions::new().retain_text(retain_text);
        (*compile(TEXT, &options).unwrap().table).clone()
    }

    #[test]
    fn test_borrow_after_store() {
        let dir = TempDir::new().unwrap();
        let borrower = CacheBorrower::new(dir.path().join("cache"), true);
        assert!(borrower.borrow("A-MIB", &source(TEXT)).is_none());

        borrower.store(&table(true), &source(TEXT)).unwrap();
        assert!(dir.path().join("cache/A-MIB.smic").is_file());
        let borrowed = borrower.borrow("A-MIB", &source(TEXT)).unwrap();
        assert_eq!(*borrowed, table(true));
    }

    #[test]
    fn test_stale_entry_refused() {
        let dir = TempDir::new().unwrap();
        let borrower = CacheBorrower::new(dir.path(), true);
        borrower.store(&table(true), &source(TEXT)).unwrap();

        let edited = TEXT.replace("{ 1 3 6 }", "{ 1 3 7 }");
        assert!(borrower.borrow("A-MIB", &source(&edited)).is_none());
    }

    #[test]
    fn test_text_retention_mismatch_refused() {
        let dir = TempDir::new().unwrap();
        CacheBorrower::new(dir.path(), false)
            .store(&table(false), &source(TEXT))
            .unwrap();
        assert!(CacheBorrower::new(dir.path(), true)
            .borrow("A-MIB", &source(TEXT))
            .is_none());
        assert!(CacheBorrower::new(dir.path(), false)
            .borrow("A-MIB", &source(TEXT))
            .is_some());
    }

    #[test]
    fn test_keyed_by_declared_name() {
        let dir = TempDir::new().unwrap();
        let borrower = CacheBorrower::new(dir.path(), true);
        let renamed = source_named("a-mib-v2", TEXT);
        borrower.store(&table(true), &renamed).unwrap();

        assert!(dir.path().join("A-MIB.smic").is_file());
        assert!(!dir.path().join("a-mib-v2.smic").exists());
        assert!(borrower.borrow("A-MIB", &renamed).is_some());
        assert!(borrower.borrow("A-MIB", &source(TEXT)).is_some());
        assert!(borrower.borrow("a-mib-v2", &renamed).is_none());
    }

    #[test]
    fn test_entry_for_another_module_refused() {
        let dir = TempDir::new().unwrap();
        let borrower = CacheBorrower::new(dir.path(), true);
        borrower.store(&table(true), &source(TEXT)).unwrap();
        fs::copy(dir.path().join("A-MIB.smic"), dir.path().join("B-MIB.smic")).unwrap();
        assert!(borrower.borrow("B-MIB", &source(TEXT)).is_none());
    }

    #[test]
    fn test_corrupt_entry_refused() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("A-MIB.smic"), b"garbage").unwrap();
        let borrower = CacheBorrower::new(dir.path(), true);
        assert!(borrower.borrow("A-MIB", &source(TEXT)).is_none());
    }
}

//! Per-compilation configuration.

use core::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::model::SymbolTable;

/// Transform applied to retained DESCRIPTION and REFERENCE text.
///
/// Receives the symbol label and the raw quoted content.
pub type TextFilter = Arc<dyn Fn(&str, &str) -> String + Send + Sync>;

/// Options for [`compile`](crate::compile).
///
/// ```
/// use smic_core::CompileOptions;
///
/// let options = CompileOptions::new()
///     .retain_text(true)
///     .text_filter(|_label, text| text.trim().to_owned());
/// assert!(options.retains_text());
/// ```
#[derive(Clone)]
pub struct CompileOptions {
    retain_text: bool,
    text_filter: Option<TextFilter>,
    imported: IndexMap<String, Arc<SymbolTable>>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            retain_text: true,
            text_filter: None,
            imported: IndexMap::new(),
        }
    }
}

impl fmt::Debug for CompileOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompileOptions")
            .field("retain_text", &self.retain_text)
            .field("text_filter", &self.text_filter.is_some())
            .field("imported", &self.imported.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CompileOptions {
    /// Default options: texts retained, identity filter, no imported tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep STATUS, DESCRIPTION and REFERENCE on compiled symbols.
    ///
    /// DISPLAY-HINT is kept regardless, since it affects value rendering.
    #[must_use]
    pub fn retain_text(mut self, retain: bool) -> Self {
        self.retain_text = retain;
        self
    }

    /// Transform retained text before it is stored.
    #[must_use]
    pub fn text_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        self.text_filter = Some(Arc::new(filter));
        self
    }

    /// Supply the frozen table of an already compiled module.
    ///
    /// A later table for the same module replaces an earlier one.
    #[must_use]
    pub fn imported_table(mut self, table: Arc<SymbolTable>) -> Self {
        self.imported.insert(table.module().to_owned(), table);
        self
    }

    /// Supply several frozen tables.
    #[must_use]
    pub fn imported_tables<I>(self, tables: I) -> Self
    where
        I: IntoIterator<Item = Arc<SymbolTable>>,
    {
        tables.into_iter().fold(self, Self::imported_table)
    }

    /// Whether texts are retained.
    #[must_use]
    pub fn retains_text(&self) -> bool {
        self.retain_text
    }

    /// Frozen table supplied for `module`.
    #[must_use]
    pub fn imported(&self, module: &str) -> Option<&Arc<SymbolTable>> {
        self.imported.get(module)
    }

    /// Run the configured filter over `raw`; identity when none is set.
    #[must_use]
    pub fn filter_text(&self, label: &str, raw: &str) -> String {
        match &self.text_filter {
            Some(filter) => filter(label, raw),
            None => raw.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CompileOptions::default();
        assert!(options.retains_text());
        assert_eq!(options.filter_text("x", "  raw  "), "  raw  ");
        assert!(options.imported("SNMPv2-SMI").is_none());
    }

    #[test]
    fn test_filter_receives_label() {
        let options = CompileOptions::new().text_filter(|label, text| format!("{label}:{text}"));
        assert_eq!(options.filter_text("sysDescr", "d"), "sysDescr:d");
    }
}

//! Frozen per-module symbol tables.

use indexmap::IndexMap;

use super::{Oid, QualifiedName, Symbol};

/// A SEQUENCE row type.
///
/// Row types are not symbols, but their labels are unique among the
/// module's symbol labels.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowType {
    /// Label as written.
    pub label: String,
    /// Mangled label.
    pub mangled: String,
    /// Column labels in SEQUENCE order.
    pub columns: Vec<String>,
}

/// Module-level metadata of a compiled module.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleInfo {
    /// Module name.
    pub name: String,
    /// Declared symbol labels, in declaration order.
    pub labels: Vec<String>,
}

/// Per-module symbol table.
///
/// Maps original labels to symbols in declaration order, with a reverse
/// mapping from mangled identifiers. Built once by the resolver and never
/// mutated afterward; share it behind an `Arc`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolTable {
    module: String,
    imports: Vec<QualifiedName>,
    symbols: IndexMap<String, Symbol>,
    mangled: IndexMap<String, String>,
    row_types: IndexMap<String, RowType>,
    retain_text: bool,
}

impl SymbolTable {
    /// Assemble a table from fully resolved parts.
    ///
    /// Callers guarantee labels and mangled identifiers are unique.
    pub(crate) fn from_parts(
        module: String,
        imports: Vec<QualifiedName>,
        symbols: Vec<Symbol>,
        row_types: Vec<RowType>,
        retain_text: bool,
    ) -> Self {
        let mangled = symbols
            .iter()
            .map(|s| (s.mangled.clone(), s.label.clone()))
            .collect();
        Self {
            module,
            imports,
            symbols: symbols.into_iter().map(|s| (s.label.clone(), s)).collect(),
            mangled,
            row_types: row_types.into_iter().map(|r| (r.label.clone(), r)).collect(),
            retain_text,
        }
    }

    /// Module name.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Imported `(module, label)` references, in IMPORTS order.
    #[must_use]
    pub fn imports(&self) -> &[QualifiedName] {
        &self.imports
    }

    /// Whether STATUS/DESCRIPTION/REFERENCE were retained.
    #[must_use]
    pub fn texts_retained(&self) -> bool {
        self.retain_text
    }

    /// Number of declared symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True if the module declares no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Look up a symbol by original label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&Symbol> {
        self.symbols.get(label)
    }

    /// Look up a symbol by mangled identifier.
    #[must_use]
    pub fn get_mangled(&self, mangled: &str) -> Option<&Symbol> {
        self.mangled.get(mangled).and_then(|label| self.get(label))
    }

    /// Original label for a mangled identifier.
    #[must_use]
    pub fn label_of(&self, mangled: &str) -> Option<&str> {
        self.mangled.get(mangled).map(String::as_str)
    }

    /// Symbols in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    /// Labels in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(String::as_str)
    }

    /// Resolved OID of a symbol.
    #[must_use]
    pub fn oid(&self, label: &str) -> Option<&Oid> {
        self.get(label).and_then(Symbol::oid)
    }

    /// Look up a SEQUENCE row type.
    #[must_use]
    pub fn row_type(&self, label: &str) -> Option<&RowType> {
        self.row_types.get(label)
    }

    /// Row types in declaration order.
    pub fn row_types(&self) -> impl Iterator<Item = &RowType> {
        self.row_types.values()
    }

    /// Module name and declared labels.
    #[must_use]
    pub fn info(&self) -> ModuleInfo {
        ModuleInfo {
            name: self.module.clone(),
            labels: self.symbols.keys().cloned().collect(),
        }
    }

    /// Label to mangled identifier and OID, for every declared symbol.
    #[must_use]
    pub fn export_table(&self) -> ExportTable {
        ExportTable {
            entries: self
                .symbols
                .values()
                .map(|s| {
                    let export = Export {
                        mangled: s.mangled.clone(),
                        oid: s.oid().cloned(),
                    };
                    (s.label.clone(), export)
                })
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = &'a Symbol;
    type IntoIter = indexmap::map::Values<'a, String, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.values()
    }
}

/// One exported label.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Export {
    /// Mangled identifier.
    pub mangled: String,
    /// OID, for OID-valued symbols.
    pub oid: Option<Oid>,
}

/// A module's export table: original label to mangled identifier and OID.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExportTable {
    entries: IndexMap<String, Export>,
}

impl ExportTable {
    /// Mangled identifier of a label.
    #[must_use]
    pub fn mangled(&self, label: &str) -> Option<&str> {
        self.entries.get(label).map(|e| e.mangled.as_str())
    }

    /// OID of a label.
    #[must_use]
    pub fn oid(&self, label: &str) -> Option<&Oid> {
        self.entries.get(label).and_then(|e| e.oid.as_ref())
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Export)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BaseType, Descriptor, SymbolKind, TypeDescriptor, ValueDescriptor, ValueOrigin};

    fn table() -> SymbolTable {
        let ty = Symbol {
            label: "Test-TC".into(),
            mangled: "Test_TC".into(),
            module: "TEST-MIB".into(),
            kind: SymbolKind::TextualConvention,
            descriptor: Descriptor::Type(TypeDescriptor::primitive(BaseType::OctetString)),
            texts: None,
        };
        let value = Symbol {
            label: "test-root".into(),
            mangled: "test_root".into(),
            module: "TEST-MIB".into(),
            kind: SymbolKind::ObjectIdentifierValue,
            descriptor: Descriptor::Value(ValueDescriptor {
                oid: Oid::new(vec![1, 3]),
                origin: ValueOrigin::ValueAssignment,
                members: Vec::new(),
            }),
            texts: None,
        };
        SymbolTable::from_parts("TEST-MIB".into(), Vec::new(), vec![ty, value], Vec::new(), false)
    }

    #[test]
    fn test_lookup_by_label_and_mangled() {
        let t = table();
        assert_eq!(t.get("Test-TC").map(|s| s.kind), Some(SymbolKind::TextualConvention));
        assert_eq!(t.get_mangled("test_root").map(|s| s.label.as_str()), Some("test-root"));
        assert_eq!(t.label_of("Test_TC"), Some("Test-TC"));
        assert!(t.get("Test_TC").is_none());
    }

    #[test]
    fn test_declaration_order() {
        let t = table();
        assert_eq!(t.labels().collect::<Vec<_>>(), ["Test-TC", "test-root"]);
        assert_eq!(
            t.iter().map(|s| s.label.as_str()).collect::<Vec<_>>(),
            ["Test-TC", "test-root"]
        );
        assert_eq!(t.info().labels, ["Test-TC", "test-root"]);
    }

    #[test]
    fn test_export_table() {
        let exports = table().export_table();
        assert_eq!(exports.len(), 2);
        assert_eq!(exports.mangled("test-root"), Some("test_root"));
        assert_eq!(exports.oid("test-root").map(ToString::to_string), Some("1.3".into()));
        assert!(exports.oid("Test-TC").is_none());
    }
}

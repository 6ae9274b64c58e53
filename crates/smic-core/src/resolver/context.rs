//! Resolution context (registry and working state during resolution).

use std::sync::Arc;

use indexmap::IndexMap;

use super::builtins::{asn1_root, Builtin, OidRoot};
use crate::ast::{Definition, Module, SequenceField};
use crate::error::Error;
use crate::model::{Oid, QualifiedName, SymbolKind, SymbolTable, TypeDescriptor};
use crate::options::CompileOptions;

/// Resolution state of one symbol's descriptor or OID.
///
/// `InProgress` is the marker that turns a self-referencing chain into a
/// [`Error::CyclicDerivation`] instead of unbounded recursion.
#[derive(Clone, Debug, Default)]
pub enum Slot<T> {
    #[default]
    Pending,
    InProgress,
    Resolved(T),
}

/// A declared symbol as inventoried by registration.
#[derive(Debug)]
pub struct Entry<'a> {
    pub label: &'a str,
    pub mangled: String,
    pub kind: SymbolKind,
    pub definition: &'a Definition,
}

/// A SEQUENCE row type as inventoried by registration.
#[derive(Debug)]
pub struct Row<'a> {
    pub label: &'a str,
    pub mangled: String,
    pub fields: &'a [SequenceField],
}

/// Where an imported label was found.
#[derive(Clone, Debug)]
pub enum ImportSource {
    /// A supplied, already-compiled table.
    Table(Arc<SymbolTable>),
    /// Built-in base-module knowledge.
    Builtin(Builtin),
}

/// A validated import.
#[derive(Clone, Debug)]
pub struct Import {
    pub module: String,
    pub source: ImportSource,
}

/// Result of looking a label up in the module's scope.
#[derive(Clone, Copy, Debug)]
pub enum Scope {
    /// Declared in this module, by entry index.
    Local(usize),
    /// Imported, by import index.
    Imported(usize),
    /// One of the ASN.1 roots.
    Root(&'static OidRoot),
}

/// Resolution context for a single module.
pub struct ResolverContext<'a> {
    /// Module being resolved.
    pub module: &'a Module,
    /// Options of this compilation run.
    pub options: &'a CompileOptions,
    /// Declared symbols, by label, in declaration order.
    pub entries: IndexMap<&'a str, Entry<'a>>,
    /// Row types, by label, in declaration order.
    pub rows: IndexMap<&'a str, Row<'a>>,
    /// Mangled identifier -> label, over symbols and row types.
    pub mangled: IndexMap<String, &'a str>,
    /// Validated imports, by label.
    pub imports: IndexMap<&'a str, Import>,
    /// Every IMPORTS entry, in order.
    pub import_list: Vec<QualifiedName>,
    /// Type descriptor slots, indexed like `entries`.
    pub types: Vec<Slot<TypeDescriptor>>,
    /// OID slots, indexed like `entries`.
    pub oids: Vec<Slot<Oid>>,
    /// Labels currently being resolved, innermost last.
    pub stack: Vec<&'a str>,
}

impl<'a> ResolverContext<'a> {
    /// Create an empty context.
    pub fn new(module: &'a Module, options: &'a CompileOptions) -> Self {
        Self {
            module,
            options,
            entries: IndexMap::new(),
            rows: IndexMap::new(),
            mangled: IndexMap::new(),
            imports: IndexMap::new(),
            import_list: Vec::new(),
            types: Vec::new(),
            oids: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// Name of the module being resolved.
    pub fn name(&self) -> &'a str {
        &self.module.name.name
    }

    /// Look up a label.
    ///
    /// Order: declarations of this module, then imports, then the ASN.1
    /// roots, which are always in scope.
    pub fn lookup(&self, label: &str) -> Option<Scope> {
        if let Some(index) = self.entries.get_index_of(label) {
            return Some(Scope::Local(index));
        }
        if let Some(index) = self.imports.get_index_of(label) {
            return Some(Scope::Imported(index));
        }
        asn1_root(label).map(Scope::Root)
    }

    /// Validated import at `index`.
    pub fn import(&self, index: usize) -> Option<(&'a str, &Import)> {
        self.imports.get_index(index).map(|(label, import)| (*label, import))
    }

    /// Label and definition of the entry at `index`.
    pub fn entry(&self, index: usize) -> Option<&Entry<'a>> {
        self.entries.get_index(index).map(|(_, e)| e)
    }

    /// Qualified name for a label declared here.
    pub fn local_name(&self, label: &str) -> QualifiedName {
        QualifiedName::new(self.name(), label)
    }

    pub fn duplicate(&self, label: &str) -> Error {
        Error::DuplicateSymbol {
            module: self.name().to_owned(),
            label: label.to_owned(),
        }
    }

    /// Unresolved-reference error for `label`, naming the module it was
    /// imported from when there is one.
    pub fn unresolved(&self, label: &str) -> Error {
        Error::UnresolvedReference {
            module: self.name().to_owned(),
            label: label.to_owned(),
            reference_module: self.imports.get(label).map(|i| i.module.clone()),
        }
    }

    /// Cycle error for a chain that revisits `label`.
    pub fn cycle(&self, label: &str) -> Error {
        let start = self
            .stack
            .iter()
            .position(|l| *l == label)
            .unwrap_or(0);
        let mut chain: Vec<String> = self.stack[start..].iter().map(|l| (*l).to_owned()).collect();
        chain.push(label.to_owned());
        Error::CyclicDerivation {
            module: self.name().to_owned(),
            chain,
        }
    }
}

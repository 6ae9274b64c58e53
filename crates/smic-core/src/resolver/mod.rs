//! Symbol resolution for a parsed module.
//!
//! The resolver turns one module's AST into a frozen [`SymbolTable`]:
//!
//! - Registration of every declared label (pass 1)
//! - Import validation (against supplied tables and built-ins)
//! - Type resolution (inheritance along SYNTAX chains)
//! - OID evaluation
//! - Object syntax and cross-reference resolution
//!
//! # Pipeline
//!
//! ```text
//! AST Module → Resolver → SymbolTable
//! ```
//!
//! # Scope
//!
//! A label is looked up in the module's own declarations first, then in its
//! imports, then among the ASN.1 roots `ccitt`, `iso` and `joint-iso-ccitt`.
//! Type keywords such as `INTEGER` or `Counter32` need no import.
//!
//! Imports resolve through the tables of already-compiled modules supplied
//! in [`CompileOptions`], falling back to the built-in knowledge of the SMI
//! base modules:
//!
//! ```ignore
//! use smic_core::resolver::builtins::{lookup, Builtin};
//!
//! if let Some(Builtin::BaseType(ty)) = lookup("SNMPv2-SMI", "Counter32") {
//!     assert_eq!(ty.name(), "Counter32");
//! }
//! ```
//!
//! Any failure is fatal and no table is produced.

pub mod builtins;
mod context;
mod phases;

pub use builtins::{has_legacy_exports, is_base_module, BaseModule, Builtin, BuiltinTc, OidRoot};

use tracing::debug;

use crate::ast::Module;
use crate::error::Result;
use crate::model::SymbolTable;
use crate::options::CompileOptions;
use context::ResolverContext;
use phases::{
    build_descriptors, register_definitions, resolve_imports, resolve_oids, resolve_types,
};

/// Resolve a parsed module into a frozen symbol table.
///
/// # Errors
///
/// [`Error::DuplicateSymbol`](crate::Error::DuplicateSymbol),
/// [`Error::UnresolvedReference`](crate::Error::UnresolvedReference) or
/// [`Error::CyclicDerivation`](crate::Error::CyclicDerivation).
pub fn resolve(module: &Module, options: &CompileOptions) -> Result<SymbolTable> {
    let mut ctx = ResolverContext::new(module, options);

    // Pass 1
    register_definitions(&mut ctx)?;

    // Pass 2
    resolve_imports(&mut ctx)?;
    resolve_types(&mut ctx)?;
    resolve_oids(&mut ctx)?;
    let (symbols, rows) = build_descriptors(&mut ctx)?;

    let name = ctx.name().to_owned();
    debug!(module = %name, symbols = symbols.len(), "module resolved");
    Ok(SymbolTable::from_parts(
        name,
        std::mem::take(&mut ctx.import_list),
        symbols,
        rows,
        options.retains_text(),
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::Error;
    use crate::model::{BaseType, SymbolKind};
    use crate::parser::parse;

    fn resolve_source(source: &str, options: &CompileOptions) -> Result<SymbolTable> {
        resolve(&parse(source).unwrap(), options)
    }

    #[test]
    fn test_resolve_empty_module() {
        let table = resolve_source("EMPTY-MIB DEFINITIONS ::= BEGIN END", &CompileOptions::new())
            .unwrap();
        assert_eq!(table.module(), "EMPTY-MIB");
        assert!(table.is_empty());
        assert!(table.texts_retained());
    }

    #[test]
    fn test_resolve_against_supplied_table() {
        let base = resolve_source(
            "BASE-MIB DEFINITIONS ::= BEGIN
             IMPORTS enterprises FROM SNMPv2-SMI
                     TEXTUAL-CONVENTION FROM SNMPv2-TC;
             baseRoot OBJECT IDENTIFIER ::= { enterprises 4242 }
             BaseString ::= TEXTUAL-CONVENTION
                 DISPLAY-HINT \"255a\"
                 STATUS current
                 DESCRIPTION \"base\"
                 SYNTAX OCTET STRING (SIZE (0..64))
             END",
            &CompileOptions::new(),
        )
        .unwrap();

        let options = CompileOptions::new().imported_table(Arc::new(base));
        let table = resolve_source(
            "LEAF-MIB DEFINITIONS ::= BEGIN
             IMPORTS baseRoot, BaseString FROM BASE-MIB;
             leafRoot OBJECT IDENTIFIER ::= { baseRoot 1 }
             LeafString ::= BaseString (SIZE (0..8))
             END",
            &options,
        )
        .unwrap();

        assert_eq!(table.oid("leafRoot").unwrap().to_string(), "1.3.6.1.4.1.4242.1");
        let leaf = table.get("LeafString").unwrap();
        assert_eq!(leaf.kind, SymbolKind::TypeAlias);
        let td = leaf.type_descriptor().unwrap();
        assert_eq!(td.base, BaseType::OctetString);
        assert_eq!(td.display_hint, "255a");
        assert_eq!(td.parent.as_ref().map(ToString::to_string).as_deref(), Some("BASE-MIB.BaseString"));
        assert_eq!(table.imports().len(), 2);
    }

    #[test]
    fn test_missing_supplied_table_is_unresolved() {
        let err = resolve_source(
            "LEAF-MIB DEFINITIONS ::= BEGIN
             IMPORTS baseRoot FROM BASE-MIB;
             leafRoot OBJECT IDENTIFIER ::= { baseRoot 1 }
             END",
            &CompileOptions::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::UnresolvedReference {
                module: "LEAF-MIB".into(),
                label: "baseRoot".into(),
                reference_module: Some("BASE-MIB".into()),
            }
        );
    }
}

//! Code generation contract.
//!
//! A compiled module is handed to backends as a [`CompiledModule`]: the
//! frozen [`SymbolTable`] plus module metadata. Backends iterate symbols in
//! declaration order, read each symbol's kind, mangled identifier, label and
//! descriptor, and consult the [`ExportTable`] to emit cross references.
//! How a descriptor becomes output is entirely up to the backend.

use std::sync::Arc;

use crate::model::{ExportTable, ModuleInfo, Symbol, SymbolTable};

/// Output of a successful compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledModule {
    /// Module name and declared labels.
    pub info: ModuleInfo,
    /// Frozen symbol table.
    pub table: Arc<SymbolTable>,
}

impl CompiledModule {
    /// Wrap a frozen table.
    #[must_use]
    pub fn new(table: Arc<SymbolTable>) -> Self {
        Self {
            info: table.info(),
            table,
        }
    }

    /// Module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Symbols in declaration order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.table.iter()
    }

    /// Label to mangled identifier and OID.
    #[must_use]
    pub fn export_table(&self) -> ExportTable {
        self.table.export_table()
    }
}

/// A renderer for compiled modules.
pub trait Backend {
    /// Rendering failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Suffix appended to the module name to form an output file name.
    fn suffix(&self) -> &str;

    /// Render one module.
    fn render(&self, module: &CompiledModule) -> Result<Vec<u8>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;
    use core::fmt::Write as _;

    use super::*;
    use crate::{compile, CompileOptions};

    /// Renders `mangled kind oid` lines.
    struct Listing;

    impl Backend for Listing {
        type Error = Infallible;

        fn suffix(&self) -> &str {
            ".txt"
        }

        fn render(&self, module: &CompiledModule) -> Result<Vec<u8>, Infallible> {
            let exports = module.export_table();
            let mut out = String::new();
            for symbol in module.symbols() {
                let oid = exports
                    .oid(&symbol.label)
                    .map(ToString::to_string)
                    .unwrap_or_default();
                let _ = writeln!(out, "{} {} {oid}", symbol.mangled, symbol.kind.as_str());
            }
            Ok(out.into_bytes())
        }
    }

    #[test]
    fn test_backend_sees_declaration_order() {
        let module = compile(
            "TEST-MIB DEFINITIONS ::= BEGIN
             Test-Type ::= INTEGER
             test-root OBJECT IDENTIFIER ::= { 1 3 }
             END",
            &CompileOptions::new(),
        )
        .unwrap();
        assert_eq!(module.name(), "TEST-MIB");
        assert_eq!(module.info.labels, ["Test-Type", "test-root"]);

        let out = Listing.render(&module).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Test_Type type-alias \ntest_root object-identifier-value 1.3\n"
        );
    }
}

//! smic-core: SMI module compiler core
//!
//! This crate turns the source text of one SNMP MIB module into a frozen,
//! fully resolved symbol table. It performs no I/O: already-compiled
//! dependencies are supplied by the caller through [`CompileOptions`].
//!
//! # Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Resolver → SymbolTable → Backend
//! ```
//!
//! # Example
//!
//! ```
//! use smic_core::{compile, CompileOptions};
//!
//! let module = compile(
//!     "TEST-MIB DEFINITIONS ::= BEGIN
//!      IMPORTS enterprises FROM SNMPv2-SMI;
//!      test-root OBJECT IDENTIFIER ::= { enterprises 9999 }
//!      END",
//!     &CompileOptions::new(),
//! )?;
//! let root = module.table.get("test-root").unwrap();
//! assert_eq!(root.mangled, "test_root");
//! assert_eq!(root.oid().unwrap().to_string(), "1.3.6.1.4.1.9999");
//! # Ok::<(), smic_core::Error>(())
//! ```

pub mod ast;
pub mod backend;
pub mod error;
pub mod lexer;
pub mod model;
pub mod options;
pub mod parser;
pub mod resolver;
pub mod text;

use std::sync::Arc;

use tracing::instrument;

pub use backend::{Backend, CompiledModule};
pub use error::{Error, Result, TextNotRetained};
pub use model::{
    BaseType, Descriptor, ExportTable, ModuleInfo, Oid, QualifiedName, Symbol, SymbolKind,
    SymbolTable, TypeDescriptor,
};
pub use options::CompileOptions;
pub use text::{dedent, mangle};

/// Parse a module without resolving it.
///
/// # Errors
///
/// [`Error::Lex`] or [`Error::Syntax`].
pub fn parse_module(source: &str) -> Result<ast::Module> {
    Ok(parser::parse(source)?)
}

/// Compile one module: parse, run both resolution passes and freeze.
///
/// # Errors
///
/// The first fatal error of any stage. Nothing is produced for a module
/// that fails.
#[instrument(skip_all, fields(module))]
pub fn compile(source: &str, options: &CompileOptions) -> Result<CompiledModule> {
    let module = parse_module(source)?;
    tracing::Span::current().record("module", module.name.name.as_str());
    let table = resolver::resolve(&module, options)?;
    Ok(CompiledModule::new(Arc::new(table)))
}

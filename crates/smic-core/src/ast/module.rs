//! Module-level AST types.

use super::{Definition, Ident};
use crate::lexer::Span;

/// A parsed SMI module.
///
/// Represents the top-level structure of a module:
/// ```text
/// ModuleName DEFINITIONS ::= BEGIN
///     IMPORTS ... ;
///     <definitions>
/// END
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Module {
    /// Module name (e.g., `IF-MIB`, `SNMPv2-SMI`).
    pub name: Ident,
    /// Import clauses.
    pub imports: Vec<ImportClause>,
    /// Module body definitions, in source order.
    pub body: Vec<Definition>,
    /// Source location (entire module).
    pub span: Span,
}

impl Module {
    /// Create a new, empty module.
    #[must_use]
    pub fn new(name: Ident, span: Span) -> Self {
        Self {
            name,
            imports: Vec::new(),
            body: Vec::new(),
            span,
        }
    }

    /// Iterate over every `(symbol, source module)` import pair.
    pub fn imported_symbols(&self) -> impl Iterator<Item = (&Ident, &Ident)> {
        self.imports
            .iter()
            .flat_map(|clause| clause.symbols.iter().map(move |s| (s, &clause.from_module)))
    }

    /// Names of the modules this module imports from, first occurrence order.
    #[must_use]
    pub fn imported_modules(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for clause in &self.imports {
            let name = clause.from_module.name.as_str();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

/// An import clause specifying symbols imported from another module.
///
/// Example:
/// ```text
/// IMPORTS
///     MODULE-IDENTITY, OBJECT-TYPE
///         FROM SNMPv2-SMI
///     DisplayString
///         FROM SNMPv2-TC;
/// ```
///
/// Each `ImportClause` represents one `<symbols> FROM <module>` group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportClause {
    /// Symbols being imported.
    pub symbols: Vec<Ident>,
    /// Source module name.
    pub from_module: Ident,
    /// Source location (covers `<symbols> FROM <module>`).
    pub span: Span,
}

impl ImportClause {
    /// Create a new import clause.
    #[must_use]
    pub fn new(symbols: Vec<Ident>, from_module: Ident, span: Span) -> Self {
        Self {
            symbols,
            from_module,
            span,
        }
    }
}

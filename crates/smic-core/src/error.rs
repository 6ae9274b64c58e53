//! Compilation errors.
//!
//! Every error is fatal to the module being compiled: the pipeline stops at
//! the first one and produces no partial output.

use thiserror::Error;

use crate::lexer::LexError;
use crate::parser::{ParseError, SyntaxError};

/// Result alias for compilation.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Fatal compilation error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed token.
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    /// Token sequence does not match the grammar.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// A label (or its mangled form) is declared twice in one module.
    #[error("duplicate symbol `{label}` in module {module}")]
    DuplicateSymbol {
        /// Module being compiled.
        module: String,
        /// The repeated label.
        label: String,
    },

    /// A type, value or cross reference resolves in neither the module nor
    /// its supplied imports.
    #[error(
        "unresolved reference `{label}` in module {module}{}",
        .reference_module.as_deref().map(|m| format!(" (imported from {m})")).unwrap_or_default()
    )]
    UnresolvedReference {
        /// Module being compiled.
        module: String,
        /// Label that failed to resolve.
        label: String,
        /// Module the label was expected to come from, if imported.
        reference_module: Option<String>,
    },

    /// A SYNTAX or OID chain revisits a symbol that is still being resolved.
    #[error("cyclic derivation in module {module}: {}", .chain.join(" -> "))]
    CyclicDerivation {
        /// Module being compiled.
        module: String,
        /// Labels along the cycle, ending with the revisited one.
        chain: Vec<String>,
    },
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Lex(e) => Self::Lex(e),
            ParseError::Syntax(e) => Self::Syntax(e),
        }
    }
}

/// Returned when querying STATUS, DESCRIPTION or REFERENCE on a symbol
/// compiled with text retention disabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("texts were not retained for this compilation")]
pub struct TextNotRetained;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_display() {
        let err = Error::UnresolvedReference {
            module: "TEST-MIB".into(),
            label: "missing".into(),
            reference_module: Some("OTHER-MIB".into()),
        };
        assert_eq!(
            err.to_string(),
            "unresolved reference `missing` in module TEST-MIB (imported from OTHER-MIB)"
        );

        let err = Error::UnresolvedReference {
            module: "TEST-MIB".into(),
            label: "missing".into(),
            reference_module: None,
        };
        assert_eq!(err.to_string(), "unresolved reference `missing` in module TEST-MIB");
    }

    #[test]
    fn test_cycle_display() {
        let err = Error::CyclicDerivation {
            module: "M".into(),
            chain: vec!["A".into(), "B".into(), "A".into()],
        };
        assert_eq!(err.to_string(), "cyclic derivation in module M: A -> B -> A");
    }
}

//! Resolved symbol model.
//!
//! The model is the output of the resolver and the input of every backend:
//!
//! ```text
//! Source → Lexer → Parser → AST → Resolver → [SymbolTable]
//! ```
//!
//! A [`SymbolTable`] holds one [`Symbol`] per declared label. Each symbol
//! carries a [`Descriptor`]: a [`TypeDescriptor`] for type aliases and
//! textual conventions, or a resolved [`Oid`] plus kind-specific details for
//! everything else.

mod oid;
mod symbol;
mod table;
mod types;

pub use oid::Oid;
pub use symbol::{
    Descriptor, IndexEntry, NotificationDescriptor, ObjectDescriptor, ObjectSyntax,
    QualifiedName, Symbol, SymbolKind, Texts, TrapInfo, ValueDescriptor, ValueOrigin,
};
pub use table::{Export, ExportTable, ModuleInfo, RowType, SymbolTable};
pub use types::{
    Access, BaseType, Constraint, NamedValues, RangeBound, SizeConstraint, Status,
    TypeDescriptor, ValueConstraint,
};

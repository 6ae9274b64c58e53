//! Abstract Syntax Tree types for parsed SMI modules.
//!
//! The AST captures syntactic structure as written, preserving source
//! locations. Labels keep their hyphens; mangling and every kind of
//! cross-reference resolution happen in the resolver.

mod common;
mod definition;
mod module;
mod oid;
mod syntax;

pub use common::{Ident, NamedNumber, QuotedString};
pub use definition::{
    AgentCapabilitiesDef, Definition, MacroDefinitionDef, ModuleComplianceDef, ModuleIdentityDef,
    NotificationGroupDef, NotificationTypeDef, ObjectGroupDef, ObjectIdentityDef, ObjectTypeDef,
    TextualConventionDef, TrapTypeDef, TypeAssignmentDef, ValueAssignmentDef,
};
pub use module::{ImportClause, Module};
pub use oid::{OidAssignment, OidComponent};
pub use syntax::{
    AccessClause, AccessKeyword, AccessValue, AugmentsClause, Constraint, DefValClause,
    IndexClause, IndexItem, Range, RangeValue, RevisionClause, SequenceField, StatusClause,
    StatusValue, SyntaxClause, TypeSyntax,
};

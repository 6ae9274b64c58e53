//! Definition AST types.
//!
//! Each definition corresponds to a "statement" in a module body.

use super::{
    AccessClause, AugmentsClause, DefValClause, Ident, IndexClause, OidAssignment, QuotedString,
    RevisionClause, StatusClause, SyntaxClause, TypeSyntax,
};
use crate::lexer::Span;

/// A definition in a module body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Definition {
    /// `name OBJECT-TYPE SYNTAX ... ::= { parent subid }`
    ObjectType(ObjectTypeDef),

    /// `name MODULE-IDENTITY ... ::= { parent subid }`
    ModuleIdentity(ModuleIdentityDef),

    /// `name OBJECT-IDENTITY ... ::= { parent subid }`
    ObjectIdentity(ObjectIdentityDef),

    /// `name NOTIFICATION-TYPE ... ::= { parent subid }`
    NotificationType(NotificationTypeDef),

    /// `name TRAP-TYPE ... ::= number` (SMIv1)
    TrapType(TrapTypeDef),

    /// `Name ::= TEXTUAL-CONVENTION ... SYNTAX ...`
    TextualConvention(TextualConventionDef),

    /// `Name ::= typereference` or `Name ::= SEQUENCE { ... }`
    TypeAssignment(TypeAssignmentDef),

    /// `name OBJECT IDENTIFIER ::= { parent subid }`
    ValueAssignment(ValueAssignmentDef),

    /// `name OBJECT-GROUP OBJECTS { ... } ::= { parent subid }`
    ObjectGroup(ObjectGroupDef),

    /// `name NOTIFICATION-GROUP NOTIFICATIONS { ... } ::= { parent subid }`
    NotificationGroup(NotificationGroupDef),

    /// `name MODULE-COMPLIANCE ... ::= { parent subid }`
    ModuleCompliance(ModuleComplianceDef),

    /// `name AGENT-CAPABILITIES ... ::= { parent subid }`
    AgentCapabilities(AgentCapabilitiesDef),

    /// `NAME MACRO ::= BEGIN ... END`, body skipped by the lexer.
    MacroDefinition(MacroDefinitionDef),
}

impl Definition {
    /// Get the name of this definition.
    #[must_use]
    pub fn name(&self) -> &Ident {
        match self {
            Self::ObjectType(d) => &d.name,
            Self::ModuleIdentity(d) => &d.name,
            Self::ObjectIdentity(d) => &d.name,
            Self::NotificationType(d) => &d.name,
            Self::TrapType(d) => &d.name,
            Self::TextualConvention(d) => &d.name,
            Self::TypeAssignment(d) => &d.name,
            Self::ValueAssignment(d) => &d.name,
            Self::ObjectGroup(d) => &d.name,
            Self::NotificationGroup(d) => &d.name,
            Self::ModuleCompliance(d) => &d.name,
            Self::AgentCapabilities(d) => &d.name,
            Self::MacroDefinition(d) => &d.name,
        }
    }

    /// Get the span of this definition.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::ObjectType(d) => d.span,
            Self::ModuleIdentity(d) => d.span,
            Self::ObjectIdentity(d) => d.span,
            Self::NotificationType(d) => d.span,
            Self::TrapType(d) => d.span,
            Self::TextualConvention(d) => d.span,
            Self::TypeAssignment(d) => d.span,
            Self::ValueAssignment(d) => d.span,
            Self::ObjectGroup(d) => d.span,
            Self::NotificationGroup(d) => d.span,
            Self::ModuleCompliance(d) => d.span,
            Self::AgentCapabilities(d) => d.span,
            Self::MacroDefinition(d) => d.span,
        }
    }

    /// Get the OID value clause, for definitions that carry one.
    #[must_use]
    pub fn oid_assignment(&self) -> Option<&OidAssignment> {
        match self {
            Self::ObjectType(d) => Some(&d.oid_assignment),
            Self::ModuleIdentity(d) => Some(&d.oid_assignment),
            Self::ObjectIdentity(d) => Some(&d.oid_assignment),
            Self::NotificationType(d) => Some(&d.oid_assignment),
            Self::ValueAssignment(d) => Some(&d.oid_assignment),
            Self::ObjectGroup(d) => Some(&d.oid_assignment),
            Self::NotificationGroup(d) => Some(&d.oid_assignment),
            Self::ModuleCompliance(d) => Some(&d.oid_assignment),
            Self::AgentCapabilities(d) => Some(&d.oid_assignment),
            Self::TrapType(_)
            | Self::TextualConvention(_)
            | Self::TypeAssignment(_)
            | Self::MacroDefinition(_) => None,
        }
    }
}

/// OBJECT-TYPE definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectTypeDef {
    /// Object name.
    pub name: Ident,
    /// SYNTAX clause.
    pub syntax: SyntaxClause,
    /// UNITS clause.
    pub units: Option<QuotedString>,
    /// MAX-ACCESS or ACCESS clause.
    pub access: Option<AccessClause>,
    /// STATUS clause.
    pub status: Option<StatusClause>,
    /// DESCRIPTION clause.
    pub description: Option<QuotedString>,
    /// REFERENCE clause.
    pub reference: Option<QuotedString>,
    /// INDEX clause.
    pub index: Option<IndexClause>,
    /// AUGMENTS clause.
    pub augments: Option<AugmentsClause>,
    /// DEFVAL clause.
    pub defval: Option<DefValClause>,
    /// OID value clause.
    pub oid_assignment: OidAssignment,
    /// Source location.
    pub span: Span,
}

/// MODULE-IDENTITY definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleIdentityDef {
    /// Identity name.
    pub name: Ident,
    /// LAST-UPDATED value.
    pub last_updated: QuotedString,
    /// ORGANIZATION value.
    pub organization: QuotedString,
    /// CONTACT-INFO value.
    pub contact_info: QuotedString,
    /// DESCRIPTION value.
    pub description: QuotedString,
    /// REVISION clauses.
    pub revisions: Vec<RevisionClause>,
    /// OID value clause.
    pub oid_assignment: OidAssignment,
    /// Source location.
    pub span: Span,
}

/// OBJECT-IDENTITY definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectIdentityDef {
    /// Identity name.
    pub name: Ident,
    /// STATUS clause.
    pub status: StatusClause,
    /// DESCRIPTION value.
    pub description: QuotedString,
    /// REFERENCE value.
    pub reference: Option<QuotedString>,
    /// OID value clause.
    pub oid_assignment: OidAssignment,
    /// Source location.
    pub span: Span,
}

/// NOTIFICATION-TYPE definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationTypeDef {
    /// Notification name.
    pub name: Ident,
    /// OBJECTS list.
    pub objects: Vec<Ident>,
    /// STATUS clause.
    pub status: StatusClause,
    /// DESCRIPTION value.
    pub description: QuotedString,
    /// REFERENCE value.
    pub reference: Option<QuotedString>,
    /// OID value clause.
    pub oid_assignment: OidAssignment,
    /// Source location.
    pub span: Span,
}

/// TRAP-TYPE definition (SMIv1).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrapTypeDef {
    /// Trap name.
    pub name: Ident,
    /// ENTERPRISE reference.
    pub enterprise: Ident,
    /// VARIABLES list.
    pub variables: Vec<Ident>,
    /// DESCRIPTION value.
    pub description: Option<QuotedString>,
    /// REFERENCE value.
    pub reference: Option<QuotedString>,
    /// Specific trap number.
    pub trap_number: u32,
    /// Source location.
    pub span: Span,
}

/// TEXTUAL-CONVENTION definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextualConventionDef {
    /// TC name.
    pub name: Ident,
    /// DISPLAY-HINT value.
    pub display_hint: Option<QuotedString>,
    /// STATUS clause.
    pub status: StatusClause,
    /// DESCRIPTION value.
    pub description: QuotedString,
    /// REFERENCE value.
    pub reference: Option<QuotedString>,
    /// SYNTAX clause.
    pub syntax: SyntaxClause,
    /// Source location.
    pub span: Span,
}

/// Plain type assignment.
///
/// `Name ::= Syntax`, including `SEQUENCE { ... }` row types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeAssignmentDef {
    /// Type name.
    pub name: Ident,
    /// Assigned syntax.
    pub syntax: TypeSyntax,
    /// Source location.
    pub span: Span,
}

/// OBJECT IDENTIFIER value assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueAssignmentDef {
    /// Value name.
    pub name: Ident,
    /// OID value clause.
    pub oid_assignment: OidAssignment,
    /// Source location.
    pub span: Span,
}

/// OBJECT-GROUP definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectGroupDef {
    /// Group name.
    pub name: Ident,
    /// OBJECTS list.
    pub objects: Vec<Ident>,
    /// STATUS clause.
    pub status: StatusClause,
    /// DESCRIPTION value.
    pub description: QuotedString,
    /// REFERENCE value.
    pub reference: Option<QuotedString>,
    /// OID value clause.
    pub oid_assignment: OidAssignment,
    /// Source location.
    pub span: Span,
}

/// NOTIFICATION-GROUP definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationGroupDef {
    /// Group name.
    pub name: Ident,
    /// NOTIFICATIONS list.
    pub notifications: Vec<Ident>,
    /// STATUS clause.
    pub status: StatusClause,
    /// DESCRIPTION value.
    pub description: QuotedString,
    /// REFERENCE value.
    pub reference: Option<QuotedString>,
    /// OID value clause.
    pub oid_assignment: OidAssignment,
    /// Source location.
    pub span: Span,
}

/// MODULE-COMPLIANCE definition.
///
/// Only the header clauses are kept; MODULE sections are skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleComplianceDef {
    /// Compliance name.
    pub name: Ident,
    /// STATUS clause.
    pub status: StatusClause,
    /// DESCRIPTION value.
    pub description: QuotedString,
    /// REFERENCE value.
    pub reference: Option<QuotedString>,
    /// OID value clause.
    pub oid_assignment: OidAssignment,
    /// Source location.
    pub span: Span,
}

/// AGENT-CAPABILITIES definition.
///
/// Only the header clauses are kept; SUPPORTS sections are skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentCapabilitiesDef {
    /// Capabilities name.
    pub name: Ident,
    /// PRODUCT-RELEASE value.
    pub product_release: QuotedString,
    /// STATUS clause.
    pub status: StatusClause,
    /// DESCRIPTION value.
    pub description: QuotedString,
    /// REFERENCE value.
    pub reference: Option<QuotedString>,
    /// OID value clause.
    pub oid_assignment: OidAssignment,
    /// Source location.
    pub span: Span,
}

/// MACRO definition (content skipped).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MacroDefinitionDef {
    /// Macro name.
    pub name: Ident,
    /// Source location.
    pub span: Span,
}

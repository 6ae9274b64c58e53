//! Declared symbols and their resolved descriptors.

use core::fmt;

use super::{Access, Oid, Status, TypeDescriptor};
use crate::error::TextNotRetained;

/// A `(module, label)` reference to a symbol in some module.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QualifiedName {
    /// Declaring module.
    pub module: String,
    /// Original label.
    pub label: String,
}

impl QualifiedName {
    /// Create a qualified name.
    #[must_use]
    pub fn new(module: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            label: label.into(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.label)
    }
}

/// Kind of a declared symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymbolKind {
    /// `Name ::= Syntax`
    TypeAlias,
    /// `Name ::= TEXTUAL-CONVENTION ...`
    TextualConvention,
    /// `name OBJECT-TYPE ...`
    ObjectType,
    /// `name NOTIFICATION-TYPE ...` or SMIv1 `TRAP-TYPE`
    NotificationType,
    /// Any other construct whose value is an OID.
    ObjectIdentifierValue,
}

impl SymbolKind {
    /// Stable name for diagnostics and rendered output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeAlias => "type-alias",
            Self::TextualConvention => "textual-convention",
            Self::ObjectType => "object-type",
            Self::NotificationType => "notification-type",
            Self::ObjectIdentifierValue => "object-identifier-value",
        }
    }

    /// True for the two kinds that carry a [`TypeDescriptor`].
    #[must_use]
    pub const fn is_type(self) -> bool {
        matches!(self, Self::TypeAlias | Self::TextualConvention)
    }
}

/// STATUS, DESCRIPTION and REFERENCE of a declaration.
///
/// Each is taken from the symbol's own declaration and never inherited.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Texts {
    /// STATUS clause.
    pub status: Option<Status>,
    /// DESCRIPTION clause, after the caller's text filter.
    pub description: Option<String>,
    /// REFERENCE clause, after the caller's text filter.
    pub reference: Option<String>,
}

/// One declared name within a module.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Symbol {
    /// Label as written, hyphens included.
    pub label: String,
    /// Label with every hyphen replaced by an underscore.
    pub mangled: String,
    /// Declaring module.
    pub module: String,
    /// Kind of declaration.
    pub kind: SymbolKind,
    /// Resolved descriptor.
    pub descriptor: Descriptor,
    /// `None` when the compilation run disabled text retention.
    pub(crate) texts: Option<Texts>,
}

impl Symbol {
    /// Qualified name of this symbol.
    #[must_use]
    pub fn qualified_name(&self) -> QualifiedName {
        QualifiedName::new(&self.module, &self.label)
    }

    /// Retained texts.
    ///
    /// # Errors
    ///
    /// [`TextNotRetained`] if the table was compiled with retention disabled.
    pub fn texts(&self) -> Result<&Texts, TextNotRetained> {
        self.texts.as_ref().ok_or(TextNotRetained)
    }

    /// Declared STATUS.
    ///
    /// # Errors
    ///
    /// [`TextNotRetained`] if the table was compiled with retention disabled.
    pub fn status(&self) -> Result<Option<Status>, TextNotRetained> {
        Ok(self.texts()?.status)
    }

    /// Declared DESCRIPTION.
    ///
    /// # Errors
    ///
    /// [`TextNotRetained`] if the table was compiled with retention disabled.
    pub fn description(&self) -> Result<Option<&str>, TextNotRetained> {
        Ok(self.texts()?.description.as_deref())
    }

    /// Declared REFERENCE.
    ///
    /// # Errors
    ///
    /// [`TextNotRetained`] if the table was compiled with retention disabled.
    pub fn reference(&self) -> Result<Option<&str>, TextNotRetained> {
        Ok(self.texts()?.reference.as_deref())
    }

    /// Type descriptor of a type alias or textual convention.
    #[must_use]
    pub fn type_descriptor(&self) -> Option<&TypeDescriptor> {
        match &self.descriptor {
            Descriptor::Type(td) => Some(td),
            _ => None,
        }
    }

    /// Resolved OID of an OID-valued symbol.
    #[must_use]
    pub fn oid(&self) -> Option<&Oid> {
        self.descriptor.oid()
    }
}

/// Resolved content of a symbol, by kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Descriptor {
    /// Type alias or textual convention.
    Type(TypeDescriptor),
    /// OBJECT-TYPE.
    Object(ObjectDescriptor),
    /// NOTIFICATION-TYPE or TRAP-TYPE.
    Notification(NotificationDescriptor),
    /// Any other OID-valued construct.
    Value(ValueDescriptor),
}

impl Descriptor {
    /// Resolved OID, for every kind except types.
    #[must_use]
    pub fn oid(&self) -> Option<&Oid> {
        match self {
            Self::Type(_) => None,
            Self::Object(d) => Some(&d.oid),
            Self::Notification(d) => Some(&d.oid),
            Self::Value(d) => Some(&d.oid),
        }
    }
}

/// Resolved OBJECT-TYPE.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectDescriptor {
    /// Resolved OID.
    pub oid: Oid,
    /// Resolved SYNTAX.
    pub syntax: ObjectSyntax,
    /// MAX-ACCESS or ACCESS.
    pub access: Option<Access>,
    /// UNITS text.
    pub units: Option<String>,
    /// INDEX entries, for conceptual rows.
    pub index: Vec<IndexEntry>,
    /// AUGMENTS target, for conceptual rows.
    pub augments: Option<QualifiedName>,
    /// DEFVAL content as written.
    pub defval: Option<String>,
}

/// Resolved SYNTAX of an OBJECT-TYPE.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectSyntax {
    /// Scalar or columnar value with an inline descriptor.
    Scalar(TypeDescriptor),
    /// `SEQUENCE OF Entry`
    Table {
        /// Row type label.
        entry: String,
    },
    /// Conceptual row of the given row type.
    Row {
        /// Row type label.
        entry: String,
    },
}

/// One INDEX entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexEntry {
    /// Index object.
    pub object: QualifiedName,
    /// Whether the entry is IMPLIED.
    pub implied: bool,
}

/// Resolved NOTIFICATION-TYPE or TRAP-TYPE.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NotificationDescriptor {
    /// Resolved OID.
    pub oid: Oid,
    /// OBJECTS (or VARIABLES), fully qualified.
    pub objects: Vec<QualifiedName>,
    /// SMIv1 trap details.
    pub trap: Option<TrapInfo>,
}

/// ENTERPRISE and specific-trap number of an SMIv1 TRAP-TYPE.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrapInfo {
    /// ENTERPRISE reference.
    pub enterprise: QualifiedName,
    /// Specific trap number.
    pub number: u32,
}

/// Resolved OID-valued construct that is not an object or notification.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueDescriptor {
    /// Resolved OID.
    pub oid: Oid,
    /// Construct that declared the value.
    pub origin: ValueOrigin,
    /// OBJECTS or NOTIFICATIONS of a group, fully qualified.
    pub members: Vec<QualifiedName>,
}

/// The construct that declared an OID value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueOrigin {
    /// `name OBJECT IDENTIFIER ::= { ... }`
    ValueAssignment,
    /// MODULE-IDENTITY
    ModuleIdentity,
    /// OBJECT-IDENTITY
    ObjectIdentity,
    /// OBJECT-GROUP
    ObjectGroup,
    /// NOTIFICATION-GROUP
    NotificationGroup,
    /// MODULE-COMPLIANCE
    ModuleCompliance,
    /// AGENT-CAPABILITIES
    AgentCapabilities,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BaseType;

    fn symbol(texts: Option<Texts>) -> Symbol {
        Symbol {
            label: "test-type".into(),
            mangled: "test_type".into(),
            module: "TEST-MIB".into(),
            kind: SymbolKind::TypeAlias,
            descriptor: Descriptor::Type(TypeDescriptor::primitive(BaseType::Integer32)),
            texts,
        }
    }

    #[test]
    fn test_text_states_are_distinct() {
        let retained = symbol(Some(Texts {
            status: Some(Status::Current),
            description: Some("d".into()),
            reference: None,
        }));
        assert_eq!(retained.description(), Ok(Some("d")));
        assert_eq!(retained.reference(), Ok(None));
        assert_eq!(retained.status(), Ok(Some(Status::Current)));

        let dropped = symbol(None);
        assert_eq!(dropped.description(), Err(TextNotRetained));
        assert_eq!(dropped.reference(), Err(TextNotRetained));
        assert_eq!(dropped.status(), Err(TextNotRetained));
    }

    #[test]
    fn test_type_symbol_has_no_oid() {
        let sym = symbol(None);
        assert!(sym.oid().is_none());
        assert!(sym.type_descriptor().is_some());
        assert_eq!(sym.qualified_name().to_string(), "TEST-MIB.test-type");
    }
}

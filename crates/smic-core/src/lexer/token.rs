//! Token types, spans and source positions.

use core::fmt;

use super::ByteOffset;

/// Span of source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: ByteOffset,
    /// End byte offset (exclusive).
    pub end: ByteOffset,
}

impl Span {
    /// Create a new span.
    #[must_use]
    pub const fn new(start: ByteOffset, end: ByteOffset) -> Self {
        Self { start, end }
    }

    /// Get the length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> ByteOffset {
        self.end - self.start
    }

    /// Check if the span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A location in source text.
///
/// Lines and columns are 1-based; columns count bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Byte offset from the start of the source.
    pub offset: ByteOffset,
    /// Line number.
    pub line: u32,
    /// Column number.
    pub column: u32,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A lexical token.
///
/// Borrows its literal text from the source, so quoted strings keep their
/// surrounding quotes and any embedded newlines or backslashes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'src> {
    /// The kind of token.
    pub kind: TokenKind,
    /// Literal source text.
    pub text: &'src str,
    /// Location in source text.
    pub span: Span,
    /// Line and column of the first byte.
    pub position: Position,
}

impl<'src> Token<'src> {
    /// Create a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, text: &'src str, span: Span, position: Position) -> Self {
        Self {
            kind,
            text,
            span,
            position,
        }
    }
}

/// Token kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    // === Special ===
    /// End of input.
    Eof = 0,

    // === Identifiers ===
    /// Uppercase identifier (module names, type names).
    UppercaseIdent,
    /// Lowercase identifier (object names, enum labels).
    LowercaseIdent,

    // === Literals ===
    /// Unsigned decimal number.
    Number,
    /// Signed decimal number (negative).
    NegativeNumber,
    /// Quoted string literal.
    QuotedString,
    /// Hex string literal ('...'H).
    HexString,
    /// Binary string literal ('...'B).
    BinString,

    // === Single-character punctuation ===
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `|`
    Pipe,
    /// `-`
    Minus,

    // === Multi-character operators ===
    /// `..`
    DotDot,
    /// `::=`
    ColonColonEqual,

    // === Structural keywords ===
    /// `DEFINITIONS`
    KwDefinitions,
    /// `BEGIN`
    KwBegin,
    /// `END`
    KwEnd,
    /// `IMPORTS`
    KwImports,
    /// `EXPORTS`
    KwExports,
    /// `FROM`
    KwFrom,
    /// `OBJECT`
    KwObject,
    /// `IDENTIFIER`
    KwIdentifier,
    /// `SEQUENCE`
    KwSequence,
    /// `OF`
    KwOf,
    /// `MACRO`
    KwMacro,

    // === Clause keywords ===
    /// `SYNTAX`
    KwSyntax,
    /// `MAX-ACCESS`
    KwMaxAccess,
    /// `ACCESS`
    KwAccess,
    /// `STATUS`
    KwStatus,
    /// `DESCRIPTION`
    KwDescription,
    /// `REFERENCE`
    KwReference,
    /// `INDEX`
    KwIndex,
    /// `DEFVAL`
    KwDefval,
    /// `AUGMENTS`
    KwAugments,
    /// `UNITS`
    KwUnits,
    /// `DISPLAY-HINT`
    KwDisplayHint,
    /// `OBJECTS`
    KwObjects,
    /// `NOTIFICATIONS`
    KwNotifications,
    /// `MODULE`
    KwModule,
    /// `PRODUCT-RELEASE`
    KwProductRelease,
    /// `REVISION`
    KwRevision,
    /// `LAST-UPDATED`
    KwLastUpdated,
    /// `ORGANIZATION`
    KwOrganization,
    /// `CONTACT-INFO`
    KwContactInfo,
    /// `IMPLIED`
    KwImplied,
    /// `SIZE`
    KwSize,
    /// `ENTERPRISE`
    KwEnterprise,
    /// `VARIABLES`
    KwVariables,

    // === MACRO invocation keywords ===
    /// `MODULE-IDENTITY`
    KwModuleIdentity,
    /// `MODULE-COMPLIANCE`
    KwModuleCompliance,
    /// `OBJECT-GROUP`
    KwObjectGroup,
    /// `NOTIFICATION-GROUP`
    KwNotificationGroup,
    /// `AGENT-CAPABILITIES`
    KwAgentCapabilities,
    /// `OBJECT-TYPE`
    KwObjectType,
    /// `OBJECT-IDENTITY`
    KwObjectIdentity,
    /// `NOTIFICATION-TYPE`
    KwNotificationType,
    /// `TEXTUAL-CONVENTION`
    KwTextualConvention,
    /// `TRAP-TYPE`
    KwTrapType,

    // === Type keywords ===
    /// `INTEGER`
    KwInteger,
    /// `Integer32`
    KwInteger32,
    /// `Unsigned32`
    KwUnsigned32,
    /// `Counter32`
    KwCounter32,
    /// `Counter64`
    KwCounter64,
    /// `Gauge32`
    KwGauge32,
    /// `IpAddress`
    KwIpAddress,
    /// `Opaque`
    KwOpaque,
    /// `TimeTicks`
    KwTimeTicks,
    /// `BITS`
    KwBits,
    /// `OCTET`
    KwOctet,
    /// `STRING`
    KwString,

    // === SMIv1 type aliases ===
    /// `Counter` (normalized to `Counter32`).
    KwCounter,
    /// `Gauge` (normalized to `Gauge32`).
    KwGauge,
    /// `NetworkAddress` (normalized to `IpAddress`).
    KwNetworkAddress,

    // === ASN.1 tag keywords ===
    /// `APPLICATION`
    KwApplication,
    /// `IMPLICIT`
    KwImplicit,
    /// `UNIVERSAL`
    KwUniversal,

    // === Status/Access value keywords ===
    /// `current`
    KwCurrent,
    /// `deprecated`
    KwDeprecated,
    /// `obsolete`
    KwObsolete,
    /// `mandatory` (v1 status).
    KwMandatory,
    /// `optional` (v1 status).
    KwOptional,
    /// `read-only`
    KwReadOnly,
    /// `read-write`
    KwReadWrite,
    /// `read-create`
    KwReadCreate,
    /// `write-only`
    KwWriteOnly,
    /// `not-accessible`
    KwNotAccessible,
    /// `accessible-for-notify`
    KwAccessibleForNotify,
}

impl TokenKind {
    /// Check if this token is a keyword.
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        (self as u8) >= (Self::KwDefinitions as u8)
    }

    /// Check if this token is a type keyword.
    #[must_use]
    pub const fn is_type_keyword(self) -> bool {
        matches!(
            self,
            Self::KwInteger
                | Self::KwInteger32
                | Self::KwUnsigned32
                | Self::KwCounter32
                | Self::KwCounter64
                | Self::KwGauge32
                | Self::KwIpAddress
                | Self::KwOpaque
                | Self::KwTimeTicks
                | Self::KwBits
                | Self::KwOctet
                | Self::KwString
                | Self::KwCounter
                | Self::KwGauge
                | Self::KwNetworkAddress
        )
    }

    /// Check if this token is a macro keyword (OBJECT-TYPE, etc.).
    #[must_use]
    pub const fn is_macro_keyword(self) -> bool {
        matches!(
            self,
            Self::KwModuleIdentity
                | Self::KwModuleCompliance
                | Self::KwObjectGroup
                | Self::KwNotificationGroup
                | Self::KwAgentCapabilities
                | Self::KwObjectType
                | Self::KwObjectIdentity
                | Self::KwNotificationType
                | Self::KwTextualConvention
                | Self::KwTrapType
        )
    }

    /// Check if this token is a status or access value keyword.
    ///
    /// These are spelled like lowercase identifiers and may appear where an
    /// identifier is expected (enumeration labels, object names).
    #[must_use]
    pub const fn is_value_keyword(self) -> bool {
        matches!(
            self,
            Self::KwCurrent
                | Self::KwDeprecated
                | Self::KwObsolete
                | Self::KwMandatory
                | Self::KwOptional
                | Self::KwReadOnly
                | Self::KwReadWrite
                | Self::KwReadCreate
                | Self::KwWriteOnly
                | Self::KwNotAccessible
                | Self::KwAccessibleForNotify
        )
    }
}

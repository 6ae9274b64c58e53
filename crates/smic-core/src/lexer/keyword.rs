//! Reserved words of the SMI grammar.
//!
//! Keywords are case-sensitive: `Integer32` is a keyword, `INTEGER32` is an
//! identifier.

use super::TokenKind::{self, *};

// Sorted by byte order for binary search; `-` sorts before letters and
// uppercase before lowercase.
static KEYWORDS: &[(&str, TokenKind)] = &[
    ("ACCESS", KwAccess),
    ("AGENT-CAPABILITIES", KwAgentCapabilities),
    ("APPLICATION", KwApplication),
    ("AUGMENTS", KwAugments),
    ("BEGIN", KwBegin),
    ("BITS", KwBits),
    ("CONTACT-INFO", KwContactInfo),
    ("Counter", KwCounter),
    ("Counter32", KwCounter32),
    ("Counter64", KwCounter64),
    ("DEFINITIONS", KwDefinitions),
    ("DEFVAL", KwDefval),
    ("DESCRIPTION", KwDescription),
    ("DISPLAY-HINT", KwDisplayHint),
    ("END", KwEnd),
    ("ENTERPRISE", KwEnterprise),
    ("EXPORTS", KwExports),
    ("FROM", KwFrom),
    ("Gauge", KwGauge),
    ("Gauge32", KwGauge32),
    ("IDENTIFIER", KwIdentifier),
    ("IMPLICIT", KwImplicit),
    ("IMPLIED", KwImplied),
    ("IMPORTS", KwImports),
    ("INDEX", KwIndex),
    ("INTEGER", KwInteger),
    ("Integer32", KwInteger32),
    ("IpAddress", KwIpAddress),
    ("LAST-UPDATED", KwLastUpdated),
    ("MACRO", KwMacro),
    ("MAX-ACCESS", KwMaxAccess),
    ("MODULE", KwModule),
    ("MODULE-COMPLIANCE", KwModuleCompliance),
    ("MODULE-IDENTITY", KwModuleIdentity),
    ("NOTIFICATION-GROUP", KwNotificationGroup),
    ("NOTIFICATION-TYPE", KwNotificationType),
    ("NOTIFICATIONS", KwNotifications),
    ("NetworkAddress", KwNetworkAddress),
    ("OBJECT", KwObject),
    ("OBJECT-GROUP", KwObjectGroup),
    ("OBJECT-IDENTITY", KwObjectIdentity),
    ("OBJECT-TYPE", KwObjectType),
    ("OBJECTS", KwObjects),
    ("OCTET", KwOctet),
    ("OF", KwOf),
    ("ORGANIZATION", KwOrganization),
    ("Opaque", KwOpaque),
    ("PRODUCT-RELEASE", KwProductRelease),
    ("REFERENCE", KwReference),
    ("REVISION", KwRevision),
    ("SEQUENCE", KwSequence),
    ("SIZE", KwSize),
    ("STATUS", KwStatus),
    ("STRING", KwString),
    ("SYNTAX", KwSyntax),
    ("TEXTUAL-CONVENTION", KwTextualConvention),
    ("TRAP-TYPE", KwTrapType),
    ("TimeTicks", KwTimeTicks),
    ("UNITS", KwUnits),
    ("UNIVERSAL", KwUniversal),
    ("Unsigned32", KwUnsigned32),
    ("VARIABLES", KwVariables),
    ("accessible-for-notify", KwAccessibleForNotify),
    ("current", KwCurrent),
    ("deprecated", KwDeprecated),
    ("mandatory", KwMandatory),
    ("not-accessible", KwNotAccessible),
    ("obsolete", KwObsolete),
    ("optional", KwOptional),
    ("read-create", KwReadCreate),
    ("read-only", KwReadOnly),
    ("read-write", KwReadWrite),
    ("write-only", KwWriteOnly),
];

/// Token kind of a reserved word, or `None` for an identifier.
#[must_use]
pub fn lookup_keyword(text: &str) -> Option<TokenKind> {
    let idx = KEYWORDS.binary_search_by(|(kw, _)| (*kw).cmp(text)).ok()?;
    Some(KEYWORDS[idx].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sorted_and_unique() {
        for pair in KEYWORDS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} must precede {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn test_every_entry_is_a_keyword_kind() {
        for (text, kind) in KEYWORDS {
            assert!(kind.is_keyword(), "{text} maps to a non-keyword");
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup_keyword("OBJECT-TYPE"), Some(KwObjectType));
        assert_eq!(lookup_keyword("TEXTUAL-CONVENTION"), Some(KwTextualConvention));
        assert_eq!(lookup_keyword("DISPLAY-HINT"), Some(KwDisplayHint));
        assert_eq!(lookup_keyword("Integer32"), Some(KwInteger32));
        assert_eq!(lookup_keyword("current"), Some(KwCurrent));
        assert_eq!(lookup_keyword("read-only"), Some(KwReadOnly));
        for ident in ["ifIndex", "TEST-MIB", "CHOICE", ""] {
            assert_eq!(lookup_keyword(ident), None, "{ident}");
        }
    }

    #[test]
    fn test_case_sensitive() {
        for text in ["object-type", "Object-Type", "INTEGER32", "integer32"] {
            assert_eq!(lookup_keyword(text), None, "{text}");
        }
    }
}

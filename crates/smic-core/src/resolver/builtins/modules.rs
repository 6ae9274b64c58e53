//! SMI base modules.
//!
//! Imports from these modules resolve against built-in definitions instead
//! of compiled symbol tables.

use crate::model::BaseType;

/// An SMI base module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseModule {
    /// SNMPv2-SMI (RFC 2578).
    SnmpV2Smi,
    /// SNMPv2-TC (RFC 2579).
    SnmpV2Tc,
    /// SNMPv2-CONF (RFC 2580).
    SnmpV2Conf,
    /// RFC1155-SMI.
    Rfc1155Smi,
    /// RFC1065-SMI, predecessor of RFC1155-SMI.
    Rfc1065Smi,
    /// RFC-1212, the SMIv1 OBJECT-TYPE macro.
    Rfc1212,
    /// RFC-1215, the SMIv1 TRAP-TYPE macro.
    Rfc1215,
}

const ALL: [BaseModule; 7] = [
    BaseModule::SnmpV2Smi,
    BaseModule::SnmpV2Tc,
    BaseModule::SnmpV2Conf,
    BaseModule::Rfc1155Smi,
    BaseModule::Rfc1065Smi,
    BaseModule::Rfc1212,
    BaseModule::Rfc1215,
];

impl BaseModule {
    /// Module name as written in IMPORTS.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SnmpV2Smi => "SNMPv2-SMI",
            Self::SnmpV2Tc => "SNMPv2-TC",
            Self::SnmpV2Conf => "SNMPv2-CONF",
            Self::Rfc1155Smi => "RFC1155-SMI",
            Self::Rfc1065Smi => "RFC1065-SMI",
            Self::Rfc1212 => "RFC-1212",
            Self::Rfc1215 => "RFC-1215",
        }
    }

    /// Look up a base module by exact name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        ALL.into_iter().find(|m| m.name() == name)
    }

    /// Iterate over every base module.
    pub fn all() -> impl Iterator<Item = Self> {
        ALL.into_iter()
    }

    /// Application types this module exports, by name.
    pub(super) fn base_type(self, label: &str) -> Option<BaseType> {
        let exported: &[(&str, BaseType)] = match self {
            Self::SnmpV2Smi => &[
                ("Integer32", BaseType::Integer32),
                ("Unsigned32", BaseType::Unsigned32),
                ("Counter32", BaseType::Counter32),
                ("Counter64", BaseType::Counter64),
                ("Gauge32", BaseType::Gauge32),
                ("TimeTicks", BaseType::TimeTicks),
                ("IpAddress", BaseType::IpAddress),
                ("Opaque", BaseType::Opaque),
                ("ObjectName", BaseType::ObjectIdentifier),
                ("NotificationName", BaseType::ObjectIdentifier),
                ("ExtUTCTime", BaseType::OctetString),
            ],
            Self::Rfc1155Smi | Self::Rfc1065Smi => &[
                ("Counter", BaseType::Counter32),
                ("Gauge", BaseType::Gauge32),
                ("NetworkAddress", BaseType::IpAddress),
                ("IpAddress", BaseType::IpAddress),
                ("TimeTicks", BaseType::TimeTicks),
                ("Opaque", BaseType::Opaque),
                ("ObjectName", BaseType::ObjectIdentifier),
            ],
            Self::SnmpV2Tc | Self::SnmpV2Conf | Self::Rfc1212 | Self::Rfc1215 => &[],
        };
        exported
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, base)| *base)
    }

    /// Whether this module defines the named MACRO.
    pub(super) fn defines_macro(self, label: &str) -> bool {
        let macros: &[&str] = match self {
            Self::SnmpV2Smi => &[
                "MODULE-IDENTITY",
                "OBJECT-IDENTITY",
                "OBJECT-TYPE",
                "NOTIFICATION-TYPE",
            ],
            Self::SnmpV2Tc => &["TEXTUAL-CONVENTION"],
            Self::SnmpV2Conf => &[
                "OBJECT-GROUP",
                "NOTIFICATION-GROUP",
                "MODULE-COMPLIANCE",
                "AGENT-CAPABILITIES",
            ],
            Self::Rfc1155Smi | Self::Rfc1065Smi => &["OBJECT-TYPE"],
            Self::Rfc1212 => &["OBJECT-TYPE"],
            Self::Rfc1215 => &["TRAP-TYPE"],
        };
        macros.contains(&label)
    }
}

//! Well-known OID roots.

use super::BaseModule;

/// A built-in OID value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OidRoot {
    /// Label as imported.
    pub name: &'static str,
    /// Full numeric OID.
    pub arcs: &'static [u32],
}

/// ASN.1 roots that are in scope in every module without an import.
pub static ASN1_ROOTS: &[OidRoot] = &[
    OidRoot { name: "ccitt", arcs: &[0] },
    OidRoot { name: "iso", arcs: &[1] },
    OidRoot { name: "joint-iso-ccitt", arcs: &[2] },
];

/// OID roots exported by SNMPv2-SMI.
pub static SMI_ROOTS: &[OidRoot] = &[
    OidRoot { name: "iso", arcs: &[1] },
    OidRoot { name: "org", arcs: &[1, 3] },
    OidRoot { name: "dod", arcs: &[1, 3, 6] },
    OidRoot { name: "internet", arcs: &[1, 3, 6, 1] },
    OidRoot { name: "directory", arcs: &[1, 3, 6, 1, 1] },
    OidRoot { name: "mgmt", arcs: &[1, 3, 6, 1, 2] },
    OidRoot { name: "mib-2", arcs: &[1, 3, 6, 1, 2, 1] },
    OidRoot { name: "transmission", arcs: &[1, 3, 6, 1, 2, 1, 10] },
    OidRoot { name: "experimental", arcs: &[1, 3, 6, 1, 3] },
    OidRoot { name: "private", arcs: &[1, 3, 6, 1, 4] },
    OidRoot { name: "enterprises", arcs: &[1, 3, 6, 1, 4, 1] },
    OidRoot { name: "security", arcs: &[1, 3, 6, 1, 5] },
    OidRoot { name: "snmpV2", arcs: &[1, 3, 6, 1, 6] },
    OidRoot { name: "snmpDomains", arcs: &[1, 3, 6, 1, 6, 1] },
    OidRoot { name: "snmpProxys", arcs: &[1, 3, 6, 1, 6, 2] },
    OidRoot { name: "snmpModules", arcs: &[1, 3, 6, 1, 6, 3] },
    OidRoot { name: "zeroDotZero", arcs: &[0, 0] },
];

/// Look up an ASN.1 root usable without import.
#[must_use]
pub fn asn1_root(name: &str) -> Option<&'static OidRoot> {
    ASN1_ROOTS.iter().find(|r| r.name == name)
}

/// Look up a root by name, regardless of which module exports it.
#[must_use]
pub fn smi_root(name: &str) -> Option<&'static OidRoot> {
    SMI_ROOTS.iter().find(|r| r.name == name)
}

/// Look up an OID root exported by a base module.
#[must_use]
pub fn exported_root(module: BaseModule, name: &str) -> Option<&'static OidRoot> {
    let exported = match module {
        BaseModule::SnmpV2Smi => true,
        // The SMIv1 base modules predate the snmpV2 subtree.
        BaseModule::Rfc1155Smi | BaseModule::Rfc1065Smi => matches!(
            name,
            "internet" | "directory" | "mgmt" | "experimental" | "private" | "enterprises"
        ),
        BaseModule::SnmpV2Tc | BaseModule::SnmpV2Conf | BaseModule::Rfc1212 | BaseModule::Rfc1215 => {
            false
        }
    };
    if exported {
        smi_root(name)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_count() {
        assert_eq!(SMI_ROOTS.len(), 17);
    }

    #[test]
    fn test_roots_chain_to_parents() {
        // Every multi-arc root except zeroDotZero extends another root.
        for root in SMI_ROOTS.iter().filter(|r| r.arcs.len() > 1 && r.name != "zeroDotZero") {
            let parent = &root.arcs[..root.arcs.len() - 1];
            assert!(
                SMI_ROOTS.iter().any(|r| r.arcs == parent),
                "{} has no parent root",
                root.name
            );
        }
    }

    #[test]
    fn test_exported_roots() {
        let ent = exported_root(BaseModule::SnmpV2Smi, "enterprises").unwrap();
        assert_eq!(ent.arcs, &[1, 3, 6, 1, 4, 1]);
        assert!(exported_root(BaseModule::Rfc1155Smi, "enterprises").is_some());
        assert!(exported_root(BaseModule::Rfc1155Smi, "snmpModules").is_none());
        assert!(exported_root(BaseModule::SnmpV2Tc, "iso").is_none());
    }

    #[test]
    fn test_asn1_roots() {
        assert_eq!(asn1_root("iso").map(|r| r.arcs), Some(&[1u32][..]));
        assert!(asn1_root("internet").is_none());
    }
}

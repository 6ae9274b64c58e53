//! Built-in knowledge of the SMI base modules.
//!
//! Base modules are never compiled from source. Imports from them resolve
//! here instead:
//!
//! - **Base types**: Integer32, Counter32, Gauge32 and friends, with the
//!   SMIv1 names normalized to SMIv2.
//! - **Textual conventions**: the sixteen TCs of SNMPv2-TC.
//! - **OID roots**: iso, internet, enterprises, mib-2 and the rest of the
//!   SNMPv2-SMI tree.
//! - **MACROs**: OBJECT-TYPE, TEXTUAL-CONVENTION and the conformance macros.
//!
//! RFC1213-MIB is an ordinary module compiled from source. When no compiled
//! table for it is supplied, its legacy `mib-2`, `DisplayString` and
//! `PhysAddress` exports still resolve here.
//!
//! ```ignore
//! let sym = lookup("SNMPv2-TC", "DisplayString");
//! assert!(matches!(sym, Some(Builtin::TextualConvention(_))));
//! ```

mod modules;
mod oids;
mod tcs;

pub use modules::BaseModule;
pub use oids::{asn1_root, OidRoot, ASN1_ROOTS, SMI_ROOTS};
pub use tcs::{BuiltinTc, BUILTIN_TCS};

use crate::model::BaseType;

/// A symbol defined by a base module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Builtin {
    /// Application type.
    BaseType(BaseType),
    /// SNMPv2-TC textual convention.
    TextualConvention(&'static BuiltinTc),
    /// OID root.
    OidRoot(&'static OidRoot),
    /// MACRO; importable, but has no value.
    Macro,
}

/// Resolve `label` imported from base module `module`.
///
/// Returns `None` if `module` is not a base module or does not define
/// `label`. Legacy RFC1213-MIB exports are served as a fallback.
#[must_use]
pub fn lookup(module: &str, label: &str) -> Option<Builtin> {
    let Some(base) = BaseModule::from_name(module) else {
        return legacy_export(module, label);
    };

    if let Some(ty) = base.base_type(label) {
        return Some(Builtin::BaseType(ty));
    }
    if let Some(root) = oids::exported_root(base, label) {
        return Some(Builtin::OidRoot(root));
    }
    if base.defines_macro(label) {
        return Some(Builtin::Macro);
    }
    if base == BaseModule::SnmpV2Tc {
        return BuiltinTc::from_name(label).map(Builtin::TextualConvention);
    }
    None
}

/// Module whose legacy exports have built-in fallbacks.
const LEGACY_MODULE: &str = "RFC1213-MIB";

fn legacy_export(module: &str, label: &str) -> Option<Builtin> {
    if module != LEGACY_MODULE {
        return None;
    }
    match label {
        "mib-2" => oids::smi_root(label).map(Builtin::OidRoot),
        "DisplayString" | "PhysAddress" => {
            BuiltinTc::from_name(label).map(Builtin::TextualConvention)
        }
        _ => None,
    }
}

/// Check if a module may be imported from without its source, because its
/// common exports have built-in fallbacks.
#[must_use]
pub fn has_legacy_exports(name: &str) -> bool {
    name == LEGACY_MODULE
}

/// Check if a module name is a base module.
#[must_use]
pub fn is_base_module(name: &str) -> bool {
    BaseModule::from_name(name).is_some()
}

//! Textual conventions of SNMPv2-TC (RFC 2579).

use crate::model::{
    BaseType, Constraint, NamedValues, SizeConstraint, Status, TypeDescriptor, ValueConstraint,
};

/// A built-in textual convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuiltinTc {
    /// TC name.
    pub name: &'static str,
    /// DISPLAY-HINT, empty if none.
    pub hint: &'static str,
    /// Base primitive.
    pub base: BaseType,
    /// SIZE ranges, empty if unconstrained.
    pub size: &'static [(u32, u32)],
    /// Value range.
    pub range: Option<(i64, i64)>,
    /// Named values.
    pub values: &'static [(&'static str, i64)],
    /// STATUS.
    pub status: Status,
}

const fn tc(name: &'static str, base: BaseType) -> BuiltinTc {
    BuiltinTc {
        name,
        hint: "",
        base,
        size: &[],
        range: None,
        values: &[],
        status: Status::Current,
    }
}

const POSITIVE_I32: Option<(i64, i64)> = Some((0, i32::MAX as i64));

/// Every SNMPv2-TC textual convention.
pub static BUILTIN_TCS: &[BuiltinTc] = &[
    BuiltinTc {
        hint: "255a",
        size: &[(0, 255)],
        ..tc("DisplayString", BaseType::OctetString)
    },
    BuiltinTc {
        hint: "1x:",
        ..tc("PhysAddress", BaseType::OctetString)
    },
    BuiltinTc {
        hint: "1x:",
        size: &[(6, 6)],
        ..tc("MacAddress", BaseType::OctetString)
    },
    BuiltinTc {
        values: &[("true", 1), ("false", 2)],
        ..tc("TruthValue", BaseType::Integer32)
    },
    BuiltinTc {
        range: POSITIVE_I32,
        ..tc("TestAndIncr", BaseType::Integer32)
    },
    tc("AutonomousType", BaseType::ObjectIdentifier),
    BuiltinTc {
        status: Status::Obsolete,
        ..tc("InstancePointer", BaseType::ObjectIdentifier)
    },
    tc("VariablePointer", BaseType::ObjectIdentifier),
    tc("RowPointer", BaseType::ObjectIdentifier),
    BuiltinTc {
        values: &[
            ("active", 1),
            ("notInService", 2),
            ("notReady", 3),
            ("createAndGo", 4),
            ("createAndWait", 5),
            ("destroy", 6),
        ],
        ..tc("RowStatus", BaseType::Integer32)
    },
    tc("TimeStamp", BaseType::TimeTicks),
    BuiltinTc {
        range: POSITIVE_I32,
        ..tc("TimeInterval", BaseType::Integer32)
    },
    BuiltinTc {
        hint: "2d-1d-1d,1d:1d:1d.1d,1a1d:1d",
        size: &[(8, 8), (11, 11)],
        ..tc("DateAndTime", BaseType::OctetString)
    },
    BuiltinTc {
        values: &[
            ("other", 1),
            ("volatile", 2),
            ("nonVolatile", 3),
            ("permanent", 4),
            ("readOnly", 5),
        ],
        ..tc("StorageType", BaseType::Integer32)
    },
    tc("TDomain", BaseType::ObjectIdentifier),
    BuiltinTc {
        size: &[(1, 255)],
        ..tc("TAddress", BaseType::OctetString)
    },
];

impl BuiltinTc {
    /// Look up a textual convention by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<&'static Self> {
        BUILTIN_TCS.iter().find(|tc| tc.name == name)
    }

    /// Resolved descriptor, as if compiled from SNMPv2-TC.
    #[must_use]
    pub fn descriptor(&self) -> TypeDescriptor {
        let constraint = if !self.size.is_empty() {
            Some(Constraint::Size(SizeConstraint {
                ranges: self.size.to_vec(),
            }))
        } else {
            self.range
                .map(|(lo, hi)| Constraint::Value(ValueConstraint::range(lo, hi)))
        };
        let named_values = (!self.values.is_empty()).then(|| {
            NamedValues::Enumeration(
                self.values
                    .iter()
                    .map(|(label, v)| ((*label).to_owned(), *v))
                    .collect(),
            )
        });
        TypeDescriptor {
            base: self.base,
            constraint,
            display_hint: self.hint.to_owned(),
            named_values,
            parent: None,
            textual_convention: true,
        }
    }
}

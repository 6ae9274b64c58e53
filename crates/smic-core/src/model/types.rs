//! Resolved type descriptors and the value types they are built from.

use core::fmt;

use super::QualifiedName;

/// SMI base primitive.
///
/// Every type descriptor bottoms out in exactly one of these. INTEGER is
/// reported as `Integer32`, and the SMIv1 names `Counter`, `Gauge` and
/// `NetworkAddress` normalize to their SMIv2 equivalents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaseType {
    /// Signed 32-bit integer.
    Integer32,
    /// Unsigned 32-bit integer.
    Unsigned32,
    /// 32-bit wrapping counter.
    Counter32,
    /// 64-bit wrapping counter.
    Counter64,
    /// 32-bit gauge.
    Gauge32,
    /// Hundredths of a second.
    TimeTicks,
    /// IPv4 address.
    IpAddress,
    /// Opaque wrapped ASN.1 data.
    Opaque,
    /// OCTET STRING.
    OctetString,
    /// OBJECT IDENTIFIER.
    ObjectIdentifier,
    /// BITS: a set of named bit positions.
    Bits,
}

impl BaseType {
    /// Canonical name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer32 => "Integer32",
            Self::Unsigned32 => "Unsigned32",
            Self::Counter32 => "Counter32",
            Self::Counter64 => "Counter64",
            Self::Gauge32 => "Gauge32",
            Self::TimeTicks => "TimeTicks",
            Self::IpAddress => "IpAddress",
            Self::Opaque => "Opaque",
            Self::OctetString => "OCTET STRING",
            Self::ObjectIdentifier => "OBJECT IDENTIFIER",
            Self::Bits => "BITS",
        }
    }

    /// Map a primitive type keyword to its base type.
    ///
    /// Accepts both the SMIv2 spelling and the SMIv1 aliases.
    #[must_use]
    pub fn from_keyword(name: &str) -> Option<Self> {
        Some(match name {
            "INTEGER" | "Integer32" => Self::Integer32,
            "Unsigned32" => Self::Unsigned32,
            "Counter32" | "Counter" => Self::Counter32,
            "Counter64" => Self::Counter64,
            "Gauge32" | "Gauge" => Self::Gauge32,
            "TimeTicks" => Self::TimeTicks,
            "IpAddress" | "NetworkAddress" => Self::IpAddress,
            "Opaque" => Self::Opaque,
            "BITS" => Self::Bits,
            _ => return None,
        })
    }

    /// Full value range, for resolving `MIN` and `MAX` bounds.
    ///
    /// `None` for primitives that take SIZE constraints.
    #[must_use]
    pub const fn value_range(self) -> Option<(RangeBound, RangeBound)> {
        match self {
            Self::Integer32 => Some((
                RangeBound::Signed(i32::MIN as i64),
                RangeBound::Signed(i32::MAX as i64),
            )),
            Self::Unsigned32 | Self::Counter32 | Self::Gauge32 | Self::TimeTicks => Some((
                RangeBound::Signed(0),
                RangeBound::Signed(u32::MAX as i64),
            )),
            Self::Counter64 => Some((RangeBound::Signed(0), RangeBound::Unsigned(u64::MAX))),
            _ => None,
        }
    }

    /// Size range for primitives that take SIZE constraints.
    #[must_use]
    pub const fn size_range(self) -> Option<(u32, u32)> {
        match self {
            Self::OctetString | Self::Opaque => Some((0, 65535)),
            Self::IpAddress => Some((4, 4)),
            _ => None,
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A bound in a value constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangeBound {
    /// Value representable as `i64`.
    Signed(i64),
    /// Value above `i64::MAX` (Counter64 ranges).
    Unsigned(u64),
}

impl RangeBound {
    /// Widen for comparisons.
    #[must_use]
    pub fn as_i128(self) -> i128 {
        match self {
            Self::Signed(v) => i128::from(v),
            Self::Unsigned(v) => i128::from(v),
        }
    }
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signed(v) => write!(f, "{v}"),
            Self::Unsigned(v) => write!(f, "{v}"),
        }
    }
}

/// Value constraint: a union of closed ranges.
///
/// `(0..2)` is one pair, `(0|2|4)` is three singleton pairs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueConstraint {
    /// (min, max) pairs in declaration order.
    pub ranges: Vec<(RangeBound, RangeBound)>,
}

impl ValueConstraint {
    /// Single signed range.
    #[must_use]
    pub fn range(min: i64, max: i64) -> Self {
        Self {
            ranges: vec![(RangeBound::Signed(min), RangeBound::Signed(max))],
        }
    }

    /// Check whether `value` falls in any range.
    #[must_use]
    pub fn contains(&self, value: i128) -> bool {
        self.ranges
            .iter()
            .any(|(lo, hi)| lo.as_i128() <= value && value <= hi.as_i128())
    }
}

/// SIZE constraint: a union of closed length ranges.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeConstraint {
    /// (min, max) pairs in declaration order.
    pub ranges: Vec<(u32, u32)>,
}

impl SizeConstraint {
    /// Single length range.
    #[must_use]
    pub fn range(min: u32, max: u32) -> Self {
        Self {
            ranges: vec![(min, max)],
        }
    }

    /// Union of fixed lengths.
    #[must_use]
    pub fn fixed(sizes: &[u32]) -> Self {
        Self {
            ranges: sizes.iter().map(|&s| (s, s)).collect(),
        }
    }
}

/// An effective constraint on a type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constraint {
    /// Value ranges.
    Value(ValueConstraint),
    /// Length ranges.
    Size(SizeConstraint),
}

/// Symbolic values of an INTEGER or BITS type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NamedValues {
    /// INTEGER labels and their magnitudes.
    Enumeration(Vec<(String, i64)>),
    /// BITS labels and their bit positions.
    Bits(Vec<(String, u32)>),
}

impl NamedValues {
    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Enumeration(v) => v.len(),
            Self::Bits(v) => v.len(),
        }
    }

    /// True when there are no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value (or bit position) of a label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<i64> {
        match self {
            Self::Enumeration(v) => v.iter().find(|(l, _)| l == label).map(|(_, n)| *n),
            Self::Bits(v) => v
                .iter()
                .find(|(l, _)| l == label)
                .map(|(_, n)| i64::from(*n)),
        }
    }

    /// Labels in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        let (enums, bits) = match self {
            Self::Enumeration(v) => (Some(v), None),
            Self::Bits(v) => (None, Some(v)),
        };
        enums
            .into_iter()
            .flatten()
            .map(|(l, _)| l.as_str())
            .chain(bits.into_iter().flatten().map(|(l, _)| l.as_str()))
    }
}

/// Definition status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// `current`
    Current,
    /// `deprecated`
    Deprecated,
    /// `obsolete`
    Obsolete,
    /// SMIv1 `mandatory`
    Mandatory,
    /// SMIv1 `optional`
    Optional,
}

impl Status {
    /// Keyword spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Deprecated => "deprecated",
            Self::Obsolete => "obsolete",
            Self::Mandatory => "mandatory",
            Self::Optional => "optional",
        }
    }
}

/// Object access level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Access {
    /// `read-only`
    ReadOnly,
    /// `read-write`
    ReadWrite,
    /// `read-create`
    ReadCreate,
    /// `write-only`
    WriteOnly,
    /// `not-accessible`
    NotAccessible,
    /// `accessible-for-notify`
    AccessibleForNotify,
}

impl Access {
    /// Keyword spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReadOnly => "read-only",
            Self::ReadWrite => "read-write",
            Self::ReadCreate => "read-create",
            Self::WriteOnly => "write-only",
            Self::NotAccessible => "not-accessible",
            Self::AccessibleForNotify => "accessible-for-notify",
        }
    }
}

/// Resolved type of a type assignment, textual convention or object SYNTAX.
///
/// Each field holds the effective value after walking the derivation chain:
/// the base primitive comes from the nearest primitive, a declared
/// constraint replaces the inherited one without any subset check, and the
/// display hint comes from the nearest textual convention that declares one.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeDescriptor {
    /// Effective base primitive.
    pub base: BaseType,
    /// Effective constraint.
    pub constraint: Option<Constraint>,
    /// Effective display hint; empty when no TC in the chain declares one.
    pub display_hint: String,
    /// Effective named values.
    pub named_values: Option<NamedValues>,
    /// Immediately derived-from type; `None` for a bare primitive.
    pub parent: Option<QualifiedName>,
    /// Whether this level is a TEXTUAL-CONVENTION.
    pub textual_convention: bool,
}

impl TypeDescriptor {
    /// Descriptor of a bare primitive.
    #[must_use]
    pub fn primitive(base: BaseType) -> Self {
        Self {
            base,
            constraint: None,
            display_hint: String::new(),
            named_values: None,
            parent: None,
            textual_convention: false,
        }
    }

    /// Effective size constraint, if the constraint is a SIZE.
    #[must_use]
    pub fn size(&self) -> Option<&SizeConstraint> {
        match &self.constraint {
            Some(Constraint::Size(s)) => Some(s),
            _ => None,
        }
    }

    /// Effective value constraint, if the constraint is a range.
    #[must_use]
    pub fn range(&self) -> Option<&ValueConstraint> {
        match &self.constraint {
            Some(Constraint::Value(v)) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_normalization() {
        assert_eq!(BaseType::from_keyword("INTEGER"), Some(BaseType::Integer32));
        assert_eq!(BaseType::from_keyword("Counter"), Some(BaseType::Counter32));
        assert_eq!(BaseType::from_keyword("Gauge"), Some(BaseType::Gauge32));
        assert_eq!(BaseType::from_keyword("NetworkAddress"), Some(BaseType::IpAddress));
        assert_eq!(BaseType::from_keyword("DisplayString"), None);
    }

    #[test]
    fn test_value_ranges() {
        let (lo, hi) = BaseType::Integer32.value_range().unwrap();
        assert_eq!(lo, RangeBound::Signed(-2_147_483_648));
        assert_eq!(hi, RangeBound::Signed(2_147_483_647));
        let (_, hi) = BaseType::Counter64.value_range().unwrap();
        assert_eq!(hi, RangeBound::Unsigned(u64::MAX));
        assert!(BaseType::OctetString.value_range().is_none());
    }

    #[test]
    fn test_value_constraint_contains() {
        let c = ValueConstraint {
            ranges: vec![
                (RangeBound::Signed(0), RangeBound::Signed(0)),
                (RangeBound::Signed(2), RangeBound::Signed(4)),
            ],
        };
        assert!(c.contains(0));
        assert!(!c.contains(1));
        assert!(c.contains(3));
    }

    #[test]
    fn test_named_values_lookup() {
        let bits = NamedValues::Bits(vec![("a".into(), 0), ("g".into(), 6)]);
        assert_eq!(bits.get("g"), Some(6));
        assert_eq!(bits.labels().collect::<Vec<_>>(), ["a", "g"]);
        assert!(!bits.is_empty());
    }

    #[test]
    fn test_descriptor_accessors() {
        let mut td = TypeDescriptor::primitive(BaseType::OctetString);
        assert!(td.size().is_none());
        td.constraint = Some(Constraint::Size(SizeConstraint::fixed(&[8, 11])));
        assert_eq!(td.size().unwrap().ranges, vec![(8, 8), (11, 11)]);
        assert!(td.range().is_none());
    }
}

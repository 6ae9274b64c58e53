//! Resolved numeric OIDs.

use core::fmt;

/// A fully resolved object identifier: a closed sequence of arcs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Oid {
    arcs: Vec<u32>,
}

impl Oid {
    /// Create an OID from its arcs.
    #[must_use]
    pub fn new(arcs: Vec<u32>) -> Self {
        Self { arcs }
    }

    /// Parse dotted notation such as `1.3.6.1`.
    #[must_use]
    pub fn from_dotted(s: &str) -> Option<Self> {
        if s.is_empty() {
            return Some(Self::default());
        }
        s.split('.')
            .map(str::parse)
            .collect::<Result<Vec<u32>, _>>()
            .ok()
            .map(Self::new)
    }

    /// The arcs, outermost first.
    #[must_use]
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Number of arcs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// True for the empty OID.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// The OID with its last arc removed, if it has more than one.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        match self.arcs.split_last() {
            Some((_, rest)) if !rest.is_empty() => Some(Self::new(rest.to_vec())),
            _ => None,
        }
    }

    /// Append one arc.
    #[must_use]
    pub fn child(&self, arc: u32) -> Self {
        self.extended(&[arc])
    }

    /// Append several arcs.
    #[must_use]
    pub fn extended(&self, arcs: &[u32]) -> Self {
        let mut out = Vec::with_capacity(self.arcs.len() + arcs.len());
        out.extend_from_slice(&self.arcs);
        out.extend_from_slice(arcs);
        Self::new(out)
    }

    /// Check if this OID is a prefix of (or equal to) `other`.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.arcs.starts_with(&self.arcs)
    }
}

impl From<Vec<u32>> for Oid {
    fn from(arcs: Vec<u32>) -> Self {
        Self::new(arcs)
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::new(arcs.to_vec())
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut arcs = self.arcs.iter();
        if let Some(first) = arcs.next() {
            write!(f, "{first}")?;
            for arc in arcs {
                write!(f, ".{arc}")?;
            }
        }
        Ok(())
    }
}

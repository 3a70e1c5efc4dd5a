// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Ludics Kernel Locus Model
// ─────────────────────────────────────────────────────────────────────
//! Addresses in the shared move tree.
//!
//! A locus is written `0`, `0.1`, `0.1.2`, …: the root segment `0`
//! followed by child labels. All address arithmetic lives here; the
//! rest of the kernel never touches dotted strings directly.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LudicsError, LudicsResult};

/// An immutable address in the move tree.
///
/// Ordering is lexicographic over the numeric segments, so `0.2 < 0.10`
/// and a parent always sorts before its children.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locus {
    segments: Vec<u32>,
}

impl Locus {
    /// The root address `0`.
    pub fn root() -> Self {
        Self { segments: vec![0] }
    }

    /// Parse a dotted address. Rejects empty, non-numeric, zero-padded
    /// and overflowing segments, child labels of `0`, and any address
    /// not anchored at `0`. Accepted input prints back unchanged.
    pub fn parse(input: &str) -> LudicsResult<Self> {
        let malformed = |reason: &str| LudicsError::MalformedLocus {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        if input.is_empty() {
            return Err(malformed("empty address"));
        }

        let mut segments = Vec::new();
        for (i, part) in input.split('.').enumerate() {
            if part.is_empty() {
                return Err(malformed("empty segment"));
            }
            if !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed(&format!("non-numeric segment {part:?}")));
            }
            if part.len() > 1 && part.starts_with('0') {
                return Err(malformed(&format!("leading zero in segment {part:?}")));
            }
            let value = part
                .parse::<u32>()
                .map_err(|_| malformed(&format!("segment {part:?} out of range")))?;
            if i > 0 && value == 0 {
                return Err(malformed("child labels must be positive"));
            }
            segments.push(value);
        }

        if segments[0] != 0 {
            return Err(malformed("address must start at root 0"));
        }
        Ok(Self { segments })
    }

    pub fn is_root(&self) -> bool {
        self.segments.len() == 1
    }

    /// Strip the last segment. `None` only for the root.
    pub fn parent(&self) -> Option<Locus> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Segment count; the root has depth 1.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// True when `self` is a proper prefix of `other`.
    pub fn is_ancestor_of(&self, other: &Locus) -> bool {
        self.segments.len() < other.segments.len() && other.segments.starts_with(&self.segments)
    }

    /// True when `self` equals `other` or is an ancestor of it.
    pub fn is_prefix_of(&self, other: &Locus) -> bool {
        other.segments.starts_with(&self.segments)
    }

    /// Child at `label`. Labels are positive; designs reject `0`.
    pub fn child(&self, label: u32) -> Locus {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(label);
        Self { segments }
    }

    /// The last segment (the label this locus has under its parent).
    pub fn last(&self) -> u32 {
        // segments is never empty
        self.segments[self.segments.len() - 1]
    }

    pub fn segments(&self) -> &[u32] {
        &self.segments
    }
}

impl Default for Locus {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}

impl FromStr for Locus {
    type Err = LudicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Locus {
    type Error = LudicsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Locus> for String {
    fn from(locus: Locus) -> Self {
        locus.to_string()
    }
}

/// `parentOf` over a raw address string.
pub fn parent_of(input: &str) -> LudicsResult<Option<Locus>> {
    Ok(Locus::parse(input)?.parent())
}

/// `depthOf` over a raw address string.
pub fn depth_of(input: &str) -> LudicsResult<usize> {
    Ok(Locus::parse(input)?.depth())
}

/// `isAncestor` over raw address strings: `a` is a proper prefix of `b`.
pub fn is_ancestor(a: &str, b: &str) -> LudicsResult<bool> {
    Ok(Locus::parse(a)?.is_ancestor_of(&Locus::parse(b)?))
}

/// The child labels an act opens, kept in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ramification(BTreeSet<u32>);

impl Ramification {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(labels: impl IntoIterator<Item = u32>) -> Self {
        Self(labels.into_iter().collect())
    }

    /// Build from full child addresses, e.g. `["0.1", "0.2"]` under `0`.
    pub fn from_loci<'a>(
        parent: &Locus,
        loci: impl IntoIterator<Item = &'a Locus>,
    ) -> LudicsResult<Self> {
        let mut labels = BTreeSet::new();
        for locus in loci {
            if locus.parent().as_ref() != Some(parent) {
                return Err(LudicsError::MalformedLocus {
                    input: locus.to_string(),
                    reason: format!("not a child of {parent}"),
                });
            }
            labels.insert(locus.last());
        }
        Ok(Self(labels))
    }

    pub fn contains(&self, label: u32) -> bool {
        self.0.contains(&label)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Labels in ascending order.
    pub fn labels(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// Child addresses of `parent`, ascending.
    pub fn children_of<'a>(&'a self, parent: &'a Locus) -> impl Iterator<Item = Locus> + 'a {
        self.0.iter().map(move |&label| parent.child(label))
    }

    pub fn intersection(&self, other: &Ramification) -> Ramification {
        Self(self.0.intersection(&other.0).copied().collect())
    }

    /// Smallest label, the deterministic tie-break choice.
    pub fn first(&self) -> Option<u32> {
        self.0.iter().next().copied()
    }
}

impl FromIterator<u32> for Ramification {
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        Self::new(iter)
    }
}

// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Ludics Kernel Design
// ─────────────────────────────────────────────────────────────────────
//! Designs: one player's tree-shaped collection of acts.
//!
//! A design is assembled by appending acts in sequence-index order and
//! is frozen afterwards. Construction fails fast on the first
//! structural violation; nothing is silently dropped.
//!
//! # Invariants
//!
//! 1. Sequence indices are strictly increasing.
//! 2. Every act carries the polarity of the design's player.
//! 3. At most one act per locus.
//! 4. Every non-root locus is opened by its parent act's ramification.
//!    A DAIMON opens nothing, so nothing can sit under it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::act::{Act, ActId, ActKind, ActRecord, Player, Polarity};
use crate::error::{LudicsError, LudicsResult};
use crate::locus::{Locus, Ramification};

/// Stable design identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesignId(pub String);

impl DesignId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DesignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DesignId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Serialized form of a design, as stored or received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignRecord {
    pub id: DesignId,
    pub player: Player,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub acts: Vec<ActRecord>,
}

/// An immutable, validated design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DesignRecord", into = "DesignRecord")]
pub struct Design {
    id: DesignId,
    player: Player,
    context: Option<String>,
    acts: Vec<Act>,
    by_locus: BTreeMap<Locus, usize>,
    by_id: BTreeMap<ActId, usize>,
}

impl Design {
    /// Empty design (no act at the root).
    pub fn empty(id: impl Into<String>, player: Player) -> Self {
        DesignBuilder::new(id, player).build()
    }

    /// Assemble a design from inbound records, ordered by `sequence_index`.
    pub fn from_records(
        id: impl Into<String>,
        player: Player,
        context: Option<String>,
        mut records: Vec<ActRecord>,
    ) -> LudicsResult<Self> {
        records.sort_by_key(|r| r.sequence_index);
        let mut builder = DesignBuilder::new(id, player);
        builder.set_context(context);
        for record in records {
            builder.push(record)?;
        }
        Ok(builder.build())
    }

    pub fn id(&self) -> &DesignId {
        &self.id
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn polarity(&self) -> Polarity {
        self.player.polarity()
    }

    /// Interaction context the design belongs to, if any.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Acts in sequence order.
    pub fn acts(&self) -> &[Act] {
        &self.acts
    }

    pub fn len(&self) -> usize {
        self.acts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.acts.is_empty()
    }

    pub fn act_at(&self, locus: &Locus) -> Option<&Act> {
        self.by_locus.get(locus).map(|&i| &self.acts[i])
    }

    pub fn act(&self, id: &ActId) -> Option<&Act> {
        self.by_id.get(id).map(|&i| &self.acts[i])
    }

    pub fn root_act(&self) -> Option<&Act> {
        self.act_at(&Locus::root())
    }

    /// Acts at the children `act` opens, ascending by locus.
    pub fn children<'a>(&'a self, act: &'a Act) -> impl Iterator<Item = &'a Act> + 'a {
        act.children().filter_map(move |child| self.act_at(&child))
    }

    /// Daimon count; convenient for summaries.
    pub fn daimon_count(&self) -> usize {
        self.acts.iter().filter(|a| a.is_daimon()).count()
    }
}

impl TryFrom<DesignRecord> for Design {
    type Error = LudicsError;

    fn try_from(record: DesignRecord) -> Result<Self, Self::Error> {
        Self::from_records(record.id.0, record.player, record.context, record.acts)
    }
}

impl From<Design> for DesignRecord {
    fn from(design: Design) -> Self {
        Self {
            id: design.id,
            player: design.player,
            context: design.context,
            acts: design.acts.into_iter().map(ActRecord::from).collect(),
        }
    }
}

/// Append-only builder; `build()` freezes the design.
pub struct DesignBuilder {
    design: Design,
    last_index: Option<u32>,
}

impl DesignBuilder {
    pub fn new(id: impl Into<String>, player: Player) -> Self {
        Self {
            design: Design {
                id: DesignId::new(id),
                player,
                context: None,
                acts: Vec::new(),
                by_locus: BTreeMap::new(),
                by_id: BTreeMap::new(),
            },
            last_index: None,
        }
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.design.context = Some(context.into());
        self
    }

    fn set_context(&mut self, context: Option<String>) {
        self.design.context = context;
    }

    /// Sequence index the convenience helpers assign next. Fails once
    /// `u32::MAX` has been used.
    pub fn next_index(&self) -> LudicsResult<u32> {
        match self.last_index {
            None => Ok(0),
            Some(previous) => previous
                .checked_add(1)
                .ok_or_else(|| LudicsError::SequenceOrder {
                    design: self.design.id.to_string(),
                    index: previous,
                    previous,
                }),
        }
    }

    /// Validate and append one act.
    pub fn push(&mut self, record: ActRecord) -> LudicsResult<ActId> {
        let design = self.design.id.to_string();
        let locus = record.locus.to_string();

        if let Some(previous) = self.last_index {
            if record.sequence_index <= previous {
                return Err(LudicsError::SequenceOrder {
                    design,
                    index: record.sequence_index,
                    previous,
                });
            }
        }

        let expected = self.design.polarity();
        if record.polarity != expected {
            return Err(LudicsError::PolarityMismatch {
                design,
                locus,
                expected: expected.to_string(),
                found: record.polarity.to_string(),
            });
        }

        if record.kind == ActKind::Daimon && !record.ramification.is_empty() {
            return Err(LudicsError::DaimonRamification { design, locus });
        }

        if record.ramification.contains(0) {
            return Err(LudicsError::MalformedLocus {
                input: record.locus.child(0).to_string(),
                reason: "child labels must be positive".to_string(),
            });
        }

        if self.design.by_locus.contains_key(&record.locus) {
            return Err(LudicsError::DuplicateLocus { design, locus });
        }

        if let Some(parent) = record.locus.parent() {
            let justified = self
                .design
                .act_at(&parent)
                .is_some_and(|p| p.ramification.contains(record.locus.last()));
            if !justified {
                return Err(LudicsError::UnjustifiedLocus { design, locus });
            }
        }

        let id = record
            .id
            .unwrap_or_else(|| ActId::new(format!("{}#{}", self.design.id, record.sequence_index)));
        if self.design.by_id.contains_key(&id) {
            return Err(LudicsError::DuplicateAct {
                design,
                act: id.to_string(),
            });
        }

        let act = Act {
            id: id.clone(),
            kind: record.kind,
            polarity: record.polarity,
            locus: record.locus,
            ramification: record.ramification,
            expression: record.expression,
            sequence_index: record.sequence_index,
            metadata: record.metadata,
        };

        let index = self.design.acts.len();
        self.design.by_locus.insert(act.locus.clone(), index);
        self.design.by_id.insert(id.clone(), index);
        self.design.acts.push(act);
        self.last_index = Some(record.sequence_index);
        Ok(id)
    }

    /// Append a PROPER act with the design's polarity at the next index.
    pub fn proper(
        &mut self,
        locus: &str,
        labels: impl IntoIterator<Item = u32>,
    ) -> LudicsResult<ActId> {
        let record = ActRecord::proper(
            self.design.polarity(),
            Locus::parse(locus)?,
            Ramification::new(labels),
            self.next_index()?,
        );
        self.push(record)
    }

    /// Append a DAIMON with the design's polarity at the next index.
    pub fn daimon(&mut self, locus: &str) -> LudicsResult<ActId> {
        let record =
            ActRecord::daimon(self.design.polarity(), Locus::parse(locus)?, self.next_index()?);
        self.push(record)
    }

    pub fn build(self) -> Design {
        self.design
    }
}

// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Ludics Kernel Outbound Records
// ─────────────────────────────────────────────────────────────────────
//! Plain, serializable results: disputes, chronicles, plays and
//! strategies. No internal pointers, safe to hand to storage or UI.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::act::{ActId, ActKind, Player, Polarity};
use crate::design::DesignId;
use crate::locus::{Locus, Ramification};

/// Outcome of an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisputeStatus {
    /// A DAIMON was reached: the interaction ends properly.
    Convergent,
    /// No pair could be formed at all.
    Divergent,
    /// Under-specified or cut off by the pair bound.
    Ongoing,
    /// Both sides acted but opened no common continuation.
    Stuck,
}

/// Why the interaction stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisputeReason {
    NoInteraction,
    Daimon,
    DisjointRamification,
    UnderSpecified,
    BoundExceeded,
}

/// One orthogonal pairing at a shared locus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputePair {
    pub step: usize,
    pub locus: Locus,
    pub positive: ActId,
    pub negative: ActId,
    pub positive_ramification: Ramification,
    pub negative_ramification: Ramification,
}

/// The DAIMON that closed a convergent interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalAct {
    pub act: ActId,
    pub polarity: Polarity,
    pub locus: Locus,
}

/// Maximal interaction between a positive and a negative design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispute {
    pub positive_design: DesignId,
    pub negative_design: DesignId,
    pub pairs: Vec<DisputePair>,
    pub status: DisputeStatus,
    pub reason: DisputeReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<TerminalAct>,
}

impl Dispute {
    /// Pair count.
    pub fn length(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_convergent(&self) -> bool {
        self.status == DisputeStatus::Convergent
    }

    /// True when the pair bound cut the interaction short.
    pub fn is_truncated(&self) -> bool {
        self.reason == DisputeReason::BoundExceeded
    }

    /// Loci visited, in step order.
    pub fn loci(&self) -> impl Iterator<Item = &Locus> {
        self.pairs.iter().map(|p| &p.locus)
    }

    /// Act ids one side contributed, in step order, including its DAIMON.
    pub fn acts_of(&self, polarity: Polarity) -> Vec<&ActId> {
        let mut acts: Vec<&ActId> = self
            .pairs
            .iter()
            .map(|p| match polarity {
                Polarity::Positive => &p.positive,
                Polarity::Negative => &p.negative,
            })
            .collect();
        if let Some(terminal) = &self.terminal {
            if terminal.polarity == polarity {
                acts.push(&terminal.act);
            }
        }
        acts
    }

    /// Which side `design` played, if it took part.
    pub fn side_of(&self, design: &DesignId) -> Option<Polarity> {
        if &self.positive_design == design {
            Some(Polarity::Positive)
        } else if &self.negative_design == design {
            Some(Polarity::Negative)
        } else {
            None
        }
    }
}

/// One step along a chronicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChronicleStep {
    pub act: ActId,
    pub locus: Locus,
    pub polarity: Polarity,
    pub kind: ActKind,
    pub ramification: Ramification,
}

/// A linear branch through one design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chronicle {
    pub design: DesignId,
    pub steps: Vec<ChronicleStep>,
    /// Ends in a DAIMON or a leaf act, rather than being cut short.
    pub is_maximal: bool,
}

impl Chronicle {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn act_ids(&self) -> Vec<&ActId> {
        self.steps.iter().map(|s| &s.act).collect()
    }

    pub fn ends_in_daimon(&self) -> bool {
        self.steps.last().is_some_and(|s| s.kind == ActKind::Daimon)
    }
}

/// A move inside a play. Only the owner's moves carry an act id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayMove {
    pub locus: Locus,
    pub polarity: Polarity,
    pub kind: ActKind,
    pub ramification: Ramification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub act: Option<ActId>,
}

/// Alternating sequence of moves seen from the owner's side.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Play {
    pub owner: Polarity,
    pub moves: Vec<PlayMove>,
}

impl Play {
    pub fn new(owner: Polarity) -> Self {
        Self {
            owner,
            moves: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Ends in a move by its owner.
    pub fn is_positive(&self) -> bool {
        self.moves.last().is_some_and(|m| m.polarity == self.owner)
    }

    /// First `len` moves.
    pub fn prefix(&self, len: usize) -> Play {
        Play {
            owner: self.owner,
            moves: self.moves[..len.min(self.moves.len())].to_vec(),
        }
    }
}

/// The set of plays a design exhibits for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategy {
    pub name: String,
    pub design: DesignId,
    pub player: Player,
    pub plays: BTreeSet<Play>,
}

impl Strategy {
    pub fn new(name: impl Into<String>, design: DesignId, player: Player) -> Self {
        Self {
            name: name.into(),
            design,
            player,
            plays: BTreeSet::new(),
        }
    }

    pub fn owner(&self) -> Polarity {
        self.player.polarity()
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn positive_plays(&self) -> usize {
        self.plays.iter().filter(|p| p.is_positive()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(locus: &str, polarity: Polarity, labels: &[u32]) -> PlayMove {
        PlayMove {
            locus: Locus::parse(locus).unwrap(),
            polarity,
            kind: ActKind::Proper,
            ramification: Ramification::new(labels.iter().copied()),
            act: None,
        }
    }

    #[test]
    fn test_status_and_reason_names() {
        assert_eq!(
            serde_json::to_string(&DisputeStatus::Convergent).unwrap(),
            "\"CONVERGENT\""
        );
        assert_eq!(
            serde_json::to_string(&DisputeReason::NoInteraction).unwrap(),
            "\"no-interaction\""
        );
    }

    #[test]
    fn test_dispute_accessors() {
        let dispute = Dispute {
            positive_design: DesignId::from("p"),
            negative_design: DesignId::from("n"),
            pairs: vec![DisputePair {
                step: 0,
                locus: Locus::root(),
                positive: ActId::from("p0"),
                negative: ActId::from("n0"),
                positive_ramification: Ramification::new([1]),
                negative_ramification: Ramification::new([1]),
            }],
            status: DisputeStatus::Convergent,
            reason: DisputeReason::Daimon,
            terminal: Some(TerminalAct {
                act: ActId::from("n1"),
                polarity: Polarity::Negative,
                locus: Locus::parse("0.1").unwrap(),
            }),
        };
        assert_eq!(dispute.length(), 1);
        assert!(dispute.is_convergent());
        assert!(!dispute.is_truncated());
        assert_eq!(dispute.acts_of(Polarity::Positive), vec![&ActId::from("p0")]);
        assert_eq!(
            dispute.acts_of(Polarity::Negative),
            vec![&ActId::from("n0"), &ActId::from("n1")]
        );
        assert_eq!(dispute.side_of(&DesignId::from("n")), Some(Polarity::Negative));
        assert_eq!(dispute.side_of(&DesignId::from("x")), None);
    }

    #[test]
    fn test_play_is_positive() {
        let mut play = Play::new(Polarity::Positive);
        assert!(!play.is_positive());
        play.moves.push(mv("0", Polarity::Positive, &[1]));
        assert!(play.is_positive());
        play.moves.push(mv("0", Polarity::Negative, &[1]));
        assert!(!play.is_positive());
        assert_eq!(play.prefix(1).len(), 1);
        assert_eq!(play.prefix(9).len(), 2);
    }

    #[test]
    fn test_strategy_set_semantics() {
        let mut s = Strategy::new("s", DesignId::from("p"), Player::Proponent);
        let mut play = Play::new(Polarity::Positive);
        play.moves.push(mv("0", Polarity::Positive, &[1]));
        s.plays.insert(play.clone());
        s.plays.insert(play);
        assert_eq!(s.len(), 1);
        assert_eq!(s.positive_plays(), 1);
    }
}

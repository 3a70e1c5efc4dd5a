// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Dispute / Interaction Engine
// ─────────────────────────────────────────────────────────────────────
//! Computes the maximal orthogonal interaction between a positive and
//! a negative design.
//!
//! The cursor starts at `0`. At each locus:
//!   1. A DAIMON on either side ends the interaction: CONVERGENT.
//!   2. A missing act ends it: DIVERGENT before the first pair,
//!      ONGOING (under-specified) afterwards.
//!   3. Two PROPER acts form a pair; the cursor moves to the smallest
//!      label both ramifications share, or the interaction is STUCK.
//!
//! The pair count is capped by `max_pairs`; hitting the cap yields
//! ONGOING with a truncated pair list.

use ludics_types::{
    Design, Dispute, DisputePair, DisputeReason, DisputeStatus, LudicsConfig, LudicsError,
    LudicsResult, Locus, Polarity, TerminalAct,
};

/// Pure interaction engine. Holds only its bound.
#[derive(Debug, Clone)]
pub struct DisputeEngine {
    max_pairs: usize,
}

impl Default for DisputeEngine {
    fn default() -> Self {
        Self::from_config(&LudicsConfig::default())
    }
}

impl DisputeEngine {
    pub fn new(max_pairs: usize) -> Self {
        Self { max_pairs }
    }

    pub fn from_config(config: &LudicsConfig) -> Self {
        Self::new(config.max_pairs)
    }

    pub fn max_pairs(&self) -> usize {
        self.max_pairs
    }

    /// Interact `pos` against `neg`.
    ///
    /// Fails only when the designs sit on the wrong sides; every
    /// interaction outcome is reported through `status`/`reason`.
    pub fn interact(&self, pos: &Design, neg: &Design) -> LudicsResult<Dispute> {
        check_side(pos, Polarity::Positive)?;
        check_side(neg, Polarity::Negative)?;

        let mut pairs: Vec<DisputePair> = Vec::new();
        let mut cursor = Locus::root();

        let (status, reason, terminal) = loop {
            let p = pos.act_at(&cursor);
            let n = neg.act_at(&cursor);

            let daimon = p
                .filter(|a| a.is_daimon())
                .or_else(|| n.filter(|a| a.is_daimon()));
            if let Some(d) = daimon {
                let terminal = TerminalAct {
                    act: d.id.clone(),
                    polarity: d.polarity,
                    locus: d.locus.clone(),
                };
                break (DisputeStatus::Convergent, DisputeReason::Daimon, Some(terminal));
            }

            let (p, n) = match (p, n) {
                (Some(p), Some(n)) => (p, n),
                _ if pairs.is_empty() => {
                    break (DisputeStatus::Divergent, DisputeReason::NoInteraction, None)
                }
                _ => break (DisputeStatus::Ongoing, DisputeReason::UnderSpecified, None),
            };

            if pairs.len() >= self.max_pairs {
                log::warn!(
                    "interaction {} vs {} cut at {} pairs (locus {cursor})",
                    pos.id(),
                    neg.id(),
                    self.max_pairs
                );
                break (DisputeStatus::Ongoing, DisputeReason::BoundExceeded, None);
            }

            pairs.push(DisputePair {
                step: pairs.len(),
                locus: cursor.clone(),
                positive: p.id.clone(),
                negative: n.id.clone(),
                positive_ramification: p.ramification.clone(),
                negative_ramification: n.ramification.clone(),
            });

            match p.ramification.intersection(&n.ramification).first() {
                Some(label) => cursor = cursor.child(label),
                None => break (DisputeStatus::Stuck, DisputeReason::DisjointRamification, None),
            }
        };

        log::debug!(
            "interaction {} vs {}: {status:?} ({reason:?}) after {} pairs",
            pos.id(),
            neg.id(),
            pairs.len()
        );

        Ok(Dispute {
            positive_design: pos.id().clone(),
            negative_design: neg.id().clone(),
            pairs,
            status,
            reason,
            terminal,
        })
    }

    /// True when the two designs converge.
    pub fn is_orthogonal(&self, pos: &Design, neg: &Design) -> LudicsResult<bool> {
        Ok(self.interact(pos, neg)?.is_convergent())
    }

    /// Every positive design against every negative design, row-major
    /// in input order.
    pub fn interact_all(
        &self,
        positives: &[Design],
        negatives: &[Design],
    ) -> LudicsResult<Vec<Dispute>> {
        let mut disputes = Vec::with_capacity(positives.len() * negatives.len());
        for pos in positives {
            for neg in negatives {
                disputes.push(self.interact(pos, neg)?);
            }
        }
        Ok(disputes)
    }
}

fn check_side(design: &Design, expected: Polarity) -> LudicsResult<()> {
    if design.polarity() == expected {
        return Ok(());
    }
    Err(LudicsError::PolarityMismatch {
        design: design.id().to_string(),
        locus: Locus::root().to_string(),
        expected: expected.to_string(),
        found: design.polarity().to_string(),
    })
}

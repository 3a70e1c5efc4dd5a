// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Chronicle Extractor
// ─────────────────────────────────────────────────────────────────────
//! Projects a design onto linear branches.
//!
//! All traversals are iterative with an explicit step cap, so no input
//! shape can make extraction recurse or loop without bound.

use ludics_types::{
    Act, ActId, Chronicle, ChronicleStep, Design, Dispute, LudicsConfig, LudicsError,
    LudicsResult,
};

/// Chronicle extraction with a hard step cap.
#[derive(Debug, Clone)]
pub struct ChronicleExtractor {
    max_steps: usize,
}

impl Default for ChronicleExtractor {
    fn default() -> Self {
        Self::from_config(&LudicsConfig::default())
    }
}

impl ChronicleExtractor {
    pub fn new(max_steps: usize) -> Self {
        Self { max_steps }
    }

    pub fn from_config(config: &LudicsConfig) -> Self {
        Self::new(config.chronicle_max_steps)
    }

    /// Follow the smallest available child from `start` until the
    /// branch ends.
    pub fn extract_from(&self, design: &Design, start: &ActId) -> LudicsResult<Chronicle> {
        let mut act = design
            .act(start)
            .ok_or_else(|| LudicsError::UnknownAct(start.to_string()))?;
        let mut path: Vec<&Act> = Vec::new();

        let is_maximal = loop {
            path.push(act);
            if ends_branch(act) {
                break true;
            }
            let Some(next) = design.children(act).next() else {
                break false;
            };
            if path.len() >= self.max_steps {
                log::warn!(
                    "chronicle of {} cut at {} steps (locus {})",
                    design.id(),
                    self.max_steps,
                    act.locus
                );
                break false;
            }
            act = next;
        };

        Ok(to_chronicle(design, &path, is_maximal))
    }

    /// One chronicle per branch of the design, in pre-order with
    /// children visited in ascending locus order.
    pub fn extract_all(&self, design: &Design) -> Vec<Chronicle> {
        let mut chronicles = Vec::new();
        let Some(root) = design.root_act() else {
            return chronicles;
        };

        let mut stack: Vec<Vec<&Act>> = vec![vec![root]];
        let mut visited = 0usize;

        while let Some(path) = stack.pop() {
            visited += 1;
            let Some(&last) = path.last() else {
                continue;
            };

            if visited > self.max_steps {
                log::warn!(
                    "chronicle extraction of {} stopped after {} acts",
                    design.id(),
                    self.max_steps
                );
                chronicles.push(to_chronicle(design, &path, false));
                break;
            }

            let children: Vec<&Act> = design.children(last).collect();
            if children.is_empty() {
                chronicles.push(to_chronicle(design, &path, ends_branch(last)));
                continue;
            }
            for child in children.into_iter().rev() {
                let mut next = path.clone();
                next.push(child);
                stack.push(next);
            }
        }

        chronicles
    }

    /// The design's own acts along a dispute, in pair order, closed by
    /// its own DAIMON when it played one.
    pub fn along_dispute(&self, design: &Design, dispute: &Dispute) -> LudicsResult<Chronicle> {
        let side = dispute
            .side_of(design.id())
            .ok_or_else(|| LudicsError::UnknownDesign(design.id().to_string()))?;

        let mut path = Vec::with_capacity(dispute.length() + 1);
        for id in dispute.acts_of(side) {
            let act = design
                .act(id)
                .ok_or_else(|| LudicsError::UnknownAct(id.to_string()))?;
            path.push(act);
        }

        let is_maximal = path.last().is_some_and(|a| ends_branch(a));
        Ok(to_chronicle(design, &path, is_maximal))
    }
}

/// A DAIMON or a leaf closes a branch for good.
fn ends_branch(act: &Act) -> bool {
    act.is_daimon() || act.ramification.is_empty()
}

fn to_chronicle(design: &Design, path: &[&Act], is_maximal: bool) -> Chronicle {
    Chronicle {
        design: design.id().clone(),
        steps: path
            .iter()
            .map(|a| ChronicleStep {
                act: a.id.clone(),
                locus: a.locus.clone(),
                polarity: a.polarity,
                kind: a.kind,
                ramification: a.ramification.clone(),
            })
            .collect(),
        is_maximal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispute::DisputeEngine;
    use ludics_types::{DesignBuilder, Player};

    /// 0{1,2} ─ 0.1{1} ─ 0.1.1 †
    ///        └ 0.2{}
    fn branching() -> Design {
        let mut b = DesignBuilder::new("p", Player::Proponent);
        b.proper("0", [1, 2]).unwrap();
        b.proper("0.1", [1]).unwrap();
        b.daimon("0.1.1").unwrap();
        b.proper("0.2", []).unwrap();
        b.build()
    }

    fn loci(c: &Chronicle) -> Vec<String> {
        c.steps.iter().map(|s| s.locus.to_string()).collect()
    }

    #[test]
    fn test_extract_from_root_takes_smallest() {
        let d = branching();
        let c = ChronicleExtractor::default()
            .extract_from(&d, &ActId::from("p#0"))
            .unwrap();
        assert_eq!(loci(&c), ["0", "0.1", "0.1.1"]);
        assert!(c.is_maximal);
        assert!(c.ends_in_daimon());
    }

    #[test]
    fn test_extract_from_inner_act() {
        let d = branching();
        let c = ChronicleExtractor::default()
            .extract_from(&d, &ActId::from("p#3"))
            .unwrap();
        assert_eq!(loci(&c), ["0.2"]);
        assert!(c.is_maximal);
    }

    #[test]
    fn test_extract_from_unknown_act() {
        let err = ChronicleExtractor::default()
            .extract_from(&branching(), &ActId::from("nope"))
            .unwrap_err();
        assert_eq!(err, LudicsError::UnknownAct("nope".into()));
    }

    #[test]
    fn test_open_child_without_act_is_not_maximal() {
        let mut b = DesignBuilder::new("p", Player::Proponent);
        b.proper("0", [1]).unwrap();
        b.proper("0.1", [7]).unwrap();
        let d = b.build();
        let c = ChronicleExtractor::default()
            .extract_from(&d, &ActId::from("p#0"))
            .unwrap();
        assert_eq!(loci(&c), ["0", "0.1"]);
        assert!(!c.is_maximal);
    }

    #[test]
    fn test_step_cap_truncates() {
        let d = branching();
        let c = ChronicleExtractor::new(2)
            .extract_from(&d, &ActId::from("p#0"))
            .unwrap();
        assert_eq!(c.len(), 2);
        assert!(!c.is_maximal);
    }

    #[test]
    fn test_extract_all_one_per_branch() {
        let all = ChronicleExtractor::default().extract_all(&branching());
        assert_eq!(all.len(), 2);
        assert_eq!(loci(&all[0]), ["0", "0.1", "0.1.1"]);
        assert_eq!(loci(&all[1]), ["0", "0.2"]);
        assert!(all.iter().all(|c| c.is_maximal));
    }

    #[test]
    fn test_extract_all_empty_design() {
        let d = Design::empty("p", Player::Proponent);
        assert!(ChronicleExtractor::default().extract_all(&d).is_empty());
    }

    #[test]
    fn test_extract_all_cap() {
        let all = ChronicleExtractor::new(1).extract_all(&branching());
        assert!(!all.is_empty());
        assert!(!all.last().unwrap().is_maximal);
    }

    #[test]
    fn test_along_dispute_matches_pairs() {
        let p = branching();
        let mut b = DesignBuilder::new("n", Player::Opponent);
        b.proper("0", [2]).unwrap();
        b.proper("0.2", []).unwrap();
        let n = b.build();

        let dispute = DisputeEngine::default().interact(&p, &n).unwrap();
        let extractor = ChronicleExtractor::default();

        let pc = extractor.along_dispute(&p, &dispute).unwrap();
        assert_eq!(loci(&pc), ["0", "0.2"]);
        let nc = extractor.along_dispute(&n, &dispute).unwrap();
        assert_eq!(
            nc.act_ids(),
            dispute.acts_of(ludics_types::Polarity::Negative)
        );

        let stranger = Design::empty("x", Player::Opponent);
        assert!(matches!(
            extractor.along_dispute(&stranger, &dispute),
            Err(LudicsError::UnknownDesign(_))
        ));
    }
}

// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Innocence & Saturation Analyzer
// ─────────────────────────────────────────────────────────────────────
//! Innocence = determinism ∧ view-stability.
//!
//! Determinism groups every own move by the view of the history before
//! it; a group with two distinct responses is a violation.
//! View-stability requires the view of every play to be a play of the
//! strategy.
//!
//! Saturation asks whether `Views(S) ⊆ S`. An innocent strategy is
//! always saturated, so the analyzer may skip the closure and report
//! the result as inferred.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use ludics_types::{LudicsConfig, Play, PlayMove, Strategy};

use crate::view::{view, views};

/// Two or more responses to the same view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnocenceViolation {
    pub view: Vec<PlayMove>,
    pub responses: Vec<PlayMove>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnocenceReport {
    pub is_innocent: bool,
    pub is_deterministic: bool,
    pub is_view_stable: bool,
    pub violations: Vec<InnocenceViolation>,
    /// Plays whose view is not itself a play.
    pub unstable_plays: Vec<Play>,
}

/// How the saturation verdict was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SaturationBasis {
    Computed,
    InferredFromInnocence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaturationReport {
    pub is_saturated: bool,
    /// `|closure| - |plays|`.
    pub deficiency: usize,
    pub reached_fixpoint: bool,
    pub iterations: usize,
    pub basis: SaturationBasis,
}

/// Result of closing a set of plays under view extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Closure {
    pub plays: BTreeSet<Play>,
    pub iterations: usize,
    pub reached_fixpoint: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyAnalysis {
    pub strategy: String,
    pub plays: usize,
    pub positive_plays: usize,
    pub innocence: InnocenceReport,
    pub saturation: SaturationReport,
}

/// Stateless analyzer; holds only the closure bound.
#[derive(Debug, Clone)]
pub struct StrategyAnalyzer {
    max_iterations: usize,
    shortcut: bool,
}

impl Default for StrategyAnalyzer {
    fn default() -> Self {
        Self::from_config(&LudicsConfig::default())
    }
}

impl StrategyAnalyzer {
    pub fn new(max_iterations: usize, shortcut: bool) -> Self {
        Self {
            max_iterations,
            shortcut,
        }
    }

    pub fn from_config(config: &LudicsConfig) -> Self {
        Self::new(config.saturation_max_iterations, config.shortcut_saturation)
    }

    // ── Innocence ─────────────────────────────────────────────────

    pub fn check_innocence(&self, strategy: &Strategy) -> InnocenceReport {
        let owner = strategy.owner();
        let mut responses: BTreeMap<Vec<PlayMove>, BTreeSet<PlayMove>> = BTreeMap::new();

        for play in &strategy.plays {
            for (k, mv) in play.moves.iter().enumerate() {
                if mv.polarity != owner {
                    continue;
                }
                let key = view(&play.prefix(k)).moves.iter().map(shape).collect();
                responses.entry(key).or_default().insert(shape(mv));
            }
        }

        let violations: Vec<InnocenceViolation> = responses
            .into_iter()
            .filter(|(_, r)| r.len() > 1)
            .map(|(view, r)| InnocenceViolation {
                view,
                responses: r.into_iter().collect(),
            })
            .collect();

        let unstable_plays: Vec<Play> = strategy
            .plays
            .iter()
            .filter(|p| !strategy.plays.contains(&view(p)))
            .cloned()
            .collect();

        let is_deterministic = violations.is_empty();
        let is_view_stable = unstable_plays.is_empty();
        InnocenceReport {
            is_innocent: is_deterministic && is_view_stable,
            is_deterministic,
            is_view_stable,
            violations,
            unstable_plays,
        }
    }

    // ── Saturation ────────────────────────────────────────────────

    /// Close the plays under view extraction, up to the iteration cap.
    pub fn closure(&self, strategy: &Strategy) -> Closure {
        let mut plays = strategy.plays.clone();
        let mut iterations = 0;
        let mut reached_fixpoint = false;

        while iterations < self.max_iterations {
            iterations += 1;
            let missing: Vec<Play> = views(&plays)
                .into_iter()
                .filter(|v| !plays.contains(v))
                .collect();
            if missing.is_empty() {
                reached_fixpoint = true;
                break;
            }
            plays.extend(missing);
        }

        if reached_fixpoint {
            log::debug!(
                "closure of {} settled after {iterations} rounds ({} plays)",
                strategy.name,
                plays.len()
            );
        } else {
            log::warn!(
                "closure of {} cut at {} rounds ({} plays)",
                strategy.name,
                self.max_iterations,
                plays.len()
            );
        }

        Closure {
            plays,
            iterations,
            reached_fixpoint,
        }
    }

    /// The strategy with its closure as plays.
    pub fn saturate(&self, strategy: &Strategy) -> Strategy {
        Strategy {
            plays: self.closure(strategy).plays,
            ..strategy.clone()
        }
    }

    pub fn check_saturation(&self, strategy: &Strategy) -> SaturationReport {
        let closure = self.closure(strategy);
        let is_saturated = views(&strategy.plays).is_subset(&strategy.plays);
        SaturationReport {
            is_saturated,
            deficiency: closure.plays.len() - strategy.plays.len(),
            reached_fixpoint: closure.reached_fixpoint,
            iterations: closure.iterations,
            basis: SaturationBasis::Computed,
        }
    }

    /// Innocence plus saturation, shortcutting the latter when allowed.
    pub fn analyze(&self, strategy: &Strategy) -> StrategyAnalysis {
        let innocence = self.check_innocence(strategy);
        let saturation = if self.shortcut && innocence.is_innocent {
            SaturationReport {
                is_saturated: true,
                deficiency: 0,
                reached_fixpoint: true,
                iterations: 0,
                basis: SaturationBasis::InferredFromInnocence,
            }
        } else {
            self.check_saturation(strategy)
        };

        StrategyAnalysis {
            strategy: strategy.name.clone(),
            plays: strategy.len(),
            positive_plays: strategy.positive_plays(),
            innocence,
            saturation,
        }
    }
}

/// Moves compare by shape; act ids may differ across sources.
fn shape(mv: &PlayMove) -> PlayMove {
    PlayMove {
        act: None,
        ..mv.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chronicle::ChronicleExtractor;
    use crate::dispute::DisputeEngine;
    use crate::strategy::StrategyBuilder;
    use ludics_types::{
        ActKind, Design, DesignBuilder, DesignId, Locus, Player, Polarity, Ramification,
    };

    use Polarity::{Negative as N, Positive as P};

    fn mv(locus: &str, polarity: Polarity, labels: &[u32]) -> PlayMove {
        PlayMove {
            locus: Locus::parse(locus).unwrap(),
            polarity,
            kind: ActKind::Proper,
            ramification: Ramification::new(labels.iter().copied()),
            act: None,
        }
    }

    fn strategy(plays: Vec<Vec<PlayMove>>) -> Strategy {
        let mut s = Strategy::new("s", DesignId::from("p"), Player::Proponent);
        for moves in plays {
            s.plays.insert(Play { owner: P, moves });
        }
        s
    }

    fn pos() -> Design {
        let mut b = DesignBuilder::new("p", Player::Proponent);
        b.proper("0", [1, 2]).unwrap();
        b.proper("0.1", [1]).unwrap();
        b.proper("0.2", []).unwrap();
        b.build()
    }

    // ── Innocence tests ───────────────────────────────────────────

    #[test]
    fn test_same_view_different_moves_is_not_innocent() {
        let s = strategy(vec![vec![mv("0", P, &[1])], vec![mv("0", P, &[2])]]);
        let report = StrategyAnalyzer::default().check_innocence(&s);
        assert!(!report.is_innocent);
        assert!(!report.is_deterministic);
        assert_eq!(report.violations.len(), 1);
        assert!(report.violations[0].view.is_empty());
        assert_eq!(report.violations[0].responses.len(), 2);
    }

    #[test]
    fn test_design_strategies_are_innocent() {
        let p = pos();
        let s = StrategyBuilder::from_design("s", &p, &ChronicleExtractor::default());
        let report = StrategyAnalyzer::default().check_innocence(&s);
        assert!(report.is_innocent, "{report:?}");
    }

    #[test]
    fn test_dispute_strategy_is_innocent() {
        let p = pos();
        let negs: Vec<Design> = [1, 2]
            .into_iter()
            .map(|label| {
                let mut b = DesignBuilder::new(format!("n{label}"), Player::Opponent);
                b.proper("0", [label]).unwrap();
                b.daimon(&format!("0.{label}")).unwrap();
                b.build()
            })
            .collect();
        let disputes = DisputeEngine::default().interact_all(&[p.clone()], &negs).unwrap();
        let s = StrategyBuilder::from_disputes("s", &p, &disputes).unwrap();
        let analysis = StrategyAnalyzer::default().analyze(&s);
        assert!(analysis.innocence.is_innocent);
        assert!(analysis.saturation.is_saturated);
        assert_eq!(analysis.saturation.basis, SaturationBasis::InferredFromInnocence);
    }

    #[test]
    fn test_view_unstable_play_reported() {
        let s = strategy(vec![vec![
            mv("0", P, &[1, 2]),
            mv("0.1", N, &[1]),
            mv("0.1.1", P, &[]),
            mv("0.2", N, &[1]),
            mv("0.2.1", P, &[]),
        ]]);
        let report = StrategyAnalyzer::default().check_innocence(&s);
        assert!(report.is_deterministic);
        assert!(!report.is_view_stable);
        assert_eq!(report.unstable_plays.len(), 1);
    }

    // ── Saturation tests ──────────────────────────────────────────

    fn unsaturated() -> Strategy {
        strategy(vec![vec![
            mv("0", P, &[1, 2]),
            mv("0.1", N, &[1]),
            mv("0.1.1", P, &[]),
            mv("0.2", N, &[1]),
            mv("0.2.1", P, &[]),
        ]])
    }

    #[test]
    fn test_closure_adds_missing_view() {
        let analyzer = StrategyAnalyzer::default();
        let closure = analyzer.closure(&unsaturated());
        assert!(closure.reached_fixpoint);
        assert_eq!(closure.plays.len(), 2);
        assert_eq!(closure.iterations, 2);
    }

    #[test]
    fn test_closure_is_idempotent() {
        let analyzer = StrategyAnalyzer::default();
        let once = analyzer.saturate(&unsaturated());
        let twice = analyzer.saturate(&once);
        assert_eq!(once.plays, twice.plays);
        assert!(analyzer.check_saturation(&once).is_saturated);
    }

    #[test]
    fn test_saturation_deficiency() {
        let report = StrategyAnalyzer::default().check_saturation(&unsaturated());
        assert!(!report.is_saturated);
        assert_eq!(report.deficiency, 1);
        assert_eq!(report.basis, SaturationBasis::Computed);
    }

    #[test]
    fn test_closure_cap_is_inconclusive() {
        let closure = StrategyAnalyzer::new(1, true).closure(&unsaturated());
        assert!(!closure.reached_fixpoint);
        assert_eq!(closure.iterations, 1);
    }

    #[test]
    fn test_no_shortcut_still_computes() {
        let p = pos();
        let s = StrategyBuilder::from_design("s", &p, &ChronicleExtractor::default());
        let analysis = StrategyAnalyzer::new(16, false).analyze(&s);
        assert!(analysis.innocence.is_innocent);
        assert!(analysis.saturation.is_saturated);
        assert_eq!(analysis.saturation.basis, SaturationBasis::Computed);
        assert_eq!(analysis.plays, 2);
    }

    #[test]
    fn test_empty_strategy() {
        let s = strategy(vec![]);
        let analysis = StrategyAnalyzer::default().analyze(&s);
        assert!(analysis.innocence.is_innocent);
        assert!(analysis.saturation.is_saturated);
    }
}

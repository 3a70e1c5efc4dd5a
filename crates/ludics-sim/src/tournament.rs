// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Round-Robin Tournament
// ─────────────────────────────────────────────────────────────────────

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use ludics_types::{LudicsError, LudicsResult};

use crate::simulator::{BatchReport, Contender, GameSimulator};

/// Aggregate over every game a strategy played, in either seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub id: String,
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub win_rate: f64,
}

impl Standing {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            games: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            win_rate: 0.0,
        }
    }

    fn record(&mut self, games: usize, wins: usize, losses: usize) {
        self.games += games;
        self.wins += wins;
        self.losses += losses;
        self.draws += games - wins - losses;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentReport {
    /// Best first: win rate descending, then id.
    pub standings: Vec<Standing>,
    /// One batch per ordered pairing.
    pub matches: Vec<BatchReport>,
}

impl TournamentReport {
    pub fn leader(&self) -> Option<&Standing> {
        self.standings.first()
    }
}

impl GameSimulator {
    /// Round robin over every registered strategy: each ordered pair of
    /// distinct ids plays `games_per_match` games.
    pub fn run_tournament(&self, games_per_match: usize) -> LudicsResult<TournamentReport> {
        let ids = self.registry().ids();
        if ids.len() < 2 {
            return Err(LudicsError::Config(
                "tournament needs at least two registered strategies".into(),
            ));
        }

        let mut standings: BTreeMap<&str, Standing> =
            ids.iter().map(|id| (id.as_str(), Standing::new(id))).collect();
        let mut matches = Vec::with_capacity(ids.len() * (ids.len() - 1));

        for proponent in &ids {
            for opponent in &ids {
                if proponent == opponent {
                    continue;
                }
                let report = self.run_batch(
                    &Contender::Strategy(proponent.clone()),
                    &Contender::Strategy(opponent.clone()),
                    games_per_match,
                )?;
                if let Some(s) = standings.get_mut(proponent.as_str()) {
                    s.record(report.games, report.proponent_wins, report.opponent_wins);
                }
                if let Some(s) = standings.get_mut(opponent.as_str()) {
                    s.record(report.games, report.opponent_wins, report.proponent_wins);
                }
                matches.push(report);
            }
        }

        let mut standings: Vec<Standing> = standings
            .into_values()
            .map(|mut s| {
                s.win_rate = s.wins as f64 / s.games.max(1) as f64;
                s
            })
            .collect();
        standings.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate).then_with(|| a.id.cmp(&b.id)));

        if let Some(leader) = standings.first() {
            log::info!(
                "tournament: {} strategies, {} matches, leader {} ({:.3})",
                standings.len(),
                matches.len(),
                leader.id,
                leader.win_rate
            );
        }
        Ok(TournamentReport { standings, matches })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{Difficulty, RandomPolicy, ScriptedAi};
    use crate::registry::StrategyRegistry;
    use ludics_types::LudicsConfig;
    use std::sync::Arc;

    fn simulator(ids: &[&str]) -> GameSimulator {
        let registry = Arc::new(StrategyRegistry::new());
        for id in ids {
            registry.register(*id, Arc::new(RandomPolicy));
        }
        GameSimulator::new(&LudicsConfig::default(), registry).unwrap()
    }

    #[test]
    fn test_every_ordered_pair_plays() {
        let report = simulator(&["a", "b", "c"]).run_tournament(2).unwrap();
        assert_eq!(report.matches.len(), 6);
        assert!(report
            .matches
            .iter()
            .all(|m| m.proponent != m.opponent && m.games == 2));
        for s in &report.standings {
            assert_eq!(s.games, 8);
            assert_eq!(s.wins + s.losses + s.draws, s.games);
        }
    }

    #[test]
    fn test_standings_are_ranked() {
        let report = simulator(&["a", "b", "c", "d"]).run_tournament(3).unwrap();
        for w in report.standings.windows(2) {
            assert!(
                w[0].win_rate > w[1].win_rate
                    || (w[0].win_rate == w[1].win_rate && w[0].id < w[1].id)
            );
        }
    }

    #[test]
    fn test_stronger_opener_leads() {
        let registry = Arc::new(StrategyRegistry::new());
        // Opening with {} wins on the spot; the greedy AI always does so.
        registry.register("greedy", Arc::new(ScriptedAi::new(Difficulty::Medium)));
        registry.register("random", Arc::new(RandomPolicy));
        let sim = GameSimulator::new(&LudicsConfig::default(), registry).unwrap();
        let report = sim.run_tournament(5).unwrap();
        assert_eq!(report.leader().unwrap().id, "greedy");
    }

    #[test]
    fn test_needs_two_strategies() {
        assert!(matches!(
            simulator(&["solo"]).run_tournament(1),
            Err(LudicsError::Config(_))
        ));
    }
}

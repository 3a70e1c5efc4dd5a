// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Move Policies
// ─────────────────────────────────────────────────────────────────────
//! How a contender picks its next move.
//!
//! - `StrategyPolicy`: replays moves a ludics strategy has made.
//! - `ScriptedAi`: random, greedy or minimax on mobility.
//! - `RandomPolicy`: uniform baseline.
//!
//! `StrategyPolicy` matches design loci against arena addresses as is.
//! The arena gives each player only the depths of one parity, so a
//! design's acts at the other parity (a Proponent act at `0.1`, or its
//! closing daimon at `0.1.1.1`) never match and the policy plays a
//! random legal move there instead.

use std::collections::BTreeSet;
use std::fmt;

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use ludics_types::{Locus, Player, Polarity, Ramification, Strategy};

use crate::arena::{ArenaMove, GameState, UniversalArena};

/// Who decided a traced move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveSource {
    Strategy,
    Ai,
    Random,
}

/// A pick among the legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub index: usize,
    pub source: MoveSource,
}

/// Trait for move selection. `legal` is never empty.
pub trait MovePolicy: Send + Sync {
    fn name(&self) -> &str;

    fn choose(
        &self,
        arena: &UniversalArena,
        state: &GameState,
        legal: &[&ArenaMove],
        rng: &mut StdRng,
    ) -> Choice;
}

// ── Random ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct RandomPolicy;

impl MovePolicy for RandomPolicy {
    fn name(&self) -> &str {
        "random"
    }

    fn choose(
        &self,
        _arena: &UniversalArena,
        _state: &GameState,
        legal: &[&ArenaMove],
        rng: &mut StdRng,
    ) -> Choice {
        Choice {
            index: rng.gen_range(0..legal.len()),
            source: MoveSource::Random,
        }
    }
}

// ── Scripted AI ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => f.write_str("easy"),
            Difficulty::Medium => f.write_str("medium"),
            Difficulty::Hard => f.write_str("hard"),
        }
    }
}

const HARD_DEPTH: usize = 3;
const DECISIVE: i64 = 1_000;

#[derive(Debug, Clone)]
pub struct ScriptedAi {
    difficulty: Difficulty,
    name: String,
}

impl ScriptedAi {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            name: format!("ai-{difficulty}"),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

/// Own options minus the other side's, seen from `player`.
pub fn mobility(arena: &UniversalArena, state: &GameState, player: Player) -> i64 {
    let own = arena.moves_for(state, player).len() as i64;
    let theirs = arena.moves_for(state, player.other()).len() as i64;
    own - theirs
}

fn minimax(arena: &UniversalArena, state: &GameState, player: Player, depth: usize) -> i64 {
    let legal = arena.legal_moves(state);
    if legal.is_empty() {
        return if state.to_move() == player {
            -DECISIVE
        } else {
            DECISIVE
        };
    }
    if depth == 0 {
        return mobility(arena, state, player);
    }

    let scores = legal
        .iter()
        .map(|mv| minimax(arena, &state.with(mv), player, depth - 1));
    if state.to_move() == player {
        scores.max().unwrap_or(0)
    } else {
        scores.min().unwrap_or(0)
    }
}

/// Index of the best score; the earliest wins ties.
fn best(scores: impl Iterator<Item = i64>) -> usize {
    let mut best = (0, i64::MIN);
    for (i, score) in scores.enumerate() {
        if score > best.1 {
            best = (i, score);
        }
    }
    best.0
}

impl MovePolicy for ScriptedAi {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose(
        &self,
        arena: &UniversalArena,
        state: &GameState,
        legal: &[&ArenaMove],
        rng: &mut StdRng,
    ) -> Choice {
        let player = state.to_move();
        let index = match self.difficulty {
            Difficulty::Easy => rng.gen_range(0..legal.len()),
            Difficulty::Medium => best(
                legal
                    .iter()
                    .map(|mv| mobility(arena, &state.with(mv), player)),
            ),
            Difficulty::Hard => best(
                legal
                    .iter()
                    .map(|mv| minimax(arena, &state.with(mv), player, HARD_DEPTH - 1)),
            ),
        };
        Choice {
            index,
            source: MoveSource::Ai,
        }
    }
}

// ── Strategy-backed ─────────────────────────────────────────────────

/// Prefers legal moves whose address and ramification the strategy has
/// played on the mover's side; falls back to a random legal move.
#[derive(Debug, Clone)]
pub struct StrategyPolicy {
    name: String,
    known: BTreeSet<(Polarity, Locus, Ramification)>,
}

impl StrategyPolicy {
    pub fn new(strategy: &Strategy) -> Self {
        let known = strategy
            .plays
            .iter()
            .flat_map(|play| play.moves.iter())
            .map(|mv| (mv.polarity, mv.locus.clone(), mv.ramification.clone()))
            .collect();
        Self {
            name: strategy.name.clone(),
            known,
        }
    }

    pub fn knows(&self, mv: &ArenaMove) -> bool {
        self.known.contains(&(
            mv.player.polarity(),
            mv.address.clone(),
            mv.ramification.clone(),
        ))
    }
}

impl MovePolicy for StrategyPolicy {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose(
        &self,
        _arena: &UniversalArena,
        _state: &GameState,
        legal: &[&ArenaMove],
        rng: &mut StdRng,
    ) -> Choice {
        match legal.iter().position(|mv| self.knows(mv)) {
            Some(index) => Choice {
                index,
                source: MoveSource::Strategy,
            },
            None => Choice {
                index: rng.gen_range(0..legal.len()),
                source: MoveSource::Random,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ludics_core::{ChronicleExtractor, StrategyBuilder};
    use ludics_types::DesignBuilder;
    use rand::SeedableRng;

    fn l(s: &str) -> Locus {
        Locus::parse(s).unwrap()
    }

    fn pick(policy: &dyn MovePolicy, arena: &UniversalArena, state: &GameState) -> (ArenaMove, Choice) {
        let mut rng = StdRng::seed_from_u64(7);
        let legal = arena.legal_moves(state);
        let choice = policy.choose(arena, state, &legal, &mut rng);
        (legal[choice.index].clone(), choice)
    }

    #[test]
    fn test_random_stays_in_range() {
        let arena = UniversalArena::new(3, 2);
        let state = GameState::new();
        let legal = arena.legal_moves(&state);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let c = RandomPolicy.choose(&arena, &state, &legal, &mut rng);
            assert!(c.index < legal.len());
            assert_eq!(c.source, MoveSource::Random);
        }
    }

    #[test]
    fn test_medium_prefers_mobility() {
        let arena = UniversalArena::new(3, 2);
        let (mv, choice) = pick(&ScriptedAi::new(Difficulty::Medium), &arena, &GameState::new());
        // {} opens nothing for the Opponent; wider openings hand it moves.
        assert_eq!(choice.source, MoveSource::Ai);
        assert_eq!(mv.ramification, Ramification::empty());
    }

    #[test]
    fn test_hard_finds_immediate_win() {
        let arena = UniversalArena::new(3, 2);
        let mut state = GameState::new();
        state.push(arena.moves_at(&l("0"))[1].clone());
        // Opponent answers 0.1; closing it with {} leaves P without a move.
        let (mv, _) = pick(&ScriptedAi::new(Difficulty::Hard), &arena, &state);
        assert_eq!(mv.address, l("0.1"));
        assert_eq!(mv.ramification, Ramification::empty());
    }

    #[test]
    fn test_strategy_policy_replays_known_move() {
        let mut b = DesignBuilder::new("p", Player::Proponent);
        b.proper("0", [1]).unwrap();
        let design = b.build();
        let strategy = StrategyBuilder::from_design("s", &design, &ChronicleExtractor::default());
        let policy = StrategyPolicy::new(&strategy);

        let arena = UniversalArena::new(3, 2);
        let (mv, choice) = pick(&policy, &arena, &GameState::new());
        assert_eq!(choice.source, MoveSource::Strategy);
        assert_eq!(mv.ramification, Ramification::new([1]));
        assert_eq!(policy.name(), "s");
    }

    #[test]
    fn test_strategy_policy_falls_back() {
        let strategy = Strategy::new("empty", "p".into(), Player::Proponent);
        let policy = StrategyPolicy::new(&strategy);
        let arena = UniversalArena::new(3, 2);
        let (_, choice) = pick(&policy, &arena, &GameState::new());
        assert_eq!(choice.source, MoveSource::Random);
    }

    #[test]
    fn test_strategy_policy_skips_off_parity_acts() {
        let mut b = DesignBuilder::new("p", Player::Proponent);
        b.proper("0", [1]).unwrap();
        b.proper("0.1", [1]).unwrap();
        let design = b.build();
        let strategy = StrategyBuilder::from_design("s", &design, &ChronicleExtractor::default());
        let policy = StrategyPolicy::new(&strategy);

        let arena = UniversalArena::new(4, 2);
        // 0.1 belongs to the Opponent, so the design's own act there is
        // never a Proponent arena move.
        let at_even = ArenaMove {
            address: l("0.1"),
            player: Player::Opponent,
            ramification: Ramification::new([1]),
        };
        assert!(!policy.knows(&at_even));
        assert_eq!(arena.moves_at(&l("0.1"))[1].player, Player::Opponent);

        let mut state = GameState::new();
        state.push(arena.moves_at(&l("0"))[1].clone());
        state.push(at_even);
        let (mv, choice) = pick(&policy, &arena, &state);
        assert_eq!(mv.address, l("0.1.1"));
        assert_eq!(choice.source, MoveSource::Random);
    }

    #[test]
    fn test_ai_names() {
        assert_eq!(ScriptedAi::new(Difficulty::Hard).name(), "ai-hard");
        assert_eq!(ScriptedAi::new(Difficulty::Easy).difficulty(), Difficulty::Easy);
    }
}

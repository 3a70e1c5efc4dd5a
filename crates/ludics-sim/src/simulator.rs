// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Game Simulator
// ─────────────────────────────────────────────────────────────────────
//! Plays contenders against each other on a [`UniversalArena`].
//!
//! Every game is seeded: the same contenders, arena and seed replay the
//! same trace. A game ends when the player to move has no legal move
//! (the other player wins) or when `max_moves` or the timeout is hit,
//! which is a draw.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use ludics_types::{Locus, LudicsConfig, LudicsError, LudicsResult, Player, Ramification};

use crate::arena::{GameState, UniversalArena};
use crate::policy::{Difficulty, MovePolicy, MoveSource, RandomPolicy, ScriptedAi};
use crate::registry::StrategyRegistry;

/// One side of a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Contender {
    /// Id in the simulator's registry.
    Strategy(String),
    Ai(Difficulty),
    Random,
}

impl fmt::Display for Contender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contender::Strategy(id) => f.write_str(id),
            Contender::Ai(difficulty) => write!(f, "ai-{difficulty}"),
            Contender::Random => f.write_str("random"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// 1-based.
    pub move_number: usize,
    pub player: Player,
    pub address: Locus,
    pub ramification: Ramification,
    pub source: MoveSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Termination {
    NoLegalMove,
    MaxMoves,
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub proponent: String,
    pub opponent: String,
    pub seed: u64,
    pub trace: Vec<TraceEntry>,
    pub outcome: GameOutcome,
    pub termination: Termination,
    pub moves: usize,
    pub duration_ms: f64,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            GameOutcome::Win(player) => Some(player),
            GameOutcome::Draw => None,
        }
    }
}

/// Aggregate over a batch of games between the same two contenders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub proponent: String,
    pub opponent: String,
    pub games: usize,
    pub proponent_wins: usize,
    pub opponent_wins: usize,
    pub draws: usize,
    pub proponent_win_rate: f64,
    pub opponent_win_rate: f64,
    /// `1 - (proponent_win_rate + opponent_win_rate)`, so the three
    /// rates sum to exactly 1.
    pub draw_rate: f64,
    pub average_moves: f64,
    pub average_duration_ms: f64,
    pub records: Vec<GameRecord>,
}

impl BatchReport {
    fn from_records(proponent: String, opponent: String, records: Vec<GameRecord>) -> Self {
        let games = records.len();
        let count = |player: Player| {
            records
                .iter()
                .filter(|r| r.winner() == Some(player))
                .count()
        };
        let proponent_wins = count(Player::Proponent);
        let opponent_wins = count(Player::Opponent);
        let n = games.max(1) as f64;

        let proponent_win_rate = proponent_wins as f64 / n;
        let opponent_win_rate = opponent_wins as f64 / n;
        Self {
            proponent,
            opponent,
            games,
            proponent_wins,
            opponent_wins,
            draws: games - proponent_wins - opponent_wins,
            proponent_win_rate,
            opponent_win_rate,
            draw_rate: 1.0 - (proponent_win_rate + opponent_win_rate),
            average_moves: records.iter().map(|r| r.moves as f64).sum::<f64>() / n,
            average_duration_ms: records.iter().map(|r| r.duration_ms).sum::<f64>() / n,
            records,
        }
    }
}

pub struct GameSimulator {
    arena: UniversalArena,
    registry: Arc<StrategyRegistry>,
    max_moves: usize,
    timeout: Duration,
    seed: u64,
    game_count: usize,
}

impl GameSimulator {
    /// Validates `config`; the arena is built from its size fields.
    pub fn new(config: &LudicsConfig, registry: Arc<StrategyRegistry>) -> LudicsResult<Self> {
        config.validate()?;
        Ok(Self {
            arena: UniversalArena::from_config(config),
            registry,
            max_moves: config.max_moves,
            timeout: Duration::from_millis(config.timeout_ms),
            seed: config.seed,
            game_count: config.game_count,
        })
    }

    /// Replace the per-game wall-clock cap.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn arena(&self) -> &UniversalArena {
        &self.arena
    }

    pub fn registry(&self) -> &Arc<StrategyRegistry> {
        &self.registry
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn policy(&self, contender: &Contender) -> LudicsResult<Arc<dyn MovePolicy>> {
        Ok(match contender {
            Contender::Strategy(id) => self.registry.get(id)?,
            Contender::Ai(difficulty) => Arc::new(ScriptedAi::new(*difficulty)),
            Contender::Random => Arc::new(RandomPolicy),
        })
    }

    /// Play one game.
    pub fn play(
        &self,
        proponent: &Contender,
        opponent: &Contender,
        seed: u64,
    ) -> LudicsResult<GameRecord> {
        let p = self.policy(proponent)?;
        let o = self.policy(opponent)?;
        Ok(self.run_game(
            (proponent.to_string(), p.as_ref()),
            (opponent.to_string(), o.as_ref()),
            seed,
        ))
    }

    fn run_game(
        &self,
        (p_name, p): (String, &dyn MovePolicy),
        (o_name, o): (String, &dyn MovePolicy),
        seed: u64,
    ) -> GameRecord {
        let started = Instant::now();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = GameState::new();
        let mut trace = Vec::new();

        let (outcome, termination) = loop {
            let mover = state.to_move();
            let legal = self.arena.legal_moves(&state);
            if legal.is_empty() {
                break (GameOutcome::Win(mover.other()), Termination::NoLegalMove);
            }
            if state.len() >= self.max_moves {
                log::warn!(
                    "{p_name} vs {o_name} (seed {seed}): max_moves {} reached, draw",
                    self.max_moves
                );
                break (GameOutcome::Draw, Termination::MaxMoves);
            }
            if started.elapsed() >= self.timeout {
                log::warn!(
                    "{p_name} vs {o_name} (seed {seed}): timeout after {} moves, draw",
                    state.len()
                );
                break (GameOutcome::Draw, Termination::Timeout);
            }

            let policy = match mover {
                Player::Proponent => p,
                Player::Opponent => o,
            };
            let choice = policy.choose(&self.arena, &state, &legal, &mut rng);
            let mv = match legal.get(choice.index) {
                Some(mv) => (*mv).clone(),
                None => {
                    log::warn!(
                        "{} chose index {} of {} legal moves; taking the first",
                        policy.name(),
                        choice.index,
                        legal.len()
                    );
                    legal[0].clone()
                }
            };

            trace.push(TraceEntry {
                move_number: state.len() + 1,
                player: mover,
                address: mv.address.clone(),
                ramification: mv.ramification.clone(),
                source: choice.source,
            });
            state.push(mv);
        };

        let record = GameRecord {
            proponent: p_name,
            opponent: o_name,
            seed,
            moves: trace.len(),
            trace,
            outcome,
            termination,
            duration_ms: started.elapsed().as_secs_f64() * 1000.0,
        };
        log::debug!(
            "{} vs {} (seed {}): {:?} after {} moves",
            record.proponent,
            record.opponent,
            seed,
            record.outcome,
            record.moves
        );
        record
    }

    /// `games` independent games; game `i` is seeded with `seed + i`.
    pub fn run_batch(
        &self,
        proponent: &Contender,
        opponent: &Contender,
        games: usize,
    ) -> LudicsResult<BatchReport> {
        if games == 0 {
            return Err(LudicsError::Config("batch needs at least one game".into()));
        }
        let p = self.policy(proponent)?;
        let o = self.policy(opponent)?;
        let records = (0..games)
            .map(|i| {
                self.run_game(
                    (proponent.to_string(), p.as_ref()),
                    (opponent.to_string(), o.as_ref()),
                    self.seed.wrapping_add(i as u64),
                )
            })
            .collect();
        Ok(BatchReport::from_records(
            proponent.to_string(),
            opponent.to_string(),
            records,
        ))
    }

    /// Batch of the configured `game_count`.
    pub fn run_default_batch(
        &self,
        proponent: &Contender,
        opponent: &Contender,
    ) -> LudicsResult<BatchReport> {
        self.run_batch(proponent, opponent, self.game_count)
    }
}

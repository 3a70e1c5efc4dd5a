// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Ludics Game Simulator
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Game simulation over a universal arena.
//!
//! Architecture:
//!   - UniversalArena: move catalogue and legality by depth parity
//!   - MovePolicy: strategy-backed, scripted AI (easy/medium/hard), random
//!   - StrategyRegistry: named policies shared between threads
//!   - GameSimulator: seeded single games and batches
//!   - Tournament: round robin over the registry, ranked by win rate

pub mod arena;
pub mod policy;
pub mod registry;
pub mod simulator;
pub mod tournament;

pub use arena::{owner_of, ArenaMove, GameState, UniversalArena};
pub use policy::{
    mobility, Choice, Difficulty, MovePolicy, MoveSource, RandomPolicy, ScriptedAi,
    StrategyPolicy,
};
pub use registry::StrategyRegistry;
pub use simulator::{
    BatchReport, Contender, GameOutcome, GameRecord, GameSimulator, Termination, TraceEntry,
};
pub use tournament::{Standing, TournamentReport};

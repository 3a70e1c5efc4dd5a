// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Universal Arena
// ─────────────────────────────────────────────────────────────────────
//! Fixed catalogue of moves over addresses up to `max_depth`, children
//! labelled `1..=max_branching`.
//!
//! Odd depths belong to the Proponent, even depths to the Opponent.
//! Each address offers the ramifications `{}`, `{1}`, …, `{1..b}`; at
//! maximal depth only `{}`. A move is legal when its address was
//! opened by an earlier move of the other player and nobody has played
//! there yet. The root is open to the Proponent on the first move.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use ludics_types::{Locus, LudicsConfig, Player, Ramification};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArenaMove {
    pub address: Locus,
    pub player: Player,
    pub ramification: Ramification,
}

/// Position in a game: the moves played so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    history: Vec<ArenaMove>,
    played: BTreeSet<Locus>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Proponent opens; turns strictly alternate.
    pub fn to_move(&self) -> Player {
        if self.history.len() % 2 == 0 {
            Player::Proponent
        } else {
            Player::Opponent
        }
    }

    pub fn history(&self) -> &[ArenaMove] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn is_played(&self, address: &Locus) -> bool {
        self.played.contains(address)
    }

    /// Append without a legality check; callers pick from `legal_moves`.
    pub fn push(&mut self, mv: ArenaMove) {
        self.played.insert(mv.address.clone());
        self.history.push(mv);
    }

    pub fn with(&self, mv: &ArenaMove) -> GameState {
        let mut next = self.clone();
        next.push(mv.clone());
        next
    }
}

/// Owner of an address by depth parity.
pub fn owner_of(address: &Locus) -> Player {
    if address.depth() % 2 == 1 {
        Player::Proponent
    } else {
        Player::Opponent
    }
}

#[derive(Debug, Clone)]
pub struct UniversalArena {
    max_depth: usize,
    max_branching: u32,
    catalogue: BTreeMap<Locus, Vec<ArenaMove>>,
}

impl UniversalArena {
    pub fn new(max_depth: usize, max_branching: u32) -> Self {
        let mut catalogue = BTreeMap::new();
        let mut frontier = vec![Locus::root()];

        while let Some(address) = frontier.pop() {
            let depth = address.depth();
            let widest = if depth >= max_depth { 0 } else { max_branching };
            let player = owner_of(&address);
            let offers: Vec<ArenaMove> = (0..=widest)
                .map(|k| ArenaMove {
                    address: address.clone(),
                    player,
                    ramification: Ramification::new(1..=k),
                })
                .collect();
            if widest > 0 {
                frontier.extend((1..=widest).map(|label| address.child(label)));
            }
            catalogue.insert(address, offers);
        }

        Self {
            max_depth,
            max_branching,
            catalogue,
        }
    }

    pub fn from_config(config: &LudicsConfig) -> Self {
        Self::new(config.arena_max_depth, config.arena_max_branching)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn max_branching(&self) -> u32 {
        self.max_branching
    }

    pub fn address_count(&self) -> usize {
        self.catalogue.len()
    }

    pub fn move_count(&self) -> usize {
        self.catalogue.values().map(Vec::len).sum()
    }

    pub fn moves_at(&self, address: &Locus) -> &[ArenaMove] {
        self.catalogue
            .get(address)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Addresses `player` may answer in `state`, ascending.
    pub fn open_addresses(&self, state: &GameState, player: Player) -> BTreeSet<Locus> {
        let mut open = BTreeSet::new();
        if state.is_empty() && player == Player::Proponent {
            open.insert(Locus::root());
        }
        for mv in state.history() {
            if mv.player == player {
                continue;
            }
            for child in mv.ramification.children_of(&mv.address) {
                if !state.is_played(&child) && owner_of(&child) == player {
                    open.insert(child);
                }
            }
        }
        open
    }

    /// Legal moves for `player`, whether or not it is their turn.
    pub fn moves_for(&self, state: &GameState, player: Player) -> Vec<&ArenaMove> {
        self.open_addresses(state, player)
            .iter()
            .flat_map(|address| self.moves_at(address))
            .collect()
    }

    /// Legal moves for the player to move.
    pub fn legal_moves(&self, state: &GameState) -> Vec<&ArenaMove> {
        self.moves_for(state, state.to_move())
    }

    pub fn is_legal(&self, state: &GameState, mv: &ArenaMove) -> bool {
        mv.player == state.to_move() && self.legal_moves(state).contains(&mv)
    }
}

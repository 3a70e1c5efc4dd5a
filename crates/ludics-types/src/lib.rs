// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Ludics Kernel Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for the
//! Ludics Kernel, the interaction engine behind dialogue analysis.
//!
//! Loci, acts and designs are validated here at construction time;
//! every downstream crate receives them read-only.

pub mod act;
pub mod config;
pub mod design;
pub mod error;
pub mod locus;
pub mod record;

pub use act::{Act, ActId, ActKind, ActMetadata, ActRecord, AttackType, Expression, Player, Polarity};
pub use config::LudicsConfig;
pub use design::{Design, DesignBuilder, DesignId, DesignRecord};
pub use error::{LudicsError, LudicsResult};
pub use locus::{depth_of, is_ancestor, parent_of, Locus, Ramification};
pub use record::{
    Chronicle, ChronicleStep, Dispute, DisputePair, DisputeReason, DisputeStatus, Play, PlayMove,
    Strategy, TerminalAct,
};

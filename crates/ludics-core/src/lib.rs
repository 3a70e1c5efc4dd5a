// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Ludics Kernel Core Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Interaction engine, chronicle extraction, strategy analysis and
//! type inference over validated designs.
//!
//! # Guarantees
//!
//! 1. **Purity**: every computation is a function of its inputs. Two
//!    calls with the same designs yield identical records.
//!
//! 2. **Termination**: the interaction loop, chronicle extraction and
//!    saturation closure each run under a hard bound from
//!    [`LudicsConfig`](ludics_types::LudicsConfig). Hitting a bound is a
//!    reported, inconclusive outcome, never an error or a panic.
//!
//! 3. **Innocence implies saturation**: the analyzer may report
//!    saturation as inferred once innocence holds; the basis is always
//!    recorded.

pub mod analyzer;
pub mod chronicle;
pub mod dispute;
pub mod inference;
pub mod kernel;
pub mod store;
pub mod strategy;
pub mod view;

pub use analyzer::{
    Closure, InnocenceReport, InnocenceViolation, SaturationBasis, SaturationReport,
    StrategyAnalysis, StrategyAnalyzer,
};
pub use chronicle::ChronicleExtractor;
pub use dispute::DisputeEngine;
pub use inference::{
    unify, unify_types, BehaviouralType, InferenceMode, InferredType, StructuralType,
    Substitution, TypeInferencer, TypeTerm, TypeVar,
};
pub use kernel::{DesignReport, LudicsKernel};
pub use store::{DesignStore, ExternalDesigns, InMemoryDesigns};
pub use strategy::{play_from_chronicle, play_from_dispute, StrategyBuilder};

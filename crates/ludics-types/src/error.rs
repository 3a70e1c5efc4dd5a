// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Ludics Kernel Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all Ludics Kernel failures.
///
/// Only structural violations and unresolved references are errors.
/// Outcomes such as "no interaction" or "bound exceeded" are status
/// values on the returned records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LudicsError {
    /// Address string could not be parsed.
    #[error("malformed locus {input:?}: {reason}")]
    MalformedLocus { input: String, reason: String },

    /// A design already holds an act at this locus.
    #[error("design {design}: duplicate act at locus {locus}")]
    DuplicateLocus { design: String, locus: String },

    /// A design already holds an act with this id.
    #[error("design {design}: act id {act} is already in use")]
    DuplicateAct { design: String, act: String },

    /// Non-root locus not opened by its parent act's ramification.
    #[error("design {design}: locus {locus} is not justified by any ramification")]
    UnjustifiedLocus { design: String, locus: String },

    /// A DAIMON act was given a non-empty ramification.
    #[error("design {design}: daimon at {locus} must have an empty ramification")]
    DaimonRamification { design: String, locus: String },

    /// Act polarity disagrees with the owning design.
    #[error("design {design}: act at {locus} is {found}, design expects {expected}")]
    PolarityMismatch {
        design: String,
        locus: String,
        expected: String,
        found: String,
    },

    /// Sequence indices must be strictly increasing within a design.
    #[error("design {design}: sequence index {index} does not follow {previous}")]
    SequenceOrder {
        design: String,
        index: u32,
        previous: u32,
    },

    /// Caller referenced a design id nobody registered.
    #[error("unknown design: {0}")]
    UnknownDesign(String),

    /// Caller referenced a strategy id nobody registered.
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    /// Act id not present in the design it was looked up in.
    #[error("unknown act: {0}")]
    UnknownAct(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),
}

impl LudicsError {
    /// True for construction-time structural violations.
    ///
    /// The API boundary maps these to 4xx responses.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::MalformedLocus { .. }
                | Self::DuplicateLocus { .. }
                | Self::DuplicateAct { .. }
                | Self::UnjustifiedLocus { .. }
                | Self::DaimonRamification { .. }
                | Self::PolarityMismatch { .. }
                | Self::SequenceOrder { .. }
        )
    }
}

pub type LudicsResult<T> = Result<T, LudicsError>;

// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Ludics Kernel Act Model
// ─────────────────────────────────────────────────────────────────────
//! Acts: single moves at a locus, PROPER (continues) or DAIMON
//! (terminates), with polarity, ramification and an opaque payload.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::locus::{Locus, Ramification};

/// Which side of the interaction a move belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub fn opposite(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => f.write_str("positive"),
            Self::Negative => f.write_str("negative"),
        }
    }
}

/// Participant owning a design or a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    /// Positive-seeking side.
    Proponent,
    /// Negative-seeking side.
    Opponent,
}

impl Player {
    pub fn polarity(self) -> Polarity {
        match self {
            Self::Proponent => Polarity::Positive,
            Self::Opponent => Polarity::Negative,
        }
    }

    pub fn from_polarity(polarity: Polarity) -> Self {
        match polarity {
            Polarity::Positive => Self::Proponent,
            Polarity::Negative => Self::Opponent,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Proponent => Self::Opponent,
            Self::Opponent => Self::Proponent,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proponent => f.write_str("proponent"),
            Self::Opponent => f.write_str("opponent"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActKind {
    Proper,
    Daimon,
}

/// Stable act identifier, unique within its design.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActId(pub String);

impl ActId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Opaque payload carried by an act. The kernel never interprets it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Expression {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            content: None,
        }
    }
}

/// Attack tags understood by the downstream argumentation translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackType {
    Rebut,
    Undercut,
    Undermine,
}

/// Metadata bag passed through untouched for downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ActMetadata {
    AttackType(AttackType),
    /// Unknown extensions, preserved verbatim.
    Opaque(serde_json::Map<String, serde_json::Value>),
}

/// A validated act inside a [`crate::Design`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Act {
    pub id: ActId,
    pub kind: ActKind,
    pub polarity: Polarity,
    /// Position the act is played at. For a DAIMON this is where the
    /// branch ends, not a target.
    pub locus: Locus,
    pub ramification: Ramification,
    pub expression: Expression,
    pub sequence_index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ActMetadata>,
}

impl Act {
    pub fn is_daimon(&self) -> bool {
        self.kind == ActKind::Daimon
    }

    /// Addressed locus; `None` for a DAIMON, which targets nothing.
    pub fn target(&self) -> Option<&Locus> {
        match self.kind {
            ActKind::Proper => Some(&self.locus),
            ActKind::Daimon => None,
        }
    }

    /// Child addresses opened by this act, ascending.
    pub fn children(&self) -> impl Iterator<Item = Locus> + '_ {
        self.ramification.children_of(&self.locus)
    }
}

/// Inbound act as delivered by the dialogue-move compiler or storage.
///
/// The `id` may be omitted; the design assigns `"{design}#{sequence_index}"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ActId>,
    pub kind: ActKind,
    pub polarity: Polarity,
    pub locus: Locus,
    #[serde(default)]
    pub ramification: Ramification,
    #[serde(default)]
    pub expression: Expression,
    pub sequence_index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ActMetadata>,
}

impl ActRecord {
    pub fn proper(
        polarity: Polarity,
        locus: Locus,
        ramification: Ramification,
        sequence_index: u32,
    ) -> Self {
        Self {
            id: None,
            kind: ActKind::Proper,
            polarity,
            expression: Expression::label(locus.to_string()),
            locus,
            ramification,
            sequence_index,
            metadata: None,
        }
    }

    pub fn daimon(polarity: Polarity, locus: Locus, sequence_index: u32) -> Self {
        Self {
            id: None,
            kind: ActKind::Daimon,
            polarity,
            expression: Expression::label("†"),
            locus,
            ramification: Ramification::empty(),
            sequence_index,
            metadata: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(ActId::new(id));
        self
    }

    pub fn with_expression(mut self, expression: Expression) -> Self {
        self.expression = expression;
        self
    }

    pub fn with_metadata(mut self, metadata: ActMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

impl From<Act> for ActRecord {
    fn from(act: Act) -> Self {
        Self {
            id: Some(act.id),
            kind: act.kind,
            polarity: act.polarity,
            locus: act.locus,
            ramification: act.ramification,
            expression: act.expression,
            sequence_index: act.sequence_index,
            metadata: act.metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_and_player() {
        assert_eq!(Polarity::Positive.opposite(), Polarity::Negative);
        assert_eq!(Player::Proponent.polarity(), Polarity::Positive);
        assert_eq!(Player::from_polarity(Polarity::Negative), Player::Opponent);
        assert_eq!(Player::Opponent.other(), Player::Proponent);
    }

    #[test]
    fn test_daimon_has_no_target() {
        let act = Act {
            id: ActId::from("d"),
            kind: ActKind::Daimon,
            polarity: Polarity::Negative,
            locus: Locus::parse("0.1").unwrap(),
            ramification: Ramification::empty(),
            expression: Expression::default(),
            sequence_index: 0,
            metadata: None,
        };
        assert!(act.is_daimon());
        assert!(act.target().is_none());
    }

    #[test]
    fn test_kind_serializes_screaming() {
        assert_eq!(serde_json::to_string(&ActKind::Daimon).unwrap(), "\"DAIMON\"");
    }

    #[test]
    fn test_metadata_roundtrip_attack() {
        let meta = ActMetadata::AttackType(AttackType::Undercut);
        let json = serde_json::to_string(&meta).unwrap();
        assert_eq!(json, r#"{"kind":"attack_type","value":"undercut"}"#);
        let back: ActMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, meta);
    }

    #[test]
    fn test_metadata_opaque_preserved() {
        let json = r#"{"kind":"opaque","value":{"scheme":"expert_opinion","weight":3}}"#;
        let meta: ActMetadata = serde_json::from_str(json).unwrap();
        match &meta {
            ActMetadata::Opaque(map) => assert_eq!(map["weight"], 3),
            other => panic!("expected opaque, got {other:?}"),
        }
        assert_eq!(serde_json::to_string(&meta).unwrap(), json);
    }

    #[test]
    fn test_record_defaults() {
        let json = r#"{"kind":"PROPER","polarity":"positive","locus":"0","sequence_index":0}"#;
        let record: ActRecord = serde_json::from_str(json).unwrap();
        assert!(record.id.is_none());
        assert!(record.ramification.is_empty());
        assert_eq!(record.expression, Expression::default());
    }
}

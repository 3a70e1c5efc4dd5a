// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Strategy Builder
// ─────────────────────────────────────────────────────────────────────
//! Projects disputes and chronicles onto plays, and collects them into
//! a [`Strategy`] for one design.

use ludics_types::{
    ActKind, Chronicle, Design, Dispute, LudicsError, LudicsResult, Play, PlayMove, Polarity,
    Ramification, Strategy,
};

use crate::chronicle::ChronicleExtractor;

/// The play `design` took part in during `dispute`.
///
/// Positive move first, then the negative answer at the same locus,
/// closed by the terminal DAIMON if the interaction converged. Only the
/// design's own moves keep their act ids.
pub fn play_from_dispute(design: &Design, dispute: &Dispute) -> LudicsResult<Play> {
    let owner = dispute
        .side_of(design.id())
        .ok_or_else(|| LudicsError::UnknownDesign(design.id().to_string()))?;

    let mut play = Play::new(owner);
    for pair in &dispute.pairs {
        let sides = [
            (Polarity::Positive, &pair.positive, &pair.positive_ramification),
            (Polarity::Negative, &pair.negative, &pair.negative_ramification),
        ];
        for (polarity, act, ramification) in sides {
            let act = if polarity == owner {
                if design.act(act).is_none() {
                    return Err(LudicsError::UnknownAct(act.to_string()));
                }
                Some(act.clone())
            } else {
                None
            };
            play.moves.push(PlayMove {
                locus: pair.locus.clone(),
                polarity,
                kind: ActKind::Proper,
                ramification: ramification.clone(),
                act,
            });
        }
    }

    if let Some(terminal) = &dispute.terminal {
        play.moves.push(PlayMove {
            locus: terminal.locus.clone(),
            polarity: terminal.polarity,
            kind: ActKind::Daimon,
            ramification: Ramification::empty(),
            act: (terminal.polarity == owner).then(|| terminal.act.clone()),
        });
    }

    Ok(play)
}

/// The play a chronicle describes, with the opponent opening exactly
/// the child the chronicle follows next.
pub fn play_from_chronicle(owner: Polarity, chronicle: &Chronicle) -> Play {
    let mut play = Play::new(owner);
    let opponent = owner.opposite();

    for (i, step) in chronicle.steps.iter().enumerate() {
        let next = chronicle.steps.get(i + 1).map(|s| s.locus.last());
        let prompt = PlayMove {
            locus: step.locus.clone(),
            polarity: opponent,
            kind: ActKind::Proper,
            ramification: next.into_iter().collect(),
            act: None,
        };
        let own = PlayMove {
            locus: step.locus.clone(),
            polarity: owner,
            kind: step.kind,
            ramification: step.ramification.clone(),
            act: Some(step.act.clone()),
        };

        match owner {
            Polarity::Positive => {
                play.moves.push(own);
                if next.is_some() {
                    play.moves.push(prompt);
                }
            }
            Polarity::Negative => {
                play.moves.push(prompt);
                play.moves.push(own);
            }
        }
    }

    play
}

/// Collects plays for one design. Empty plays are dropped.
pub struct StrategyBuilder<'a> {
    design: &'a Design,
    strategy: Strategy,
}

impl<'a> StrategyBuilder<'a> {
    pub fn new(name: impl Into<String>, design: &'a Design) -> Self {
        Self {
            design,
            strategy: Strategy::new(name, design.id().clone(), design.player()),
        }
    }

    pub fn dispute(&mut self, dispute: &Dispute) -> LudicsResult<&mut Self> {
        let play = play_from_dispute(self.design, dispute)?;
        self.insert(play);
        Ok(self)
    }

    pub fn chronicle(&mut self, chronicle: &Chronicle) -> LudicsResult<&mut Self> {
        if &chronicle.design != self.design.id() {
            return Err(LudicsError::UnknownDesign(chronicle.design.to_string()));
        }
        let play = play_from_chronicle(self.design.polarity(), chronicle);
        self.insert(play);
        Ok(self)
    }

    pub fn play(&mut self, play: Play) -> &mut Self {
        self.insert(play);
        self
    }

    fn insert(&mut self, play: Play) {
        if !play.is_empty() {
            self.strategy.plays.insert(play);
        }
    }

    pub fn build(self) -> Strategy {
        self.strategy
    }

    /// Strategy of `design` as exhibited by a set of disputes.
    pub fn from_disputes(
        name: impl Into<String>,
        design: &'a Design,
        disputes: &[Dispute],
    ) -> LudicsResult<Strategy> {
        let mut builder = Self::new(name, design);
        for dispute in disputes {
            builder.dispute(dispute)?;
        }
        Ok(builder.build())
    }

    /// Strategy of `design` as exhibited by all of its chronicles.
    pub fn from_design(
        name: impl Into<String>,
        design: &'a Design,
        extractor: &ChronicleExtractor,
    ) -> Strategy {
        let mut builder = Self::new(name, design);
        for chronicle in extractor.extract_all(design) {
            let play = play_from_chronicle(design.polarity(), &chronicle);
            builder.insert(play);
        }
        builder.build()
    }
}

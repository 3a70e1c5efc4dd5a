// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Ludics Kernel (Analysis Pipeline)
// ─────────────────────────────────────────────────────────────────────
//! Runs the full pipeline for designs resolved from a store:
//! disputes against context siblings, chronicles, strategy analysis
//! and type inference.
//!
//! Every stage is a pure function of the resolved designs. The kernel
//! owns nothing but its configuration and the stage engines.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use ludics_types::{
    Chronicle, Design, DesignId, Dispute, LudicsConfig, LudicsResult, Polarity, Strategy,
};

use crate::analyzer::{StrategyAnalysis, StrategyAnalyzer};
use crate::chronicle::ChronicleExtractor;
use crate::dispute::DisputeEngine;
use crate::inference::{InferredType, TypeInferencer};
use crate::store::DesignStore;
use crate::strategy::{play_from_chronicle, StrategyBuilder};

/// Everything the pipeline derives for one design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignReport {
    pub design: DesignId,
    pub disputes: Vec<Dispute>,
    pub chronicles: Vec<Chronicle>,
    pub strategy: Strategy,
    pub analysis: StrategyAnalysis,
    pub inferred: InferredType,
}

impl DesignReport {
    /// Siblings the design converges with.
    pub fn orthogonal_count(&self) -> usize {
        self.disputes.iter().filter(|d| d.is_convergent()).count()
    }
}

pub struct LudicsKernel {
    config: LudicsConfig,
    store: Arc<dyn DesignStore>,
    engine: DisputeEngine,
    extractor: ChronicleExtractor,
    analyzer: StrategyAnalyzer,
    inferencer: TypeInferencer,
}

impl LudicsKernel {
    /// Validates `config` before wiring the stages.
    pub fn new(config: LudicsConfig, store: Arc<dyn DesignStore>) -> LudicsResult<Self> {
        config.validate()?;
        Ok(Self {
            engine: DisputeEngine::from_config(&config),
            extractor: ChronicleExtractor::from_config(&config),
            analyzer: StrategyAnalyzer::from_config(&config),
            inferencer: TypeInferencer::from_config(Arc::clone(&store), &config),
            store,
            config,
        })
    }

    pub fn config(&self) -> &LudicsConfig {
        &self.config
    }

    pub fn engine(&self) -> &DisputeEngine {
        &self.engine
    }

    /// Interact two stored designs.
    pub fn interact(&self, positive: &DesignId, negative: &DesignId) -> LudicsResult<Dispute> {
        let pos = self.store.resolve(positive)?;
        let neg = self.store.resolve(negative)?;
        self.engine.interact(&pos, &neg)
    }

    pub fn chronicles(&self, id: &DesignId) -> LudicsResult<Vec<Chronicle>> {
        let design = self.store.resolve(id)?;
        Ok(self.extractor.extract_all(&design))
    }

    /// Disputes of `design` against every opposite-polarity design in
    /// its context, ordered by sibling id.
    pub fn disputes(&self, design: &Design) -> LudicsResult<Vec<Dispute>> {
        let Some(context) = design.context() else {
            return Ok(Vec::new());
        };
        let mut disputes = Vec::new();
        for sibling in self.store.in_context(context) {
            if sibling.polarity() == design.polarity() {
                continue;
            }
            let dispute = match design.polarity() {
                Polarity::Positive => self.engine.interact(design, &sibling)?,
                Polarity::Negative => self.engine.interact(&sibling, design)?,
            };
            disputes.push(dispute);
        }
        Ok(disputes)
    }

    /// Plays of every chronicle plus every sibling dispute.
    pub fn strategy(&self, id: &DesignId) -> LudicsResult<Strategy> {
        let design = self.store.resolve(id)?;
        let disputes = self.disputes(&design)?;
        let chronicles = self.extractor.extract_all(&design);
        self.collect_strategy(&design, &disputes, &chronicles)
    }

    fn collect_strategy(
        &self,
        design: &Design,
        disputes: &[Dispute],
        chronicles: &[Chronicle],
    ) -> LudicsResult<Strategy> {
        let mut builder = StrategyBuilder::new(design.id().to_string(), design);
        for chronicle in chronicles {
            builder.play(play_from_chronicle(design.polarity(), chronicle));
        }
        for dispute in disputes {
            builder.dispute(dispute)?;
        }
        Ok(builder.build())
    }

    pub fn analyze_strategy(&self, strategy: &Strategy) -> StrategyAnalysis {
        self.analyzer.analyze(strategy)
    }

    pub fn infer(&self, id: &DesignId) -> LudicsResult<InferredType> {
        self.inferencer.infer(id)
    }

    /// Full pipeline for one stored design.
    pub fn analyze(&self, id: &DesignId) -> LudicsResult<DesignReport> {
        let design = self.store.resolve(id)?;

        let disputes = self.disputes(&design)?;
        let chronicles = self.extractor.extract_all(&design);
        let strategy = self.collect_strategy(&design, &disputes, &chronicles)?;
        let analysis = self.analyzer.analyze(&strategy);
        let inferred = self.inferencer.infer_design(&design)?;

        log::debug!(
            "{}: {} disputes, {} chronicles, innocent={}, saturated={}",
            design.id(),
            disputes.len(),
            chronicles.len(),
            analysis.innocence.is_innocent,
            analysis.saturation.is_saturated
        );

        Ok(DesignReport {
            design: design.id().clone(),
            disputes,
            chronicles,
            strategy,
            analysis,
            inferred,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Type Inference
// ─────────────────────────────────────────────────────────────────────
//! Structural and behavioural types for designs.
//!
//! The structural type is read off the design's own shape: a term tree
//! whose open, unanswered children are type variables. The behavioural
//! type partitions the opposite-polarity siblings in the same context
//! by how the design interacts with them.
//!
//! Two structural types unify when a substitution of their variables
//! makes them equal (first-order, with occurs check).

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use ludics_types::{
    Act, Design, DesignId, DisputeStatus, Locus, LudicsConfig, LudicsResult, Polarity,
};

use crate::dispute::DisputeEngine;
use crate::store::DesignStore;

/// Named hole in a type term.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeVar(pub String);

impl fmt::Display for TypeVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTerm {
    Var(TypeVar),
    Daimon,
    Node {
        polarity: Polarity,
        branches: BTreeMap<u32, TypeTerm>,
    },
}

pub type Substitution = BTreeMap<TypeVar, TypeTerm>;

impl TypeTerm {
    /// Variable standing for the unanswered locus `locus` of `design`.
    pub fn hole(design: &DesignId, locus: &Locus) -> Self {
        TypeTerm::Var(TypeVar(format!("{design}@{locus}")))
    }

    pub fn free_vars(&self) -> BTreeSet<TypeVar> {
        let mut vars = BTreeSet::new();
        let mut stack = vec![self];
        while let Some(term) = stack.pop() {
            match term {
                TypeTerm::Var(v) => {
                    vars.insert(v.clone());
                }
                TypeTerm::Daimon => {}
                TypeTerm::Node { branches, .. } => stack.extend(branches.values()),
            }
        }
        vars
    }

    /// Replace every bound variable, transitively.
    pub fn apply(&self, subst: &Substitution) -> TypeTerm {
        match self {
            TypeTerm::Var(v) => match subst.get(v) {
                Some(bound) => bound.apply(subst),
                None => self.clone(),
            },
            TypeTerm::Daimon => TypeTerm::Daimon,
            TypeTerm::Node { polarity, branches } => TypeTerm::Node {
                polarity: *polarity,
                branches: branches
                    .iter()
                    .map(|(label, t)| (*label, t.apply(subst)))
                    .collect(),
            },
        }
    }
}

/// Follow variable bindings at the head of `term`.
fn walk(term: TypeTerm, subst: &Substitution) -> TypeTerm {
    let mut term = term;
    loop {
        let next = match &term {
            TypeTerm::Var(v) => subst.get(v).cloned(),
            _ => None,
        };
        match next {
            Some(bound) => term = bound,
            None => return term,
        }
    }
}

fn occurs(var: &TypeVar, term: &TypeTerm, subst: &Substitution) -> bool {
    let mut stack = vec![term.clone()];
    while let Some(t) = stack.pop() {
        match walk(t, subst) {
            TypeTerm::Var(v) if &v == var => return true,
            TypeTerm::Node { branches, .. } => stack.extend(branches.into_values()),
            _ => {}
        }
    }
    false
}

/// Most general unifier of `a` and `b`, fully resolved.
pub fn unify(a: &TypeTerm, b: &TypeTerm) -> Option<Substitution> {
    let mut subst = Substitution::new();
    let mut work = vec![(a.clone(), b.clone())];

    while let Some((l, r)) = work.pop() {
        match (walk(l, &subst), walk(r, &subst)) {
            (TypeTerm::Var(x), TypeTerm::Var(y)) if x == y => {}
            (TypeTerm::Var(x), t) | (t, TypeTerm::Var(x)) => {
                if occurs(&x, &t, &subst) {
                    return None;
                }
                subst.insert(x, t);
            }
            (TypeTerm::Daimon, TypeTerm::Daimon) => {}
            (
                TypeTerm::Node {
                    polarity: p1,
                    branches: b1,
                },
                TypeTerm::Node {
                    polarity: p2,
                    branches: b2,
                },
            ) => {
                if p1 != p2 || !b1.keys().eq(b2.keys()) {
                    return None;
                }
                work.extend(b1.into_values().zip(b2.into_values()));
            }
            _ => return None,
        }
    }

    let resolved = subst
        .iter()
        .map(|(v, t)| (v.clone(), t.apply(&subst)))
        .collect();
    Some(resolved)
}

/// Shape-derived type of a design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralType {
    pub design: DesignId,
    pub term: TypeTerm,
    pub depth: usize,
    pub max_branching: usize,
    pub polarity_sequence: Vec<Polarity>,
    pub confidence: f64,
}

/// Unify the terms of two structural types.
pub fn unify_types(a: &StructuralType, b: &StructuralType) -> Option<Substitution> {
    unify(&a.term, &b.term)
}

/// Interaction signature against the siblings of a design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviouralType {
    pub design: DesignId,
    pub context: Option<String>,
    pub convergent: Vec<DesignId>,
    pub divergent: Vec<DesignId>,
    pub ongoing: Vec<DesignId>,
    pub stuck: Vec<DesignId>,
    pub siblings: usize,
    pub confidence: f64,
}

impl BehaviouralType {
    /// Siblings the design is orthogonal to.
    pub fn orthogonal(&self) -> &[DesignId] {
        &self.convergent
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InferenceMode {
    Structural,
    Behavioural,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferredType {
    pub design: DesignId,
    pub mode: InferenceMode,
    pub structural: StructuralType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavioural: Option<BehaviouralType>,
    pub confidence: f64,
}

/// Type inference over designs resolved through a [`DesignStore`].
pub struct TypeInferencer {
    store: Arc<dyn DesignStore>,
    engine: DisputeEngine,
    structural_confidence: f64,
    base_confidence: f64,
}

impl TypeInferencer {
    pub fn new(store: Arc<dyn DesignStore>) -> Self {
        Self::from_config(store, &LudicsConfig::default())
    }

    pub fn from_config(store: Arc<dyn DesignStore>, config: &LudicsConfig) -> Self {
        Self {
            store,
            engine: DisputeEngine::from_config(config),
            structural_confidence: config.structural_confidence,
            base_confidence: config.behavioural_base_confidence,
        }
    }

    pub fn structural(&self, design: &Design) -> StructuralType {
        StructuralType {
            design: design.id().clone(),
            term: structural_term(design),
            depth: design.acts().iter().map(|a| a.locus.depth()).max().unwrap_or(0),
            max_branching: design
                .acts()
                .iter()
                .map(|a| a.ramification.len())
                .max()
                .unwrap_or(0),
            polarity_sequence: design.acts().iter().map(|a| a.polarity).collect(),
            confidence: self.structural_confidence,
        }
    }

    pub fn behavioural(&self, design: &Design) -> LudicsResult<BehaviouralType> {
        let siblings: Vec<Arc<Design>> = match design.context() {
            Some(context) => self
                .store
                .in_context(context)
                .into_iter()
                .filter(|s| s.polarity() != design.polarity())
                .collect(),
            None => Vec::new(),
        };

        let mut partition: BTreeMap<DisputeStatus, Vec<DesignId>> = BTreeMap::new();
        for sibling in &siblings {
            let dispute = match design.polarity() {
                Polarity::Positive => self.engine.interact(design, sibling)?,
                Polarity::Negative => self.engine.interact(sibling, design)?,
            };
            partition
                .entry(dispute.status)
                .or_default()
                .push(sibling.id().clone());
        }

        let n = siblings.len() as f64;
        let base = self.base_confidence;
        let mut take = |status: DisputeStatus| partition.remove(&status).unwrap_or_default();
        Ok(BehaviouralType {
            design: design.id().clone(),
            context: design.context().map(str::to_owned),
            convergent: take(DisputeStatus::Convergent),
            divergent: take(DisputeStatus::Divergent),
            ongoing: take(DisputeStatus::Ongoing),
            stuck: take(DisputeStatus::Stuck),
            siblings: siblings.len(),
            confidence: base + (1.0 - base) * n / (n + 1.0),
        })
    }

    /// Behavioural type when the design has siblings, structural
    /// otherwise. The structural type is always attached.
    pub fn infer_design(&self, design: &Design) -> LudicsResult<InferredType> {
        let structural = self.structural(design);
        let behavioural = self.behavioural(design)?;

        let (mode, confidence, behavioural) = if behavioural.siblings > 0 {
            (InferenceMode::Behavioural, behavioural.confidence, Some(behavioural))
        } else {
            log::debug!(
                "no siblings for {}, falling back to structural type",
                design.id()
            );
            (InferenceMode::Structural, structural.confidence, None)
        };

        Ok(InferredType {
            design: design.id().clone(),
            mode,
            structural,
            behavioural,
            confidence,
        })
    }

    pub fn infer(&self, id: &DesignId) -> LudicsResult<InferredType> {
        let design = self.store.resolve(id)?;
        self.infer_design(&design)
    }
}

/// Built bottom-up: descending locus order visits children first.
fn structural_term(design: &Design) -> TypeTerm {
    let mut acts: Vec<&Act> = design.acts().iter().collect();
    acts.sort_by(|a, b| b.locus.cmp(&a.locus));

    let mut built: BTreeMap<Locus, TypeTerm> = BTreeMap::new();
    for act in acts {
        let term = if act.is_daimon() {
            TypeTerm::Daimon
        } else {
            let branches = act
                .ramification
                .labels()
                .map(|label| {
                    let child = act.locus.child(label);
                    let sub = built
                        .remove(&child)
                        .unwrap_or_else(|| TypeTerm::hole(design.id(), &child));
                    (label, sub)
                })
                .collect();
            TypeTerm::Node {
                polarity: act.polarity,
                branches,
            }
        };
        built.insert(act.locus.clone(), term);
    }

    let root = Locus::root();
    built
        .remove(&root)
        .unwrap_or_else(|| TypeTerm::hole(design.id(), &root))
}

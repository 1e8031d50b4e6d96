//! Serializable response shapes for the HTTP router and CLI.

use indexmap::IndexMap;
use serde::Serialize;

use super::domain::{
    GovernanceModel, GovernanceModelId, ImplementationVariation, MotivationReason, ReasonId,
    SolutionId, TrafficType,
};
use super::governance::{GovernanceClassification, GovernanceTier};
use super::scoring::ScoredSolution;
use super::service::{ClassificationBasis, GovernanceOutcome, SolutionRanking};

/// One ranked solution as rendered in the wizard's solution step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSolutionView {
    pub id: SolutionId,
    pub title: String,
    pub category: Option<String>,
    pub score: f64,
    pub traffic_match: u32,
    pub pickup_match: bool,
    pub traffic_types: Vec<TrafficType>,
    pub contributing_reasons: IndexMap<ReasonId, f64>,
}

impl From<&ScoredSolution> for RankedSolutionView {
    fn from(scored: &ScoredSolution) -> Self {
        Self {
            id: scored.solution.id.clone(),
            title: scored.solution.title.clone(),
            category: scored.solution.category.clone(),
            score: scored.score,
            traffic_match: scored.traffic_match,
            pickup_match: scored.pickup_match,
            traffic_types: scored.solution.traffic_types.clone(),
            contributing_reasons: scored.contributing_reasons.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingView {
    pub solutions: Vec<RankedSolutionView>,
    pub groups: IndexMap<String, Vec<SolutionId>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown_identifiers: Vec<String>,
}

impl From<&SolutionRanking> for RankingView {
    fn from(ranking: &SolutionRanking) -> Self {
        let groups = ranking
            .ranked
            .grouped_by_category()
            .into_iter()
            .map(|(category, items)| {
                let ids = items.into_iter().map(|item| item.solution.id).collect();
                (category, ids)
            })
            .collect();

        Self {
            solutions: ranking.ranked.iter().map(RankedSolutionView::from).collect(),
            groups,
            unknown_identifiers: ranking.unknown_identifiers.clone(),
        }
    }
}

/// Governance model card, with the active variant's note when one exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelCard {
    pub id: GovernanceModelId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub advantages: Vec<String>,
    pub disadvantages: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ModelCard {
    pub fn new(model: &GovernanceModel, variation: Option<&ImplementationVariation>) -> Self {
        Self {
            id: model.id.clone(),
            title: model.title.clone(),
            summary: model.summary.clone(),
            advantages: model.advantages.clone(),
            disadvantages: model.disadvantages.clone(),
            note: variation
                .and_then(|variation| variation.note_for(model))
                .map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentModelView {
    pub model: ModelCard,
    pub is_recommended: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<GovernanceTier>,
}

/// Governance step: the current model on its own, the tiers without it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GovernanceView {
    pub basis: ClassificationBasis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_model: Option<CurrentModelView>,
    pub recommended: Vec<ModelCard>,
    pub conditional: Vec<ModelCard>,
    pub unsuitable: Vec<ModelCard>,
    pub other: Vec<ModelCard>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dangling_references: Vec<GovernanceModelId>,
}

impl From<&GovernanceOutcome> for GovernanceView {
    fn from(outcome: &GovernanceOutcome) -> Self {
        let variation = outcome.variation.as_ref();
        let classification: &GovernanceClassification = &outcome.classification;
        let presentation = classification.presentation();
        let cards = |models: &[GovernanceModel]| -> Vec<ModelCard> {
            models
                .iter()
                .map(|model| ModelCard::new(model, variation))
                .collect()
        };

        Self {
            basis: outcome.basis.clone(),
            variation_title: variation.map(|variation| variation.title.clone()),
            current_model: presentation
                .current_model
                .as_ref()
                .map(|model| CurrentModelView {
                    model: ModelCard::new(model, variation),
                    is_recommended: presentation.current_model_is_recommended,
                    tier: classification.current_model_tier,
                }),
            recommended: cards(&presentation.recommended),
            conditional: cards(&presentation.conditional),
            unsuitable: cards(&presentation.unsuitable),
            other: cards(&presentation.other),
            dangling_references: classification.dangling_references.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReasonView {
    pub id: ReasonId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl From<&MotivationReason> for ReasonView {
    fn from(reason: &MotivationReason) -> Self {
        Self {
            id: reason.id.clone(),
            title: reason.title.clone(),
            category: reason.category.clone(),
            order: reason.order,
        }
    }
}

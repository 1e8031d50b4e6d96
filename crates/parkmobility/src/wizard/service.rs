use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::catalog::{ContentRepository, RepositoryError};
use super::domain::{
    GovernanceModelId, ImplementationVariation, MotivationReason, SelectionState, SolutionId,
    VariationId,
};
use super::governance::{select_active_variant, GovernanceClassification, GovernanceClassifier};
use super::scoring::{filter_candidates, RankedSolutions, RankingCriteria, SolutionScorer};

/// Service composing the content repository, scorer and classifier.
///
/// Each call takes one content snapshot and resolves every entity from it
/// before the scorer or classifier runs, so concurrent requests share
/// nothing mutable and never mix content versions.
pub struct RecommendationService<R: ?Sized> {
    repository: Arc<R>,
    classifier: GovernanceClassifier,
}

impl<R> RecommendationService<R>
where
    R: ContentRepository + ?Sized + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_classifier(repository, GovernanceClassifier::default())
    }

    pub fn with_classifier(repository: Arc<R>, classifier: GovernanceClassifier) -> Self {
        Self {
            repository,
            classifier,
        }
    }

    /// Reasons in wizard order: explicit `order` first, then by title.
    pub fn reasons(&self) -> Result<Vec<MotivationReason>, RecommendationError> {
        let mut reasons = self.repository.snapshot()?.reasons.clone();
        reasons.sort_by(|a, b| {
            let a_order = a.order.unwrap_or(i64::MAX);
            let b_order = b.order.unwrap_or(i64::MAX);
            a_order.cmp(&b_order).then_with(|| a.title.cmp(&b.title))
        });
        Ok(reasons)
    }

    /// Rank the solutions matching the selected reasons.
    pub fn rank(
        &self,
        selection: &SelectionState,
    ) -> Result<SolutionRanking, RecommendationError> {
        let content = self.repository.snapshot()?;
        let solutions = &content.solutions;
        let scorer = SolutionScorer::from_catalog(&content.reasons, solutions);
        let criteria = RankingCriteria::from_selection(selection);

        let candidates =
            filter_candidates(solutions, &criteria.active_reason_ids, scorer.registry());
        let ranked = scorer.rank(&candidates, &criteria);

        info!(
            active_reasons = criteria.active_reason_ids.len(),
            candidates = candidates.len(),
            catalog = solutions.len(),
            "ranked mobility solutions"
        );

        Ok(SolutionRanking {
            unknown_identifiers: scorer
                .registry()
                .unknown_identifiers()
                .map(str::to_string)
                .collect(),
            ranked,
        })
    }

    /// Classify governance models for the selection's active variant, or via
    /// the first selected solution's own references when no variant exists.
    pub fn classify(
        &self,
        selection: &SelectionState,
    ) -> Result<GovernanceOutcome, RecommendationError> {
        let content = self.repository.snapshot()?;
        let catalog = &content.governance_models;
        let current = selection.business_park.current_governance_model_id.as_ref();

        let relevant: Vec<ImplementationVariation> = selection
            .selected_solutions
            .iter()
            .flat_map(|solution_id| content.variations_for_solution(solution_id))
            .cloned()
            .collect();

        if let Some(variation) = select_active_variant(selection, &relevant) {
            debug!(variation = %variation.id, "classifying against active variant");
            let classification = self.classifier.classify_variation(variation, catalog, current);
            return Ok(GovernanceOutcome {
                basis: ClassificationBasis::Variation {
                    variation_id: variation.id.clone(),
                    solution_id: variation.solution_id.clone(),
                },
                variation: Some(variation.clone()),
                classification,
            });
        }

        let solution = selection
            .selected_solutions
            .iter()
            .find_map(|id| content.solutions.iter().find(|solution| &solution.id == id));

        match solution {
            Some(solution) => {
                debug!(solution = %solution.id, "no variant available, using solution references");
                Ok(GovernanceOutcome {
                    basis: ClassificationBasis::Solution {
                        solution_id: solution.id.clone(),
                    },
                    variation: None,
                    classification: self.classifier.classify_legacy(
                        &solution.governance_models,
                        catalog,
                        current,
                    ),
                })
            }
            None => Ok(GovernanceOutcome {
                basis: ClassificationBasis::Unselected,
                variation: None,
                classification: self.classifier.classify_legacy(&[], catalog, current),
            }),
        }
    }

    /// Classification for one explicit variation.
    pub fn classify_variation(
        &self,
        variation_id: &VariationId,
        current: Option<&GovernanceModelId>,
    ) -> Result<GovernanceOutcome, RecommendationError> {
        let content = self.repository.snapshot()?;
        let variation = content
            .variation(variation_id)
            .cloned()
            .ok_or_else(|| RecommendationError::UnknownVariation(variation_id.clone()))?;
        let classification = self.classifier.classify_variation(
            &variation,
            &content.governance_models,
            current,
        );

        Ok(GovernanceOutcome {
            basis: ClassificationBasis::Variation {
                variation_id: variation.id.clone(),
                solution_id: variation.solution_id.clone(),
            },
            variation: Some(variation),
            classification,
        })
    }
}

/// Ranking plus reason identifiers no solution carries.
#[derive(Debug, Clone, Serialize)]
pub struct SolutionRanking {
    pub ranked: RankedSolutions,
    pub unknown_identifiers: Vec<String>,
}

/// Which reference lists a classification was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassificationBasis {
    Variation {
        variation_id: VariationId,
        solution_id: SolutionId,
    },
    Solution {
        solution_id: SolutionId,
    },
    Unselected,
}

#[derive(Debug, Clone)]
pub struct GovernanceOutcome {
    pub basis: ClassificationBasis,
    pub variation: Option<ImplementationVariation>,
    pub classification: GovernanceClassification,
}

/// Error raised by the recommendation service.
#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("unknown implementation variation: {0}")]
    UnknownVariation(VariationId),
}

//! Mobility wizard recommendation core: content catalog, solution ranking
//! and governance model classification, plus the service and HTTP router
//! composing them.

pub mod catalog;
pub mod domain;
pub mod governance;
pub mod router;
pub mod scoring;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use catalog::{
    ContentLoadError, ContentRepository, ContentSnapshot, FallbackContentRepository,
    FileContentRepository, InMemoryContentRepository, RepositoryError, ScoreSheetReport,
};
pub use domain::{
    BusinessParkInfo, GovernanceModel, GovernanceModelId, GovernanceRef, ImplementationVariation,
    MobilitySolution, MotivationReason, PickupPreference, ReasonId, SelectionState, SolutionId,
    TrafficType, VariationId,
};
pub use governance::{
    GovernanceClassification, GovernanceClassifier, GovernancePresentation, GovernanceTier,
    PrecedenceResolver,
};
pub use router::recommendation_router;
pub use scoring::{RankedSolutions, RankingCriteria, ScoredSolution, SolutionScorer};
pub use service::{
    ClassificationBasis, GovernanceOutcome, RecommendationError, RecommendationService,
    SolutionRanking,
};
pub use views::{GovernanceView, ModelCard, RankingView, ReasonView};

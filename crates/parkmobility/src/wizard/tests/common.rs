use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::wizard::catalog::{
    ContentRepository, ContentSnapshot, InMemoryContentRepository, RepositoryError,
};
use crate::wizard::domain::{
    GovernanceModel, GovernanceModelId, GovernanceRef, ImplementationVariation,
    MobilitySolution, MotivationReason, PickupPreference, ReasonId, SelectionState, SolutionId,
    TrafficType,
};
use crate::wizard::service::RecommendationService;

pub(super) fn sample_snapshot() -> ContentSnapshot {
    ContentSnapshot::sample().expect("sample catalog parses")
}

pub(super) fn sample_repository() -> Arc<InMemoryContentRepository> {
    Arc::new(InMemoryContentRepository::new(sample_snapshot()))
}

pub(super) fn sample_service() -> RecommendationService<InMemoryContentRepository> {
    RecommendationService::new(sample_repository())
}

pub(super) fn reason(id: &str, identifier: Option<&str>, weight: Option<f64>) -> MotivationReason {
    MotivationReason {
        id: ReasonId::from(id),
        title: id.to_string(),
        identifier: identifier.map(str::to_string),
        weight,
        order: None,
        category: None,
    }
}

pub(super) fn reason_ids(ids: &[&str]) -> Vec<ReasonId> {
    ids.iter().copied().map(ReasonId::from).collect()
}

pub(super) fn model_ids(models: &[GovernanceModel]) -> Vec<&str> {
    models.iter().map(|model| model.id.as_str()).collect()
}

pub(super) fn catalog(ids: &[&str]) -> Vec<GovernanceModel> {
    ids.iter()
        .map(|id| GovernanceModel::new(id, &id.to_uppercase()))
        .collect()
}

pub(super) fn refs(ids: &[&str]) -> Vec<GovernanceRef> {
    ids.iter().copied().map(GovernanceRef::new).collect()
}

pub(super) fn variation(
    recommended: &[&str],
    conditional: &[&str],
    unsuitable: &[&str],
) -> ImplementationVariation {
    let mut variation = ImplementationVariation::new("v1", "Variant", "s1");
    variation.governance_models = refs(recommended);
    variation.governance_models_mits = refs(conditional);
    variation.governance_models_nietgeschikt = refs(unsuitable);
    variation
}

pub(super) fn selection(solutions: &[&str]) -> SelectionState {
    SelectionState {
        selected_solutions: solutions.iter().copied().map(SolutionId::from).collect(),
        ..SelectionState::default()
    }
}

pub(super) fn ranking_selection(
    reasons: &[&str],
    traffic_types: &[TrafficType],
    pickup: Option<PickupPreference>,
) -> SelectionState {
    let mut selection = SelectionState {
        selected_reasons: reason_ids(reasons),
        employee_pickup_preference: pickup,
        ..SelectionState::default()
    };
    selection.business_park.traffic_types = traffic_types.to_vec();
    selection
}

pub(super) fn with_variant(
    mut selection: SelectionState,
    solution: &str,
    choice: &str,
) -> SelectionState {
    selection
        .selected_variants
        .insert(SolutionId::from(solution), Some(choice.to_string()));
    selection
}

pub(super) fn with_current(mut selection: SelectionState, current: &str) -> SelectionState {
    selection.business_park.current_governance_model_id = Some(GovernanceModelId::from(current));
    selection
}

/// Catalog where one solution carries only legacy direct references.
pub(super) fn legacy_snapshot() -> ContentSnapshot {
    let mut shuttle = MobilitySolution::new("s-legacy", "Shuttle").with_score("milieu", 3.0);
    shuttle.governance_models = refs(&["g2", "g-missing"]);

    ContentSnapshot {
        reasons: vec![reason("r1", Some("milieu"), None)],
        solutions: vec![shuttle],
        governance_models: catalog(&["g1", "g2", "g3"]),
        variations: Vec::new(),
    }
}

pub(super) struct UnavailableRepository;

impl ContentRepository for UnavailableRepository {
    fn snapshot(&self) -> Result<Arc<ContentSnapshot>, RepositoryError> {
        Err(RepositoryError::Unavailable("cms offline".to_string()))
    }
}

/// Serves the sample catalog and counts how often a snapshot was taken.
#[derive(Default)]
pub(super) struct CountingRepository {
    pub(super) loads: AtomicUsize,
}

impl ContentRepository for CountingRepository {
    fn snapshot(&self) -> Result<Arc<ContentSnapshot>, RepositoryError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(sample_snapshot()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use super::catalog::ContentRepository;
use super::domain::{GovernanceModelId, SelectionState, VariationId};
use super::service::RecommendationService;
use super::views::{GovernanceView, RankingView, ReasonView};
use crate::error::AppError;

/// Router builder exposing the wizard's ranking and governance endpoints.
pub fn recommendation_router<R>(service: Arc<RecommendationService<R>>) -> Router
where
    R: ContentRepository + ?Sized + 'static,
{
    Router::new()
        .route("/api/v1/solutions/rank", post(rank_handler::<R>))
        .route("/api/v1/governance/classify", post(classify_handler::<R>))
        .route(
            "/api/v1/variations/:variation_id/governance",
            get(variation_governance_handler::<R>),
        )
        .route("/api/v1/catalog/reasons", get(reasons_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CurrentModelQuery {
    pub(crate) current: Option<String>,
}

pub(crate) async fn rank_handler<R>(
    State(service): State<Arc<RecommendationService<R>>>,
    axum::Json(selection): axum::Json<SelectionState>,
) -> Response
where
    R: ContentRepository + ?Sized + 'static,
{
    match service.rank(&selection) {
        Ok(ranking) => (StatusCode::OK, axum::Json(RankingView::from(&ranking))).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn classify_handler<R>(
    State(service): State<Arc<RecommendationService<R>>>,
    axum::Json(selection): axum::Json<SelectionState>,
) -> Response
where
    R: ContentRepository + ?Sized + 'static,
{
    match service.classify(&selection) {
        Ok(outcome) => {
            (StatusCode::OK, axum::Json(GovernanceView::from(&outcome))).into_response()
        }
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn variation_governance_handler<R>(
    State(service): State<Arc<RecommendationService<R>>>,
    Path(variation_id): Path<String>,
    Query(query): Query<CurrentModelQuery>,
) -> Response
where
    R: ContentRepository + ?Sized + 'static,
{
    let current = query
        .current
        .as_deref()
        .map(str::trim)
        .filter(|current| !current.is_empty())
        .map(GovernanceModelId::from);

    match service.classify_variation(&VariationId(variation_id), current.as_ref()) {
        Ok(outcome) => {
            (StatusCode::OK, axum::Json(GovernanceView::from(&outcome))).into_response()
        }
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn reasons_handler<R>(
    State(service): State<Arc<RecommendationService<R>>>,
) -> Response
where
    R: ContentRepository + ?Sized + 'static,
{
    match service.reasons() {
        Ok(reasons) => {
            let views: Vec<ReasonView> = reasons.iter().map(ReasonView::from).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(err) => AppError::from(err).into_response(),
    }
}

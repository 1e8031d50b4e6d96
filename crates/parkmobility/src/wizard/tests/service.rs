use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::common::*;
use crate::wizard::catalog::{ContentSnapshot, InMemoryContentRepository, RepositoryError};
use crate::wizard::domain::{GovernanceModelId, PickupPreference, TrafficType, VariationId};
use crate::wizard::catalog::ContentRepository;
use crate::wizard::service::{
    ClassificationBasis, RecommendationError, RecommendationService, SolutionRanking,
};

fn ids(ranking: &SolutionRanking) -> Vec<&str> {
    ranking
        .ranked
        .iter()
        .map(|item| item.solution.id.as_str())
        .collect()
}

#[test]
fn rank_orders_sample_catalog_by_weighted_score() {
    let service = sample_service();
    let ranking = service
        .rank(&ranking_selection(&["reden-milieu"], &[], None))
        .expect("ranking succeeds");

    assert_eq!(
        ids(&ranking),
        vec![
            "oplossing-deelfiets",
            "oplossing-ebike",
            "oplossing-pendelbus",
            "oplossing-vanpool",
            "oplossing-carpool",
            "oplossing-deelauto",
        ]
    );
    assert!(ranking.unknown_identifiers.is_empty());
}

#[test]
fn rank_applies_pickup_then_traffic_then_score() {
    let service = sample_service();
    let selection = ranking_selection(
        &["reden-parkeerdruk", "reden-gezondheid"],
        &[TrafficType::Commuter, TrafficType::Visitor],
        Some(PickupPreference::Thuis),
    );
    let ranking = service.rank(&selection).expect("ranking succeeds");

    assert_eq!(
        ids(&ranking),
        vec![
            "oplossing-ebike",
            "oplossing-vanpool",
            "oplossing-carpool",
            "oplossing-deelauto",
            "oplossing-pendelbus",
            "oplossing-deelfiets",
        ]
    );

    let pendelbus = ranking
        .ranked
        .iter()
        .find(|item| item.solution.id.as_str() == "oplossing-pendelbus")
        .expect("pendelbus ranked");
    assert_eq!(pendelbus.traffic_match, 1002);
    assert_eq!(pendelbus.score, 17.0);
    assert!(!pendelbus.pickup_match);

    let groups: Vec<String> = ranking.ranked.grouped_by_category().into_keys().collect();
    assert_eq!(groups, vec!["Onbekend", "Collectief vervoer", "Auto", "Fiets"]);
}

#[test]
fn rank_drops_solutions_without_positive_active_score() {
    let service = sample_service();
    let ranking = service
        .rank(&ranking_selection(&["reden-ov"], &[], None))
        .expect("ranking succeeds");

    assert_eq!(ranking.ranked.len(), 5);
    assert!(!ids(&ranking).contains(&"oplossing-ebike"));
}

#[test]
fn classify_uses_chosen_variant_by_title() {
    let service = sample_service();
    let selection = with_variant(
        selection(&["oplossing-deelfiets"]),
        "oplossing-deelfiets",
        "Aanbieder exploiteert zelf",
    );
    let outcome = service.classify(&selection).expect("classification succeeds");

    assert_eq!(
        outcome.basis,
        ClassificationBasis::Variation {
            variation_id: VariationId::from("variant-deelfiets-aanbieder"),
            solution_id: "oplossing-deelfiets".into(),
        }
    );
    assert_eq!(
        model_ids(&outcome.classification.recommended),
        vec!["gov-losse-afspraken"]
    );
    assert_eq!(
        model_ids(&outcome.classification.conditional),
        vec!["gov-vereniging"]
    );
}

#[test]
fn classify_falls_back_to_first_relevant_variation() {
    let service = sample_service();
    let selection = with_current(selection(&["oplossing-deelfiets"]), "gov-cooperatie");
    let outcome = service.classify(&selection).expect("classification succeeds");

    let variation = outcome.variation.as_ref().expect("variant chosen");
    assert_eq!(variation.id.as_str(), "variant-deelfiets-inkoop");
    assert!(outcome.classification.current_model_is_recommended);
    assert_eq!(
        model_ids(&outcome.classification.unsuitable),
        vec!["gov-losse-afspraken"]
    );
}

#[test]
fn classify_without_variations_uses_solution_references() {
    let service = RecommendationService::new(Arc::new(InMemoryContentRepository::new(
        legacy_snapshot(),
    )));
    let selection = with_current(selection(&["s-unknown", "s-legacy"]), "g2");
    let outcome = service.classify(&selection).expect("classification succeeds");

    assert_eq!(
        outcome.basis,
        ClassificationBasis::Solution {
            solution_id: "s-legacy".into(),
        }
    );
    assert!(outcome.variation.is_none());
    assert_eq!(model_ids(&outcome.classification.recommended), vec!["g2"]);
    assert_eq!(model_ids(&outcome.classification.other), vec!["g1", "g3"]);
    assert!(outcome.classification.current_model_is_recommended);
    assert_eq!(
        outcome.classification.dangling_references,
        vec![GovernanceModelId::from("g-missing")]
    );
}

#[test]
fn classify_without_selection_leaves_everything_other() {
    let service = sample_service();
    let outcome = service
        .classify(&selection(&[]))
        .expect("classification succeeds");

    assert_eq!(outcome.basis, ClassificationBasis::Unselected);
    assert_eq!(outcome.classification.other.len(), 6);
    assert!(outcome.classification.recommended.is_empty());
}

#[test]
fn classify_variation_rejects_unknown_ids() {
    let service = sample_service();
    let result = service.classify_variation(&VariationId::from("variant-onbekend"), None);

    match result {
        Err(RecommendationError::UnknownVariation(id)) => {
            assert_eq!(id.as_str(), "variant-onbekend")
        }
        other => panic!("expected unknown variation, got {other:?}"),
    }
}

#[test]
fn classify_variation_reports_current_model_tier() {
    let service = sample_service();
    let current = GovernanceModelId::from("gov-bv");
    let outcome = service
        .classify_variation(&VariationId::from("variant-carpool-platform"), Some(&current))
        .expect("classification succeeds");

    assert_eq!(
        outcome
            .classification
            .current_model
            .as_ref()
            .map(|model| model.title.as_str()),
        Some("B.V.")
    );
    assert!(!outcome.classification.current_model_is_recommended);
}

#[test]
fn repository_failures_propagate() {
    let service = RecommendationService::new(Arc::new(UnavailableRepository));

    let rank = service.rank(&ranking_selection(&["reden-milieu"], &[], None));
    assert!(matches!(
        rank,
        Err(RecommendationError::Repository(RepositoryError::Unavailable(_)))
    ));
    let classify = service.classify(&selection(&["oplossing-deelfiets"]));
    assert!(matches!(
        classify,
        Err(RecommendationError::Repository(_))
    ));
}

#[test]
fn reasons_sort_by_order_then_title() {
    let mut first = reason("r-b", None, None);
    first.title = "Bereikbaarheid".to_string();
    let mut second = reason("r-a", None, None);
    second.title = "Afval".to_string();
    let mut ordered = reason("r-z", None, None);
    ordered.title = "Zichtbaarheid".to_string();
    ordered.order = Some(1);

    let snapshot = ContentSnapshot {
        reasons: vec![first, second, ordered],
        ..ContentSnapshot::default()
    };
    let service = RecommendationService::new(Arc::new(InMemoryContentRepository::new(snapshot)));

    let reasons = service.reasons().expect("reasons load");
    let ids: Vec<&str> = reasons.iter().map(|reason| reason.id.as_str()).collect();
    assert_eq!(ids, vec!["r-z", "r-a", "r-b"]);
}

#[test]
fn service_is_shareable_behind_trait_object() {
    let repository: Arc<dyn ContentRepository> = sample_repository();
    let service = RecommendationService::new(repository);

    let reasons = service.reasons().expect("reasons load");
    assert_eq!(reasons.len(), 6);
}

#[test]
fn each_call_reads_one_content_snapshot() {
    let repository = Arc::new(CountingRepository::default());
    let service = RecommendationService::new(Arc::clone(&repository));

    service
        .rank(&ranking_selection(&["reden-milieu"], &[], None))
        .expect("rank succeeds");
    assert_eq!(repository.loads.load(Ordering::SeqCst), 1);

    let classify = with_variant(
        selection(&["oplossing-deelfiets", "oplossing-pendelbus", "oplossing-carpool"]),
        "oplossing-deelfiets",
        "variant-niet-bestaand",
    );
    service.classify(&classify).expect("classify succeeds");
    assert_eq!(repository.loads.load(Ordering::SeqCst), 2);

    service
        .classify_variation(&VariationId::from("variant-pendelbus-biz"), None)
        .expect("variation classifies");
    assert_eq!(repository.loads.load(Ordering::SeqCst), 3);
}

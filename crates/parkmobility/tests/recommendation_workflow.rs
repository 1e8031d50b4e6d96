use std::path::PathBuf;
use std::sync::Arc;

use parkmobility::wizard::catalog::{
    ContentRepository, ContentSnapshot, FallbackContentRepository, FileContentRepository,
    InMemoryContentRepository,
};
use parkmobility::wizard::domain::{ReasonId, SelectionState, SolutionId, TrafficType};
use parkmobility::wizard::{GovernanceView, RankingView, RecommendationService};

fn manifest_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

fn file_repository() -> FileContentRepository {
    FileContentRepository::new(
        manifest_path("data/sample_catalog.json"),
        Some(manifest_path("tests/fixtures/score_sheet.csv")),
    )
}

fn selection(reasons: &[&str]) -> SelectionState {
    SelectionState {
        selected_reasons: reasons.iter().copied().map(ReasonId::from).collect(),
        ..SelectionState::default()
    }
}

fn ranked_ids(view: &RankingView) -> Vec<&str> {
    view.solutions.iter().map(|solution| solution.id.as_str()).collect()
}

#[test]
fn score_sheet_overrides_catalog_scores() {
    let mut snapshot = ContentSnapshot::sample().expect("sample catalog parses");
    let sheet = include_bytes!("fixtures/score_sheet.csv");

    let report = snapshot
        .apply_score_sheet(&sheet[..])
        .expect("score sheet applies");
    assert_eq!(report.updated_solutions, 2);
    assert_eq!(report.applied_scores, 2);
    assert_eq!(report.invalid_cells, 0);
    assert_eq!(report.unknown_solutions, vec!["oplossing-onbekend".to_string()]);

    let pendelbus = snapshot
        .solutions
        .iter()
        .find(|solution| solution.id.as_str() == "oplossing-pendelbus")
        .expect("pendelbus present");
    assert_eq!(pendelbus.score_field("milieu"), 2.5);
    assert_eq!(pendelbus.score_field("bereikbaarheid_via_ov"), 10.0);
}

#[test]
fn file_repository_ranks_with_score_sheet_applied() {
    let service = RecommendationService::new(Arc::new(file_repository()));

    let ranking = service
        .rank(&selection(&["reden-ov"]))
        .expect("ranking succeeds");
    let view = RankingView::from(&ranking);
    assert_eq!(
        ranked_ids(&view),
        vec![
            "oplossing-pendelbus",
            "oplossing-deelfiets",
            "oplossing-vanpool",
            "oplossing-ebike",
            "oplossing-carpool",
            "oplossing-deelauto",
        ]
    );

    let ranking = service
        .rank(&selection(&["reden-milieu"]))
        .expect("ranking succeeds");
    let view = RankingView::from(&ranking);
    assert_eq!(ranked_ids(&view).last(), Some(&"oplossing-pendelbus"));
}

#[test]
fn missing_export_serves_bundled_catalog() {
    let primary = FileContentRepository::new(manifest_path("data/absent.json"), None);
    let fallback = InMemoryContentRepository::new(ContentSnapshot::sample().expect("sample"));
    let repository = FallbackContentRepository::new(primary, fallback);

    let solutions = repository.solutions().expect("fallback solutions");
    assert_eq!(solutions.len(), 6);
}

#[test]
fn wizard_flow_ranks_then_classifies_chosen_variant() {
    let service = RecommendationService::new(Arc::new(file_repository()));
    let mut selection = selection(&["reden-parkeerdruk", "reden-personeel"]);
    selection.business_park.traffic_types = vec![TrafficType::Commuter];

    let ranking = service.rank(&selection).expect("ranking succeeds");
    let top = ranking.ranked.items.first().expect("at least one solution");
    assert_eq!(top.solution.id.as_str(), "oplossing-pendelbus");

    selection.selected_solutions = vec![SolutionId::from("oplossing-pendelbus")];
    selection.selected_variants.insert(
        SolutionId::from("oplossing-pendelbus"),
        Some("variant-pendelbus-biz".to_string()),
    );
    let outcome = service.classify(&selection).expect("classification succeeds");
    let view = GovernanceView::from(&outcome);

    assert_eq!(
        view.variation_title.as_deref(),
        Some("Pendelbus gefinancierd uit de BIZ")
    );
    let recommended: Vec<&str> = view.recommended.iter().map(|card| card.id.as_str()).collect();
    assert_eq!(recommended, vec!["gov-biz"]);
    assert_eq!(
        view.recommended[0].note.as_deref(),
        Some("De heffing dekt de exploitatiekosten van de bus.")
    );
    assert!(view.current_model.is_none());
}

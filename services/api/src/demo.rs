use crate::infra::{
    build_repository, parse_pickup, parse_traffic_type, read_selection, SharedRepository,
};
use clap::Args;
use parkmobility::config::{AppConfig, ContentConfig};
use parkmobility::error::AppError;
use parkmobility::telemetry::{self, LogTarget};
use parkmobility::wizard::catalog::ContentRepository;
use parkmobility::wizard::domain::{
    GovernanceModelId, PickupPreference, ReasonId, SelectionState, SolutionId, TrafficType,
    VariationId,
};
use parkmobility::wizard::views::{GovernanceView, ModelCard, RankingView};
use parkmobility::wizard::RecommendationService;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct RankArgs {
    /// Motivation reason id to score against (repeatable)
    #[arg(long = "reason")]
    pub(crate) reasons: Vec<String>,
    /// Traffic type the business park serves (repeatable)
    #[arg(long = "traffic", value_parser = parse_traffic_type)]
    pub(crate) traffic_types: Vec<TrafficType>,
    /// Employee pickup preference: thuis, locatie or ov
    #[arg(long, value_parser = parse_pickup)]
    pub(crate) pickup: Option<PickupPreference>,
    /// Wizard selection exported as JSON; flags add to it
    #[arg(long)]
    pub(crate) selection: Option<PathBuf>,
    /// Print the ranking as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ClassifyArgs {
    /// Selected solution id (repeatable, first selected wins)
    #[arg(long = "solution")]
    pub(crate) solutions: Vec<String>,
    /// Chosen variant (id or title) for the first selected solution
    #[arg(long)]
    pub(crate) variant: Option<String>,
    /// Classify one implementation variation directly, ignoring the selection
    #[arg(long, conflicts_with_all = ["solutions", "variant", "selection"])]
    pub(crate) variation: Option<String>,
    /// Governance model the business park uses today
    #[arg(long)]
    pub(crate) current: Option<String>,
    /// Wizard selection exported as JSON; flags add to it
    #[arg(long)]
    pub(crate) selection: Option<PathBuf>,
    /// Print the classification as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Governance model the demo business park uses today
    #[arg(long, default_value = "gov-vereniging")]
    pub(crate) current: String,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let service = cli_service()?;
    let mut selection = base_selection(args.selection.as_ref())?;
    selection
        .selected_reasons
        .extend(args.reasons.iter().map(|id| ReasonId::from(id.as_str())));
    selection.business_park.traffic_types.extend(args.traffic_types);
    if args.pickup.is_some() {
        selection.employee_pickup_preference = args.pickup;
    }

    let ranking = service.rank(&selection)?;
    let view = RankingView::from(&ranking);
    if args.json {
        return print_json(&view);
    }
    render_ranking(&view, &selection);
    Ok(())
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let service = cli_service()?;
    let current = args.current.as_deref().map(GovernanceModelId::from);

    let outcome = match &args.variation {
        Some(variation_id) => service.classify_variation(
            &VariationId::from(variation_id.as_str()),
            current.as_ref(),
        )?,
        None => {
            let mut selection = base_selection(args.selection.as_ref())?;
            selection
                .selected_solutions
                .extend(args.solutions.iter().map(|id| SolutionId::from(id.as_str())));
            if let (Some(variant), Some(first)) =
                (&args.variant, selection.selected_solutions.first().cloned())
            {
                selection.selected_variants.insert(first, Some(variant.clone()));
            }
            if current.is_some() {
                selection.business_park.current_governance_model_id = current;
            }
            service.classify(&selection)?
        }
    };

    let view = GovernanceView::from(&outcome);
    if args.json {
        return print_json(&view);
    }
    render_governance(&view);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    init_cli_telemetry()?;
    let service = RecommendationService::new(build_repository(&ContentConfig::default())?);

    let mut selection = SelectionState {
        selected_reasons: vec![
            ReasonId::from("reden-parkeerdruk"),
            ReasonId::from("reden-personeel"),
        ],
        employee_pickup_preference: Some(PickupPreference::Locatie),
        ..SelectionState::default()
    };
    selection.business_park.traffic_types = vec![TrafficType::Commuter, TrafficType::Visitor];
    selection.business_park.current_governance_model_id =
        Some(GovernanceModelId::from(args.current.as_str()));

    println!("Parkmobility wizard demo");
    let ranking = service.rank(&selection)?;
    let view = RankingView::from(&ranking);
    render_ranking(&view, &selection);

    let Some(top) = view.solutions.first() else {
        println!("\nNo solution scores on the selected motivations.");
        return Ok(());
    };
    println!("\nSelecting \"{}\" and its first implementation variant", top.title);
    selection.selected_solutions = vec![top.id.clone()];

    let outcome = service.classify(&selection)?;
    render_governance(&GovernanceView::from(&outcome));
    Ok(())
}

fn cli_service() -> Result<RecommendationService<dyn ContentRepository>, AppError> {
    let config = init_cli_telemetry()?;
    let repository: SharedRepository = build_repository(&config.content)?;
    Ok(RecommendationService::new(repository))
}

fn init_cli_telemetry() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init_with_target(&config.telemetry, LogTarget::Stderr)?;
    Ok(config)
}

fn base_selection(path: Option<&PathBuf>) -> Result<SelectionState, AppError> {
    match path {
        Some(path) => read_selection(path),
        None => Ok(SelectionState::default()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

fn render_ranking(view: &RankingView, selection: &SelectionState) {
    let traffic: Vec<&str> = selection
        .business_park
        .traffic_types
        .iter()
        .map(|traffic_type| traffic_type.label())
        .collect();
    println!(
        "\nRanked mobility solutions ({} motivations | traffic: {} | pickup: {})",
        selection.selected_reasons.len(),
        if traffic.is_empty() {
            "any".to_string()
        } else {
            traffic.join(", ")
        },
        selection
            .employee_pickup_preference
            .map(|preference| format!("{preference:?}").to_lowercase())
            .unwrap_or_else(|| "any".to_string())
    );

    if view.solutions.is_empty() {
        println!("- no solution scores on the selected motivations");
    }
    for (position, solution) in view.solutions.iter().enumerate() {
        println!(
            "{:>2}. {} | score {:.1} | traffic {} | {}",
            position + 1,
            solution.title,
            solution.score,
            solution.traffic_match,
            if solution.pickup_match {
                "pickup match"
            } else {
                "no pickup match"
            }
        );
        for (reason, contribution) in &solution.contributing_reasons {
            println!("      - {reason}: {contribution:.1}");
        }
    }

    if !view.groups.is_empty() {
        println!("By category:");
        for (category, ids) in &view.groups {
            let titles: Vec<&str> = ids
                .iter()
                .filter_map(|id| view.solutions.iter().find(|solution| &solution.id == id))
                .map(|solution| solution.title.as_str())
                .collect();
            println!("  - {category}: {}", titles.join(", "));
        }
    }

    if !view.unknown_identifiers.is_empty() {
        println!(
            "Reason identifiers without solution scores: {}",
            view.unknown_identifiers.join(", ")
        );
    }
}

fn render_governance(view: &GovernanceView) {
    match &view.variation_title {
        Some(title) => println!("\nGovernance models for \"{title}\""),
        None => println!("\nGovernance models"),
    }

    if let Some(current) = &view.current_model {
        let tier = current.tier.map(|tier| tier.label()).unwrap_or("Overig");
        println!(
            "Current model: {} ({tier}){}",
            current.model.title,
            if current.is_recommended {
                " - recommended"
            } else {
                ""
            }
        );
        if let Some(note) = &current.model.note {
            println!("  {note}");
        }
    }

    render_cards("Aanbevolen", &view.recommended);
    render_cards("Aanbevolen, mits", &view.conditional);
    render_cards("Ongeschikt", &view.unsuitable);
    render_cards("Overig", &view.other);

    if !view.dangling_references.is_empty() {
        let ids: Vec<&str> = view.dangling_references.iter().map(|id| id.as_str()).collect();
        println!("Unknown governance references: {}", ids.join(", "));
    }
}

fn render_cards(label: &str, cards: &[ModelCard]) {
    if cards.is_empty() {
        return;
    }
    println!("{label}:");
    for card in cards {
        match &card.summary {
            Some(summary) => println!("  - {}: {summary}", card.title),
            None => println!("  - {}", card.title),
        }
        if let Some(note) = &card.note {
            println!("    {note}");
        }
    }
}

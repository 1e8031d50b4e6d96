use metrics_exporter_prometheus::PrometheusHandle;
use parkmobility::config::ContentConfig;
use parkmobility::error::AppError;
use parkmobility::wizard::catalog::{
    ContentLoadError, ContentRepository, ContentSnapshot, FallbackContentRepository,
    FileContentRepository, InMemoryContentRepository,
};
use parkmobility::wizard::domain::{PickupPreference, SelectionState, TrafficType};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type SharedRepository = Arc<dyn ContentRepository>;

/// Content source for the configured environment: the export on disk backed
/// by the bundled catalog, or the bundled catalog alone.
pub(crate) fn build_repository(config: &ContentConfig) -> Result<SharedRepository, AppError> {
    let mut sample = ContentSnapshot::sample()?;

    match &config.catalog_path {
        Some(path) => {
            info!(path = %path.display(), "serving content export with bundled fallback");
            let primary = FileContentRepository::new(path, config.score_sheet_path.clone());
            let fallback = InMemoryContentRepository::new(sample);
            Ok(Arc::new(FallbackContentRepository::new(primary, fallback)))
        }
        None => {
            if let Some(sheet) = &config.score_sheet_path {
                let report = sample.apply_score_sheet_path(sheet)?;
                info!(
                    updated = report.updated_solutions,
                    scores = report.applied_scores,
                    "applied score sheet to bundled catalog"
                );
                if !report.unknown_solutions.is_empty() {
                    warn!(unknown = ?report.unknown_solutions, "score sheet rows skipped");
                }
            }
            info!("serving bundled sample catalog");
            Ok(Arc::new(InMemoryContentRepository::new(sample)))
        }
    }
}

/// Wizard answers exported by the front-end store.
pub(crate) fn read_selection(path: &Path) -> Result<SelectionState, AppError> {
    let file = std::fs::File::open(path)?;
    let selection = serde_json::from_reader(std::io::BufReader::new(file))
        .map_err(ContentLoadError::from)?;
    Ok(selection)
}

pub(crate) fn parse_traffic_type(raw: &str) -> Result<TrafficType, String> {
    TrafficType::parse(raw).ok_or_else(|| {
        format!("unknown traffic type '{raw}' (expected a content label such as bezoekers)")
    })
}

pub(crate) fn parse_pickup(raw: &str) -> Result<PickupPreference, String> {
    PickupPreference::parse(raw)
        .ok_or_else(|| format!("unknown pickup preference '{raw}' (expected thuis, locatie or ov)"))
}

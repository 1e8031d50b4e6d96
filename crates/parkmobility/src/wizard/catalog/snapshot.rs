use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::score_sheet::{self, ScoreSheetReport};
use crate::wizard::domain::{
    GovernanceModel, ImplementationVariation, MobilitySolution, MotivationReason, SolutionId,
    VariationId,
};

const SAMPLE_CATALOG: &str = include_str!("../../../data/sample_catalog.json");

/// All four entity arrays as exported from the content source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSnapshot {
    #[serde(alias = "businessParkReasons")]
    pub reasons: Vec<MotivationReason>,
    #[serde(alias = "mobilitySolutions")]
    pub solutions: Vec<MobilitySolution>,
    #[serde(alias = "governanceModels")]
    pub governance_models: Vec<GovernanceModel>,
    #[serde(alias = "implementationVariations")]
    pub variations: Vec<ImplementationVariation>,
}

impl ContentSnapshot {
    /// The bundled mock catalog served when no content export is configured.
    pub fn sample() -> Result<Self, ContentLoadError> {
        Self::from_reader(SAMPLE_CATALOG.as_bytes())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ContentLoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let snapshot = Self::from_reader(std::io::BufReader::new(file))?;
        debug!(
            path = %path.display(),
            reasons = snapshot.reasons.len(),
            solutions = snapshot.solutions.len(),
            governance_models = snapshot.governance_models.len(),
            variations = snapshot.variations.len(),
            "loaded content snapshot"
        );
        Ok(snapshot)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ContentLoadError> {
        let snapshot: Self = serde_json::from_reader(reader)?;
        debug!(solutions = snapshot.solutions.len(), "parsed content snapshot");
        Ok(snapshot)
    }

    pub fn variations_for_solution<'a>(
        &'a self,
        solution_id: &'a SolutionId,
    ) -> impl Iterator<Item = &'a ImplementationVariation> + 'a {
        self.variations
            .iter()
            .filter(move |variation| &variation.solution_id == solution_id)
    }

    pub fn variation(&self, id: &VariationId) -> Option<&ImplementationVariation> {
        self.variations.iter().find(|variation| &variation.id == id)
    }

    /// Overlay numeric score fields from a CSV score sheet onto the solutions.
    pub fn apply_score_sheet<R: Read>(
        &mut self,
        reader: R,
    ) -> Result<ScoreSheetReport, ContentLoadError> {
        let rows = score_sheet::parse_rows(reader)?;
        let identifiers: Vec<&str> = self
            .reasons
            .iter()
            .filter_map(|reason| reason.identifier.as_deref())
            .collect();
        Ok(score_sheet::apply_rows(&mut self.solutions, rows, &identifiers))
    }

    pub fn apply_score_sheet_path<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> Result<ScoreSheetReport, ContentLoadError> {
        let file = std::fs::File::open(path)?;
        self.apply_score_sheet(file)
    }
}

#[derive(Debug)]
pub enum ContentLoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    MissingIdColumn,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentLoadError::Io(err) => write!(f, "failed to read content: {}", err),
            ContentLoadError::Json(err) => write!(f, "invalid content JSON: {}", err),
            ContentLoadError::Csv(err) => write!(f, "invalid score sheet CSV: {}", err),
            ContentLoadError::MissingIdColumn => {
                write!(f, "score sheet has no solution_id column")
            }
        }
    }
}

impl std::error::Error for ContentLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContentLoadError::Io(err) => Some(err),
            ContentLoadError::Json(err) => Some(err),
            ContentLoadError::Csv(err) => Some(err),
            ContentLoadError::MissingIdColumn => None,
        }
    }
}

impl From<std::io::Error> for ContentLoadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ContentLoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<csv::Error> for ContentLoadError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

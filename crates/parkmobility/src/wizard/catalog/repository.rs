use std::path::PathBuf;
use std::sync::Arc;

use tracing::warn;

use super::snapshot::{ContentLoadError, ContentSnapshot};
use crate::wizard::domain::{
    GovernanceModel, ImplementationVariation, MobilitySolution, MotivationReason, SolutionId,
    VariationId,
};

/// Source of content entities, whichever backing store is active.
///
/// `snapshot` resolves every entity at once. A request that needs more than
/// one entity kind takes a single snapshot so all of them come from the same
/// version of the content.
pub trait ContentRepository: Send + Sync {
    fn snapshot(&self) -> Result<Arc<ContentSnapshot>, RepositoryError>;

    fn reasons(&self) -> Result<Vec<MotivationReason>, RepositoryError> {
        Ok(self.snapshot()?.reasons.clone())
    }

    fn solutions(&self) -> Result<Vec<MobilitySolution>, RepositoryError> {
        Ok(self.snapshot()?.solutions.clone())
    }

    fn governance_models(&self) -> Result<Vec<GovernanceModel>, RepositoryError> {
        Ok(self.snapshot()?.governance_models.clone())
    }

    fn variations_for_solution(
        &self,
        solution_id: &SolutionId,
    ) -> Result<Vec<ImplementationVariation>, RepositoryError> {
        Ok(self
            .snapshot()?
            .variations_for_solution(solution_id)
            .cloned()
            .collect())
    }

    fn variation(
        &self,
        id: &VariationId,
    ) -> Result<Option<ImplementationVariation>, RepositoryError> {
        Ok(self.snapshot()?.variation(id).cloned())
    }
}

/// Error enumeration for content source failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("content entry not found")]
    NotFound,
    #[error("content source unavailable: {0}")]
    Unavailable(String),
    #[error("malformed content: {0}")]
    Malformed(String),
}

/// Repository over a fully loaded snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentRepository {
    snapshot: Arc<ContentSnapshot>,
}

impl InMemoryContentRepository {
    pub fn new(snapshot: ContentSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }
}

impl ContentRepository for InMemoryContentRepository {
    fn snapshot(&self) -> Result<Arc<ContentSnapshot>, RepositoryError> {
        Ok(Arc::clone(&self.snapshot))
    }
}

/// Reads the content export from disk once per snapshot, so editors can
/// replace the export without restarting the service.
#[derive(Debug, Clone)]
pub struct FileContentRepository {
    catalog_path: PathBuf,
    score_sheet_path: Option<PathBuf>,
}

impl FileContentRepository {
    pub fn new(catalog_path: impl Into<PathBuf>, score_sheet_path: Option<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            score_sheet_path,
        }
    }

    pub fn load(&self) -> Result<ContentSnapshot, RepositoryError> {
        let mut snapshot = ContentSnapshot::from_path(&self.catalog_path)?;
        if let Some(path) = &self.score_sheet_path {
            let report = snapshot.apply_score_sheet_path(path)?;
            if !report.unknown_solutions.is_empty() || report.invalid_cells > 0 {
                warn!(
                    unknown_solutions = report.unknown_solutions.len(),
                    invalid_cells = report.invalid_cells,
                    "score sheet applied with skipped entries"
                );
            }
        }
        Ok(snapshot)
    }
}

impl From<ContentLoadError> for RepositoryError {
    fn from(err: ContentLoadError) -> Self {
        match err {
            ContentLoadError::Io(err) => Self::Unavailable(err.to_string()),
            other => Self::Malformed(other.to_string()),
        }
    }
}

impl ContentRepository for FileContentRepository {
    fn snapshot(&self) -> Result<Arc<ContentSnapshot>, RepositoryError> {
        self.load().map(Arc::new)
    }
}

/// Serves from `primary` and switches to `fallback` whenever the primary
/// source fails, the way the wizard falls back to mock content when the CMS
/// is unreachable. A snapshot always comes whole from one of the two.
pub struct FallbackContentRepository<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackContentRepository<P, F>
where
    P: ContentRepository,
    F: ContentRepository,
{
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P, F> ContentRepository for FallbackContentRepository<P, F>
where
    P: ContentRepository,
    F: ContentRepository,
{
    fn snapshot(&self) -> Result<Arc<ContentSnapshot>, RepositoryError> {
        match self.primary.snapshot() {
            Ok(snapshot) => Ok(snapshot),
            Err(err) => {
                warn!(error = %err, "primary content source failed, using fallback");
                self.fallback.snapshot()
            }
        }
    }
}

impl<T: ContentRepository + ?Sized> ContentRepository for Arc<T> {
    fn snapshot(&self) -> Result<Arc<ContentSnapshot>, RepositoryError> {
        (**self).snapshot()
    }
}

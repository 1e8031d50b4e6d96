//! Content catalog: the entity source the scorer and classifier read from.
//!
//! Content arrives as a JSON snapshot (exported from the CMS, or the bundled
//! sample catalog) and can be amended with a CSV score sheet maintained by
//! content editors.

mod repository;
mod score_sheet;
mod snapshot;

pub use repository::{
    ContentRepository, FallbackContentRepository, FileContentRepository, InMemoryContentRepository,
    RepositoryError,
};
pub use score_sheet::ScoreSheetReport;
pub use snapshot::{ContentLoadError, ContentSnapshot};

use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::matching::scorer::MatchScorer;
use crate::parsing::taxonomy::Taxonomy;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Archive for uploaded CV documents.
    pub s3: S3Client,
    pub config: Config,
    /// Keyword tables used by every extraction. Built-in unless CV_TAXONOMY_PATH is set.
    pub taxonomy: Arc<Taxonomy>,
    /// Pluggable match scorer. Default: KeywordMatchScorer over the same taxonomy.
    pub scorer: Arc<dyn MatchScorer>,
}

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::manga::FollowedManga;

#[derive(Debug, Error)]
pub enum SourceRepositoryError {
    #[error("source return error: {0}")]
    SourceError(#[from] mdsync_mangadex::Error),
    #[error("other error: {0}")]
    Other(#[from] anyhow::Error),
}

#[async_trait]
pub trait SourceRepository {
    async fn followed_manga(&mut self) -> Result<Vec<FollowedManga>, SourceRepositoryError>;

    async fn read_chapters(
        &mut self,
        manga_id: &str,
    ) -> Result<Vec<String>, SourceRepositoryError>;
}

use async_trait::async_trait;
use mdsync_mangadex::{MangaDex, TokenStore};

use crate::domain::{
    entities::manga::FollowedManga,
    repositories::source::{SourceRepository, SourceRepositoryError},
};

pub struct MangaDexRepository<S> {
    client: MangaDex<S>,
}

impl<S: TokenStore> MangaDexRepository<S> {
    pub fn new(client: MangaDex<S>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<S: TokenStore + Sync> SourceRepository for MangaDexRepository<S> {
    async fn followed_manga(&mut self) -> Result<Vec<FollowedManga>, SourceRepositoryError> {
        let manga = self.client.followed_manga().await?;

        Ok(manga
            .into_iter()
            .map(|m| FollowedManga {
                id: m.id,
                title: m
                    .attributes
                    .title
                    .en
                    .unwrap_or_else(|| "Unknown Title".to_string()),
            })
            .collect())
    }

    async fn read_chapters(
        &mut self,
        manga_id: &str,
    ) -> Result<Vec<String>, SourceRepositoryError> {
        Ok(self.client.read_chapters(manga_id).await?)
    }
}

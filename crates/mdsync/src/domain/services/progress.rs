use crate::domain::{
    entities::manga::{LatestChapter, MangaProgress},
    repositories::source::{SourceRepository, SourceRepositoryError},
};

pub struct ProgressService<R>
where
    R: SourceRepository,
{
    repo: R,
}

impl<R> ProgressService<R>
where
    R: SourceRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Latest read chapter per followed title, in followed-list order. A
    /// failure on a single title is recorded as `Failed` and does not abort
    /// the rest of the batch.
    pub async fn reading_progress(&mut self) -> Result<Vec<MangaProgress>, SourceRepositoryError> {
        info!("fetching reading progress for all followed manga");
        let followed = self.repo.followed_manga().await?;
        let total = followed.len();

        let mut progress = Vec::with_capacity(total);
        for (i, manga) in followed.into_iter().enumerate() {
            info!("processing manga {}/{}: {}", i + 1, total, manga.title);

            let latest = match self.repo.read_chapters(&manga.id).await {
                // chapter ids compare as plain strings, so "10" sorts below "2"
                Ok(chapters) => LatestChapter::Read(
                    chapters
                        .into_iter()
                        .max()
                        .unwrap_or_else(|| "0".to_string()),
                ),
                Err(e) => {
                    error!("error processing manga '{}': {e}", manga.title);
                    LatestChapter::Failed
                }
            };

            progress.push(MangaProgress {
                title: manga.title,
                latest,
            });
        }
        info!("completed fetching reading progress for {} manga", progress.len());

        Ok(progress)
    }
}

use mdsync_tracker::ProgressSink;

use crate::domain::{
    entities::manga::LatestChapter, repositories::source::SourceRepository,
    services::progress::ProgressService,
};

pub struct SyncService<R, S>
where
    R: SourceRepository,
    S: ProgressSink,
{
    progress: ProgressService<R>,
    sink: S,
}

impl<R, S> SyncService<R, S>
where
    R: SourceRepository,
    S: ProgressSink,
{
    pub fn new(progress: ProgressService<R>, sink: S) -> Self {
        Self { progress, sink }
    }

    /// One sync pass. Failures are logged and swallowed so the process can
    /// still exit cleanly.
    pub async fn sync(&mut self) {
        let progress = match self.progress.reading_progress().await {
            Ok(progress) => progress,
            Err(e) => {
                error!("error fetching reading progress: {e}");
                return;
            }
        };

        for entry in progress {
            match entry.latest {
                LatestChapter::Read(chapter) => {
                    if let Err(e) = self.sink.push(&entry.title, &chapter).await {
                        error!(
                            "failed to sync '{}' to {}: {e}",
                            entry.title,
                            self.sink.name()
                        );
                    } else {
                        info!("updated '{}' to chapter {chapter}", entry.title);
                    }
                }
                LatestChapter::Failed => {
                    warn!("skipping '{}', progress unavailable", entry.title);
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Mutex;

    use anyhow::anyhow;
    use async_trait::async_trait;

    use super::*;
    use crate::domain::{
        entities::manga::FollowedManga, repositories::source::SourceRepositoryError,
    };

    struct FakeSource {
        followed: Vec<FollowedManga>,
        chapters: Vec<Option<Vec<String>>>,
    }

    #[async_trait]
    impl SourceRepository for FakeSource {
        async fn followed_manga(&mut self) -> Result<Vec<FollowedManga>, SourceRepositoryError> {
            Ok(self.followed.clone())
        }

        async fn read_chapters(
            &mut self,
            _manga_id: &str,
        ) -> Result<Vec<String>, SourceRepositoryError> {
            self.chapters
                .remove(0)
                .ok_or_else(|| SourceRepositoryError::Other(anyhow!("read chapters failed")))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        pushed: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl ProgressSink for RecordingSink {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn push(&self, title: &str, chapter: &str) -> Result<(), anyhow::Error> {
            self.pushed
                .lock()
                .unwrap()
                .push((title.to_string(), chapter.to_string()));
            if self.fail {
                return Err(anyhow!("push rejected"));
            }

            Ok(())
        }
    }

    fn followed(titles: &[&str]) -> Vec<FollowedManga> {
        titles
            .iter()
            .enumerate()
            .map(|(i, title)| FollowedManga {
                id: format!("id-{i}"),
                title: title.to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_sync_pushes_only_successful_entries() {
        let source = FakeSource {
            followed: followed(&["Foo", "Bar", "Baz"]),
            chapters: vec![
                Some(vec!["4".to_string()]),
                None,
                Some(vec!["9".to_string()]),
            ],
        };
        let mut service = SyncService::new(ProgressService::new(source), RecordingSink::default());

        service.sync().await;

        let pushed = service.sink.pushed.lock().unwrap();
        assert_eq!(*pushed, vec![
            ("Foo".to_string(), "4".to_string()),
            ("Baz".to_string(), "9".to_string()),
        ]);
    }

    #[tokio::test]
    async fn test_sync_continues_after_push_failure() {
        let source = FakeSource {
            followed: followed(&["Foo", "Bar"]),
            chapters: vec![Some(vec!["1".to_string()]), Some(vec!["2".to_string()])],
        };
        let sink = RecordingSink {
            fail: true,
            ..Default::default()
        };
        let mut service = SyncService::new(ProgressService::new(source), sink);

        service.sync().await;

        assert_eq!(service.sink.pushed.lock().unwrap().len(), 2);
    }
}

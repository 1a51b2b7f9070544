use std::fmt;

/// A title the user follows on MangaDex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowedManga {
    pub id: String,
    pub title: String,
}

/// Latest read chapter computed for a single followed title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatestChapter {
    Read(String),
    Failed,
}

impl fmt::Display for LatestChapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(chapter) => write!(f, "{chapter}"),
            Self::Failed => write!(f, "Error"),
        }
    }
}

/// One entry of the per-run progress report, in followed-list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MangaProgress {
    pub title: String,
    pub latest: LatestChapter,
}

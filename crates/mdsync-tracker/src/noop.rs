use async_trait::async_trait;

use crate::ProgressSink;

/// Stand-in sink until a real tracker integration lands.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracker;

impl NoopTracker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressSink for NoopTracker {
    fn name(&self) -> &'static str {
        "noop"
    }

    async fn push(&self, title: &str, chapter: &str) -> Result<(), anyhow::Error> {
        debug!("would update '{title}' to chapter {chapter}");

        Ok(())
    }
}

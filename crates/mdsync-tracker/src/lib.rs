#[macro_use]
extern crate log;

pub mod noop;
pub use noop::NoopTracker;

use async_trait::async_trait;

/// A target service that receives per-title reading progress.
#[async_trait]
pub trait ProgressSink {
    fn name(&self) -> &'static str;

    async fn push(&self, title: &str, chapter: &str) -> Result<(), anyhow::Error>;
}

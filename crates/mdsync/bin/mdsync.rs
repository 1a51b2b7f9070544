#[macro_use]
extern crate log;

use clap::Parser;
use mdsync::{
    domain::services::{progress::ProgressService, sync::SyncService},
    infrastructure::{
        config::{self, Config},
        repositories::source::MangaDexRepository,
        settings::EnvFile,
    },
};
use mdsync_mangadex::MangaDex;
use mdsync_tracker::NoopTracker;

#[derive(Parser)]
struct Opts {
    /// Path to settings file
    #[clap(long, default_value = ".env")]
    env_file: String,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let opts: Opts = Opts::parse();

    let settings = EnvFile::open(&opts.env_file)?;
    let config = Config::from_env_file(&settings)?;

    let env = env_logger::Env::default()
        .default_filter_or(config.log_level.as_deref().unwrap_or("info"));
    env_logger::Builder::from_env(env).init();

    debug!("base url: {}", config.base_url);

    let token_state = config::load_token_state(&settings);
    let client = MangaDex::new(
        &config.base_url,
        config.credentials.clone(),
        token_state,
        settings,
    );

    let progress = ProgressService::new(MangaDexRepository::new(client));
    let mut sync = SyncService::new(progress, NoopTracker::new());
    sync.sync().await;

    Ok(())
}

//! Charsmith - Main entry point.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use charsmith_engine::cli::{self, Cli};
use charsmith_engine::config::{EngineConfig, StorageKind};
use charsmith_engine::infrastructure::clock::{SystemClock, SystemRandom};
use charsmith_engine::infrastructure::persistence::{InMemoryCharacterRepo, SqliteCharacterRepo};
use charsmith_engine::infrastructure::ports::{CharacterRepo, ClockPort};
use charsmith_engine::infrastructure::rules_loader::load_rule_set;
use charsmith_engine::use_cases::CharacterService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays pure JSON.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "charsmith_engine=info,charsmith_domain=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::from_env()?;
    let rules = Arc::new(load_rule_set(config.ruleset_path.as_deref())?);

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
    let repo: Arc<dyn CharacterRepo> = match config.storage {
        StorageKind::Sqlite => {
            tracing::info!(path = %config.db_path.display(), "Using SQLite storage");
            Arc::new(SqliteCharacterRepo::new(&config.db_path, clock).await?)
        }
        StorageKind::Memory => {
            tracing::info!("Using in-memory storage");
            Arc::new(InMemoryCharacterRepo::new())
        }
    };

    let service = CharacterService::new(rules, repo, Arc::new(SystemRandom::new()));
    // A broken store still lets commands run against an empty view.
    if let Err(e) = service.load_all().await {
        tracing::warn!(error = %e, "Failed to load stored characters");
    }

    let output = cli::run(cli.command, &service, config.default_edition).await?;
    for message in &output.messages {
        eprintln!("{message}");
    }
    if let Some(json) = output.json {
        println!("{json}");
    }
    Ok(())
}

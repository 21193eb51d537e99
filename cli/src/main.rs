mod cli;
mod input;

use anyhow::{Context, Result};
use clap::Parser;
use secret_draw_core_rs::service::{DrawService, InMemoryDrawStore, StaticDirectory};
use secret_draw_core_rs::{GroupId, RngManager};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::input::{load_config, load_input};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "secret_draw=info,secret_draw_core_rs=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let input = load_input(&cli.input)?;

    let group = GroupId::from(cli.group.as_str());
    let directory =
        StaticDirectory::new().with_group(group.clone(), input.participants, input.exclusions);
    let service = DrawService::new(
        directory.clone(),
        directory,
        InMemoryDrawStore::new(),
        config,
    )
    .context("invalid draw configuration")?;

    let mut rng = match cli.seed {
        Some(seed) => RngManager::new(seed),
        None => RngManager::from_entropy(),
    };
    tracing::debug!(seed = rng.get_state(), "rng ready");

    let record = service
        .execute_draw(&group, &mut rng)
        .with_context(|| format!("drawing group {}", group))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        let mut assignments = record.assignments;
        assignments.sort_by(|a, b| a.giver.cmp(&b.giver));
        for assignment in assignments {
            println!("{} -> {}", assignment.giver, assignment.receiver);
        }
    }

    Ok(())
}

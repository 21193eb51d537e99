use anyhow::{Context, Result};
use secret_draw_core_rs::orchestrator::DrawConfig;
use secret_draw_core_rs::ParticipantId;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::cli::Cli;

/// Roster ids may be written as strings or integers
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for ParticipantId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => ParticipantId::from(s),
            RawId::Number(n) => ParticipantId::from(n),
        }
    }
}

#[derive(Deserialize)]
struct RawInput {
    participants: Vec<RawId>,
    #[serde(default)]
    exclusions: Vec<(RawId, RawId)>,
}

pub struct DrawInput {
    pub participants: Vec<ParticipantId>,
    pub exclusions: Vec<(ParticipantId, ParticipantId)>,
}

pub fn load_input(path: &Path) -> Result<DrawInput> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading draw input {}", path.display()))?;
    let raw: RawInput = serde_json::from_str(&text)
        .with_context(|| format!("parsing draw input {}", path.display()))?;

    Ok(DrawInput {
        participants: raw.participants.into_iter().map(Into::into).collect(),
        exclusions: raw
            .exclusions
            .into_iter()
            .map(|(a, b)| (a.into(), b.into()))
            .collect(),
    })
}

/// Config file first, then flag overrides
pub fn load_config(cli: &Cli) -> Result<DrawConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => DrawConfig::default(),
    };

    if let Some(max_attempts) = cli.max_attempts {
        config.max_attempts = max_attempts;
    }
    if let Some(repair_interval) = cli.repair_interval {
        config.repair_interval = repair_interval;
    }
    if let Some(min_participants) = cli.min_participants {
        config.min_participants = min_participants;
    }

    Ok(config)
}

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "secret-draw")]
#[command(about = "Draw secret recipients for a group, honouring blocked pairs")]
pub struct Cli {
    #[arg(
        long,
        help = "JSON file with \"participants\" and optional \"exclusions\" ([[blocker, blocked], ...])"
    )]
    pub input: PathBuf,

    #[arg(long, help = "Seed for a reproducible draw (random if omitted)")]
    pub seed: Option<u64>,

    #[arg(long, help = "JSON file with draw configuration")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Generation attempts before giving up")]
    pub max_attempts: Option<usize>,

    #[arg(long, help = "Run swap repair after every Nth rejected attempt")]
    pub repair_interval: Option<usize>,

    #[arg(long, help = "Smallest group that may be drawn (at least 3)")]
    pub min_participants: Option<usize>,

    #[arg(long, help = "Group name recorded with the draw", default_value_t = String::from("cli"))]
    pub group: String,

    #[arg(long, help = "Print the full draw record as JSON", default_value_t = false)]
    pub json: bool,
}

use anyhow::Result;
use clap::{Parser, ValueEnum};
use retro_snake::game::{EdgePolicy, GameConfig};
use retro_snake::logging;
use retro_snake::modes::HumanMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "retro_snake")]
#[command(version, about = "Grid snake arcade game for the terminal")]
struct Cli {
    /// Rule set to start from
    #[arg(long, default_value = "hazards")]
    ruleset: Ruleset,

    /// Override the rule set's edge behaviour
    #[arg(long)]
    edges: Option<Edges>,

    /// JSON file with game settings; replaces the rule set
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for repeatable food, obstacle and power-up placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (level from RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(Clone, ValueEnum)]
enum Ruleset {
    /// Walls kill, faster every 5 points, no obstacles or power-ups
    Classic,
    /// Wrapping edges, chasing obstacles and power-ups
    Hazards,
}

#[derive(Clone, ValueEnum)]
enum Edges {
    Bounded,
    Wrapped,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => match self.ruleset {
                Ruleset::Classic => GameConfig::classic(),
                Ruleset::Hazards => GameConfig::hazards(),
            },
        };

        if let Some(edges) = &self.edges {
            config.edge_policy = match edges {
                Edges::Bounded => EdgePolicy::Bounded,
                Edges::Wrapped => EdgePolicy::Wrapped,
            };
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = cli.game_config()?;

    if cli.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    logging::init(cli.log_file.as_deref())?;
    tracing::info!(?config, seed = ?cli.seed, "starting");

    let mut human_mode = HumanMode::new(config, cli.seed)?;
    human_mode.run().await?;

    Ok(())
}

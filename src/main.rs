use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::{GameConfig, GameVariant, VariantKind};
use grid_snake::modes::{HeadlessMode, HumanMode};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Grid Snake with classic, enemy and two-player modes")]
struct Cli {
    /// How to run the game
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// Skip the menu and start this variant (required for headless)
    #[arg(long)]
    variant: Option<Variant>,

    /// JSON file with timing overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here while playing (the terminal is taken by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the headless summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play in the terminal with keyboard controls
    Play,
    /// Run one round without input on a virtual clock
    Headless,
}

#[derive(Clone, Copy, ValueEnum)]
enum Variant {
    Classic,
    Enemy,
    TwoPlayer,
    Competitive,
}

impl From<Variant> for VariantKind {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Classic => VariantKind::Classic,
            Variant::Enemy => VariantKind::ClassicEnemy,
            Variant::TwoPlayer => VariantKind::TwoPlayer,
            Variant::Competitive => VariantKind::Competitive,
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match (&cli.mode, &cli.log_file) {
        (_, Some(path)) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        (Mode::Headless, None) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        // Logging to the terminal would tear the UI
        (Mode::Play, None) => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let variant = cli
        .variant
        .map(|variant| GameVariant::from_kind(variant.into()));

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Play => {
            let mut human_mode = HumanMode::new(config, variant)?;
            human_mode.run().await?;
        }
        Mode::Headless => {
            let variant = variant.context("--variant is required in headless mode")?;
            let summary = HeadlessMode::new(config, variant)?.run()?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
                );
            } else {
                println!("{}", summary.variant);
                for line in &summary.results {
                    println!("{line}");
                }
                println!(
                    "ticks: {}  food eaten: {}  virtual time: {}ms",
                    summary.ticks, summary.food_eaten, summary.virtual_time_ms
                );
            }
        }
    }

    Ok(())
}

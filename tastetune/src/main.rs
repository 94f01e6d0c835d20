//! tastetune - food → mood → music document builder
//!
//! `convert` (default) reads the food/taste and taste/mood/music sheets and
//! writes the food-keyed JSON document. `pick` draws one track for a food
//! and mood from a written document.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tastetune_common::config::{PipelineConfig, TomlConfig};
use tastetune_common::document::load_document;
use tastetune_common::pick::{pick_track, UriKind};
use tastetune_common::pipeline::{run, LENIENCY_SUMMARY};
use tastetune_common::Mood;
use tracing::{error, info};

mod cli;

use cli::{Args, Command, ConvertArgs, PickArgs};

fn main() -> Result<()> {
    let args = Args::parse();

    // Config errors are reported after tracing is up
    let toml_config = TomlConfig::load(args.config.as_deref());
    let level = args
        .log_level
        .clone()
        .or_else(|| toml_config.as_ref().ok().map(|c| c.logging.level.clone()))
        .unwrap_or_else(|| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level)),
        )
        .with_target(false)
        .init();

    info!("Starting tastetune v{}", env!("CARGO_PKG_VERSION"));

    let toml_config = match toml_config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let result = match args.command {
        None => convert(&ConvertArgs::default(), &toml_config),
        Some(Command::Convert(convert_args)) => convert(&convert_args, &toml_config),
        Some(Command::Pick(pick_args)) => pick(&pick_args, &toml_config),
    };

    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}

fn convert(convert_args: &ConvertArgs, toml_config: &TomlConfig) -> Result<()> {
    let config = PipelineConfig::resolve(&convert_args.overrides(), toml_config);
    info!("Input: {}", config.input.display());
    info!("Sheets: '{}', '{}'", config.sheet_a, config.sheet_b);

    let summary = run(&config).context("Conversion aborted, no document written")?;

    if !summary.missing_food_columns.is_empty() {
        info!(
            "Food sheet columns read as empty: {}",
            summary.missing_food_columns.join(", ")
        );
    }
    info!(
        "{} foods, {} tracks (rank ordering {})",
        summary.foods,
        summary.tracks,
        if summary.ranked { "on" } else { "off" }
    );

    let output = summary
        .output
        .canonicalize()
        .unwrap_or_else(|_| summary.output.clone());
    println!("✓ Wrote {}", output.display());
    println!("  {}", LENIENCY_SUMMARY);
    Ok(())
}

fn pick(pick_args: &PickArgs, toml_config: &TomlConfig) -> Result<()> {
    let document = match &pick_args.document {
        Some(path) => path.clone(),
        None => PipelineConfig::resolve(&Default::default(), toml_config).output,
    };
    let catalogue = load_document(&document)
        .with_context(|| format!("Failed to load {}", document.display()))?;

    let entry = catalogue
        .get(&pick_args.food)
        .ok_or_else(|| anyhow!("Unknown food '{}' in {}", pick_args.food, document.display()))?;
    let mood = Mood::normalize(&pick_args.mood).ok_or_else(|| anyhow!("Mood must not be empty"))?;

    let mut rng = match pick_args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let track = pick_track(entry.music.get(&mood), &mut rng).ok_or_else(|| {
        anyhow!(
            "No tracks registered for '{}' × {}; add rows to the music sheet and convert again",
            pick_args.food,
            mood.label()
        )
    })?;

    let artist = track
        .artist
        .as_deref()
        .map(|a| format!(" / {}", a))
        .unwrap_or_default();
    println!("Food:  {}", pick_args.food);
    println!("Mood:  {}", mood.label());
    println!("Track: {}{}", track.title, artist);
    println!("URI:   {} ({})", track.uri, UriKind::classify(&track.uri).as_str());
    Ok(())
}

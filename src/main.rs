//! trajmeet CLI
//!
//! Did two identifiers meet?
//!
//! Usage:
//!     trajmeet identify --data positions.csv --one de0a13a8 --two 4f2b1c9e
//!     trajmeet identify --data positions.csv --one a --two b --config run.yaml --algorithm gabriel
//!     trajmeet algorithms

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use trajmeet::{
    IdentifyRequest, Intersection, LoggingYamlConfig, MatcherRegistry, RunConfig,
    identify_in_store, load_trajectories,
};

/// trajmeet - find where and when two trajectories met
#[derive(Parser)]
#[command(name = "trajmeet")]
#[command(version)]
#[command(about = "Trajectory intersection identification on indoor floor plans", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look for one meeting between two identifiers
    Identify {
        /// CSV file with a `timestamp,x,y,floor,uid` header
        #[arg(short, long)]
        data: PathBuf,

        /// First identifier
        #[arg(long)]
        one: String,

        /// Second identifier
        #[arg(long)]
        two: String,

        /// YAML run configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Algorithm name (overrides the config file)
        #[arg(short, long)]
        algorithm: Option<String>,

        /// Spatial threshold in metres (overrides the config file)
        #[arg(long)]
        spatial: Option<f64>,

        /// Temporal threshold in seconds (overrides the config file)
        #[arg(long)]
        temporal: Option<u64>,

        /// Use rayon inside the matcher
        #[arg(long)]
        parallel: bool,

        /// Emit logs as JSON
        #[arg(long)]
        json_logs: bool,
    },

    /// List available algorithms
    Algorithms,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Identify {
            data,
            one,
            two,
            config,
            algorithm,
            spatial,
            temporal,
            parallel,
            json_logs,
        } => {
            let mut run = match config {
                Some(path) => RunConfig::from_file(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => RunConfig::default(),
            };
            if let Some(algorithm) = algorithm {
                run.matcher.algorithm = algorithm;
            }
            if let Some(spatial) = spatial {
                run.matcher.spatial_epsilon = spatial;
            }
            if let Some(temporal) = temporal {
                run.matcher.temporal_epsilon = temporal;
            }
            run.matcher.use_parallel |= parallel;
            run.logging.json |= json_logs;
            run.validate().context("invalid run configuration")?;

            init_tracing(&run.logging);
            identify(&run, &data, &one, &two)
        }
        Commands::Algorithms => {
            for name in MatcherRegistry::with_defaults().available() {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn identify(run: &RunConfig, data: &Path, one: &str, two: &str) -> anyhow::Result<()> {
    let request = IdentifyRequest::from_config(one, two, &run.matcher)?;
    let store = load_trajectories(data, &run.ingest)
        .with_context(|| format!("loading {}", data.display()))?;
    let registry = MatcherRegistry::with_parallel(run.matcher.use_parallel);

    let start = Instant::now();
    let hit = identify_in_store(&store, &registry, &request)?;
    let elapsed = start.elapsed();

    match hit {
        Some(hit) => print_intersection(&hit),
        None => println!("No intersection found between the given points"),
    }
    println!("Time of computation: {} ms", elapsed.as_secs_f64() * 1000.0);
    Ok(())
}

fn print_intersection(hit: &Intersection) {
    let (p, q) = (hit.point_one(), hit.point_two());
    println!(
        "UID {} intersected with {} on floor {}",
        p.identifier(),
        q.identifier(),
        hit.floor()
    );
    println!(
        "  {} at ({}, {}) on {}",
        p.identifier(),
        p.x(),
        p.y(),
        p.timestamp().to_rfc3339()
    );
    println!(
        "  {} at ({}, {}) on {}",
        q.identifier(),
        q.x(),
        q.y(),
        q.timestamp().to_rfc3339()
    );
    println!(
        "  distance {:.3} m, {} s apart",
        hit.distance(),
        hit.time_gap_seconds()
    );
}

fn init_tracing(cfg: &LoggingYamlConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cfg.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

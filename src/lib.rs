//! Workspace umbrella crate for trajmeet.
//!
//! This crate stitches the stage crates together: CSV ingest into a
//! [`TrajectoryStore`], algorithm resolution through the [`MatcherRegistry`],
//! and the identify call itself, so callers can go from a data file and two
//! identifiers to an [`Intersection`] in one call.
//!
//! ```no_run
//! use trajmeet::{load_and_identify, RunConfig};
//!
//! let config = RunConfig::from_file("trajmeet.yaml")?;
//! match load_and_identify("positions.csv", &config, "de0a13a8", "4f2b1c9e")? {
//!     Some(hit) => println!("met on floor {} at {:.2} m", hit.floor(), hit.distance()),
//!     None => println!("No intersection found between the given points"),
//! }
//! # Ok::<(), trajmeet::PipelineError>(())
//! ```

pub mod config;

pub use crate::config::{ConfigLoadError, LoggingYamlConfig, MatcherYamlConfig, RunConfig};
pub use geometry::{
    DelaunayGabriel, GabrielEdge, GeometryError, PlanarPoint, ProximityGraph, euclidean_distance,
};
pub use ingest::{
    IngestConfig, IngestError, SpacetimePoint, TrajectoryStore, load_trajectories,
    load_trajectories_from_reader,
};
pub use matcher::{
    BruteForceMatcher, GabrielMatcher, Intersection, MatchError, MatchMetrics, MatchThresholds,
    MatcherRegistry, TrajectoryMatcher, set_match_metrics,
};

use std::error::Error;
use std::fmt;
use std::path::Path;
use std::time::Instant;

use tracing::{Level, info};

/// Errors that can occur while running an identify request end to end.
#[derive(Debug)]
pub enum PipelineError {
    Config(ConfigLoadError),
    Ingest(IngestError),
    Match(MatchError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Config(err) => write!(f, "configuration failure: {err}"),
            PipelineError::Ingest(err) => write!(f, "ingest failure: {err}"),
            PipelineError::Match(err) => write!(f, "matching failure: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Config(err) => Some(err),
            PipelineError::Ingest(err) => Some(err),
            PipelineError::Match(err) => Some(err),
        }
    }
}

impl From<ConfigLoadError> for PipelineError {
    fn from(value: ConfigLoadError) -> Self {
        PipelineError::Config(value)
    }
}

impl From<IngestError> for PipelineError {
    fn from(value: IngestError) -> Self {
        PipelineError::Ingest(value)
    }
}

impl From<MatchError> for PipelineError {
    fn from(value: MatchError) -> Self {
        PipelineError::Match(value)
    }
}

/// One identify call: which pair, which algorithm, which thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifyRequest {
    pub uid_one: String,
    pub uid_two: String,
    pub algorithm: String,
    pub thresholds: MatchThresholds,
}

impl IdentifyRequest {
    /// Build a request from the matcher section of a run config.
    pub fn from_config(
        uid_one: impl Into<String>,
        uid_two: impl Into<String>,
        cfg: &MatcherYamlConfig,
    ) -> Result<Self, ConfigLoadError> {
        Ok(Self {
            uid_one: uid_one.into(),
            uid_two: uid_two.into(),
            algorithm: cfg.algorithm.clone(),
            thresholds: cfg.thresholds()?,
        })
    }
}

/// Resolve the algorithm and look for a meeting between two stored trajectories.
///
/// An identifier absent from `store` behaves like an empty trajectory:
/// the result is `Ok(None)`.
pub fn identify_in_store(
    store: &TrajectoryStore,
    registry: &MatcherRegistry,
    request: &IdentifyRequest,
) -> Result<Option<Intersection>, PipelineError> {
    let span = tracing::span!(
        Level::INFO,
        "trajmeet.identify",
        algorithm = %request.algorithm,
        one = %request.uid_one,
        two = %request.uid_two
    );
    let _guard = span.enter();

    let matcher = registry.resolve(&request.algorithm)?;
    let hit = matcher.identify(
        store.get(&request.uid_one),
        store.get(&request.uid_two),
        &request.thresholds,
    )?;
    Ok(hit)
}

/// Load `path` with the ingest settings of `config`, then identify with its
/// matcher settings.
pub fn load_and_identify<P: AsRef<Path>>(
    path: P,
    config: &RunConfig,
    uid_one: &str,
    uid_two: &str,
) -> Result<Option<Intersection>, PipelineError> {
    config.validate()?;
    let start = Instant::now();

    let request = IdentifyRequest::from_config(uid_one, uid_two, &config.matcher)?;
    let store = load_trajectories(path, &config.ingest)?;
    let registry = MatcherRegistry::with_parallel(config.matcher.use_parallel);
    let hit = identify_in_store(&store, &registry, &request)?;

    let elapsed_micros = start.elapsed().as_micros();
    info!(
        identifiers = store.len(),
        points = store.total_points(),
        found = hit.is_some(),
        elapsed_micros,
        "pipeline_complete"
    );

    Ok(hit)
}

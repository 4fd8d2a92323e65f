//! CSV → [`TrajectoryStore`] loading.
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{info, warn, Level};

use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::store::TrajectoryStore;
use crate::types::{CsvRecord, SpacetimePoint};

/// Load every trajectory from the CSV file at `path`.
pub fn load_trajectories<P: AsRef<Path>>(
    path: P,
    cfg: &IngestConfig,
) -> Result<TrajectoryStore, IngestError> {
    let path = path.as_ref();
    let span = tracing::span!(Level::INFO, "ingest.load", path = %path.display());
    let _guard = span.enter();

    let file = File::open(path).map_err(|err| {
        let err = IngestError::Io(format!("{}: {err}", path.display()));
        warn!(error = %err, "ingest_failure");
        err
    })?;
    load_trajectories_from_reader(file, cfg)
}

/// Load every trajectory from any CSV byte source.
///
/// Records are grouped by `uid`, keeping input order within each group.
pub fn load_trajectories_from_reader<R: Read>(
    reader: R,
    cfg: &IngestConfig,
) -> Result<TrajectoryStore, IngestError> {
    cfg.validate()?;
    let start = Instant::now();

    let mut csv_reader = ReaderBuilder::new()
        .delimiter(cfg.delimiter_byte())
        .has_headers(true)
        .trim(if cfg.trim_fields { Trim::All } else { Trim::None })
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|err| csv_error(&err, 1))?
        .clone();

    let mut store = TrajectoryStore::new();
    let mut record = StringRecord::new();
    let mut accepted = 0usize;
    let mut skipped = 0usize;

    loop {
        match csv_reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => {
                let line = err.position().map_or(0, |p| p.line());
                let err = csv_error(&err, line);
                warn!(error = %err, elapsed_micros = start.elapsed().as_micros(), "ingest_failure");
                return Err(err);
            }
        }

        let line = record.position().map_or(0, |p| p.line());
        match parse_record(&record, &headers, line) {
            Ok(point) => {
                if let Some(limit) = cfg.max_records {
                    if accepted >= limit {
                        let err = IngestError::TooManyRecords { limit };
                        warn!(error = %err, "ingest_failure");
                        return Err(err);
                    }
                }
                store.push(point);
                accepted += 1;
            }
            Err(err) if cfg.skip_invalid_records => {
                warn!(line, error = %err, "ingest_record_skipped");
                skipped += 1;
            }
            Err(err) => {
                warn!(error = %err, elapsed_micros = start.elapsed().as_micros(), "ingest_failure");
                return Err(err);
            }
        }
    }

    info!(
        records = accepted,
        skipped,
        identifiers = store.len(),
        elapsed_micros = start.elapsed().as_micros(),
        "ingest_success"
    );

    Ok(store)
}

fn parse_record(
    record: &StringRecord,
    headers: &StringRecord,
    line: u64,
) -> Result<SpacetimePoint, IngestError> {
    let row: CsvRecord = record
        .deserialize(Some(headers))
        .map_err(|err| csv_error(&err, line))?;
    row.into_point(line)
}

fn csv_error(err: &csv::Error, line: u64) -> IngestError {
    match err.kind() {
        csv::ErrorKind::Io(io) => IngestError::Io(io.to_string()),
        _ => IngestError::Csv {
            line,
            message: err.to_string(),
        },
    }
}

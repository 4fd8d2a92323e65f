//! trajmeet ingest layer
//!
//! This is where positions enter trajmeet. We read CSV exports of an indoor
//! positioning system, validate every row, and group the points by owner
//! into a [`TrajectoryStore`] the matchers can query by identifier.
//!
//! ## What we do here
//!
//! - **Parse rows** - `timestamp,x,y,floor,uid`, any column order.
//! - **Keep time honest** - timestamps must carry an offset and keep it;
//!   region ids in brackets (`[Europe/Athens]`) are accepted and dropped.
//! - **Reject garbage** - NaN/infinite coordinates, blank uids and bad
//!   timestamps fail with the line number, or are skipped and logged when
//!   `skip_invalid_records` is on.
//! - **Log everything** - structured events via tracing.
//!
//! ## Example
//!
//! ```
//! use ingest::{load_trajectories_from_reader, IngestConfig};
//!
//! let csv = "\
//! timestamp,x,y,floor,uid
//! 2017-07-18T09:00:00+03:00,0.0,0.0,1,P
//! 2017-07-18T09:00:20+03:00,3.0,0.0,1,Q
//! 2017-07-18T09:01:00+03:00,1.0,1.0,1,P
//! ";
//!
//! let store = load_trajectories_from_reader(csv.as_bytes(), &IngestConfig::default()).unwrap();
//! assert_eq!(store.len(), 2);
//! assert_eq!(store.get("P").unwrap().len(), 2);
//! ```

mod config;
mod error;
mod loader;
mod store;
mod types;

pub use crate::config::{ConfigError, IngestConfig};
pub use crate::error::IngestError;
pub use crate::loader::{load_trajectories, load_trajectories_from_reader};
pub use crate::store::TrajectoryStore;
pub use crate::types::{parse_timestamp, SpacetimePoint};

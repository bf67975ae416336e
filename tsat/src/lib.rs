//! Satellite catalog tracker
//!
//! Fetches three-line element catalogs, keeps the parsed records in a
//! name-indexed registry and computes look angles for a ground observer.

pub mod config;
pub mod error;
pub mod logging;
pub mod observer;
pub mod tracker;

pub use config::TrackerConfig;
pub use error::{Result, TrackerError};
pub use observer::{LookAngle, Observer, Propagator, SatLoc, SatPos};
pub use tracker::{HttpSource, SaveOutcome, TextSource, Tracker};
pub use tsat_common::{OperationalStatus, ParseOutcome, Record, Registry};

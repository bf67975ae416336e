///! SGP4 propagation of a catalog record
///!
///! Element-set validation and the propagation itself belong to the `sgp4`
///! crate; this only wires a `Record` into it.

use chrono::{DateTime, NaiveDateTime, Utc};
use tsat_common::Record;

use crate::error::{Result, TrackerError};

pub struct Propagator {
    name: String,
    elements: sgp4::Elements,
    constants: sgp4::Constants,
}

impl Propagator {
    pub fn from_record(record: &Record) -> Result<Self> {
        let name = record.name().to_string();
        let elements = sgp4::Elements::from_tle(
            Some(name.clone()),
            record.line1().as_bytes(),
            record.line2().as_bytes(),
        )
        .map_err(|e| TrackerError::Elements {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        let constants = sgp4::Constants::from_elements(&elements).map_err(|e| TrackerError::Elements {
            name: name.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            name,
            elements,
            constants,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// NORAD id as decoded by sgp4
    pub fn catalog_number(&self) -> u64 {
        self.elements.norad_id
    }

    /// Element set epoch (UTC)
    pub fn epoch(&self) -> NaiveDateTime {
        self.elements.datetime
    }

    /// TEME position (km) and velocity (km/s) at `at`
    pub fn predict(&self, at: &DateTime<Utc>) -> Result<sgp4::Prediction> {
        let elapsed = at.naive_utc() - self.elements.datetime;
        let minutes = elapsed.num_milliseconds() as f64 / 60_000.0;

        self.constants
            .propagate(sgp4::MinutesSinceEpoch(minutes))
            .map_err(|e| TrackerError::Propagation {
                name: self.name.clone(),
                reason: e.to_string(),
            })
    }
}

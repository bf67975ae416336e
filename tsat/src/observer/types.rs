///! Observation sample types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw look angle from an observer to a satellite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAngle {
    /// Radians clockwise from north, in `[0, 2π)`
    pub azimuth: f64,
    /// Radians above the horizon, in `[-π/2, π/2]`
    pub elevation: f64,
    /// Slant range in km
    pub range_km: f64,
}

/// One timestamped sample, angles in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SatLoc {
    pub when: DateTime<Utc>,
    pub az: f64,
    pub el: f64,
}

impl SatLoc {
    pub fn new(when: DateTime<Utc>, look: &LookAngle) -> Self {
        Self {
            when,
            az: look.azimuth.to_degrees(),
            el: look.elevation.to_degrees(),
        }
    }

    /// At or above `min_elevation` degrees
    pub fn is_visible(&self, min_elevation: f64) -> bool {
        self.el >= min_elevation
    }
}

/// Samples collected for one named object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SatPos {
    pub name: String,
    #[serde(default)]
    pub positions: Vec<SatLoc>,
}

impl SatPos {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positions: Vec::new(),
        }
    }

    pub fn push(&mut self, sample: SatLoc) {
        self.positions.push(sample);
    }

    /// Samples at or above `min_elevation` degrees
    pub fn visible(&self, min_elevation: f64) -> impl Iterator<Item = &SatLoc> {
        self.positions.iter().filter(move |s| s.is_visible(min_elevation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_satloc_converts_to_degrees() {
        let when = Utc.with_ymd_and_hms(2019, 10, 2, 8, 15, 0).unwrap();
        let look = LookAngle {
            azimuth: std::f64::consts::PI,
            elevation: FRAC_PI_2 / 3.0,
            range_km: 1500.0,
        };
        let sample = SatLoc::new(when, &look);
        assert!((sample.az - 180.0).abs() < 1e-9);
        assert!((sample.el - 30.0).abs() < 1e-9);
        assert_eq!(sample.when, when);
    }

    #[test]
    fn test_visibility_threshold() {
        let when = Utc.with_ymd_and_hms(2019, 10, 2, 8, 15, 0).unwrap();
        let mut pos = SatPos::new("NOAA 19 [+]");
        pos.push(SatLoc { when, az: 10.0, el: 5.0 });
        pos.push(SatLoc { when, az: 20.0, el: 10.0 });
        pos.push(SatLoc { when, az: 30.0, el: 45.0 });

        assert!(!pos.positions[0].is_visible(10.0));
        assert_eq!(pos.visible(10.0).count(), 2);
        assert_eq!(pos.visible(0.0).count(), 3);
    }
}

///! Ground observer and topocentric look angles
///!
///! The observer's position is rotated into the TEME-like inertial frame with
///! Greenwich sidereal time, then the range vector to the satellite is
///! expressed in the local south-east-zenith frame.

use chrono::{DateTime, Duration, Utc};
use std::f64::consts::PI;

use super::propagator::Propagator;
use super::types::{LookAngle, SatLoc};
use crate::error::Result;

/// WGS84 flattening
const FLATTENING: f64 = 1.0 / 298.257223563;
const TWO_PI: f64 = PI * 2.0;

/// Greenwich mean sidereal time in radians at `at`
pub fn sidereal_time(at: &DateTime<Utc>) -> f64 {
    sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&at.naive_utc()))
}

fn wrap_two_pi(value: f64) -> f64 {
    value.rem_euclid(TWO_PI)
}

/// A fixed ground location and the time it is observing at.
///
/// The timestamp only moves when the caller moves it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    /// Geodetic latitude, radians
    pub latitude: f64,
    /// Longitude, radians, east positive
    pub longitude: f64,
    pub altitude_km: f64,
    pub date: DateTime<Utc>,
}

impl Observer {
    pub fn new(latitude: f64, longitude: f64, altitude_km: f64, date: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            altitude_km,
            date,
        }
    }

    pub fn from_degrees(latitude: f64, longitude: f64, altitude_km: f64, date: DateTime<Utc>) -> Self {
        Self::new(latitude.to_radians(), longitude.to_radians(), altitude_km, date)
    }

    pub fn set_date(&mut self, date: DateTime<Utc>) {
        self.date = date;
    }

    pub fn advance(&mut self, step: Duration) {
        self.date += step;
    }

    /// Observer position in km in the inertial frame at `at`
    fn inertial_position(&self, at: &DateTime<Utc>) -> [f64; 3] {
        let theta = wrap_two_pi(sidereal_time(at) + self.longitude);
        let (sin_lat, cos_lat) = self.latitude.sin_cos();
        let ae = sgp4::WGS84.ae;

        let c = 1.0 / (1.0 + FLATTENING * (FLATTENING - 2.0) * sin_lat * sin_lat).sqrt();
        let s = (1.0 - FLATTENING).powi(2) * c;
        let achcp = (ae * c + self.altitude_km) * cos_lat;

        [
            achcp * theta.cos(),
            achcp * theta.sin(),
            (ae * s + self.altitude_km) * sin_lat,
        ]
    }

    /// Look angle to the satellite at the observer's current date
    pub fn look(&self, propagator: &Propagator) -> Result<LookAngle> {
        self.look_at(propagator, &self.date)
    }

    fn look_at(&self, propagator: &Propagator, at: &DateTime<Utc>) -> Result<LookAngle> {
        let prediction = propagator.predict(at)?;
        let site = self.inertial_position(at);

        let rx = prediction.position[0] - site[0];
        let ry = prediction.position[1] - site[1];
        let rz = prediction.position[2] - site[2];
        let range_km = (rx * rx + ry * ry + rz * rz).sqrt();

        let theta = wrap_two_pi(sidereal_time(at) + self.longitude);
        let (sin_lat, cos_lat) = self.latitude.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();

        let top_s = sin_lat * cos_theta * rx + sin_lat * sin_theta * ry - cos_lat * rz;
        let top_e = -sin_theta * rx + cos_theta * ry;
        let top_z = cos_lat * cos_theta * rx + cos_lat * sin_theta * ry + sin_lat * rz;

        let azimuth = wrap_two_pi(top_e.atan2(-top_s));
        let elevation = (top_z / range_km).clamp(-1.0, 1.0).asin();

        Ok(LookAngle {
            azimuth,
            elevation,
            range_km,
        })
    }

    /// Lazy samples at `start`, `start + step`, `start + 2 * step`, ...
    ///
    /// The sequence is unbounded; bound it with `take` or `take_while`.
    /// `self` is not modified.
    pub fn samples<'a>(&self, propagator: &'a Propagator, start: DateTime<Utc>, step: Duration) -> Samples<'a> {
        Samples {
            observer: *self,
            propagator,
            next: start,
            step,
        }
    }
}

/// Iterator returned by [`Observer::samples`]
pub struct Samples<'a> {
    observer: Observer,
    propagator: &'a Propagator,
    next: DateTime<Utc>,
    step: Duration,
}

impl Iterator for Samples<'_> {
    type Item = Result<SatLoc>;

    fn next(&mut self) -> Option<Self::Item> {
        let when = self.next;
        self.next = when + self.step;
        Some(
            self.observer
                .look_at(self.propagator, &when)
                .map(|look| SatLoc::new(when, &look)),
        )
    }
}

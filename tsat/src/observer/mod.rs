///! Observer geometry
///!
///! Turns a catalog record into azimuth/elevation samples for a ground
///! observer. Time only advances when the caller advances it, either with
///! `Observer::advance` or by pulling from `Observer::samples`.

mod look;
mod propagator;
mod types;

pub use look::{sidereal_time, Observer, Samples};
pub use propagator::Propagator;
pub use types::{LookAngle, SatLoc, SatPos};

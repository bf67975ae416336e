///! Catalog record types
///!
///! A catalog entry is three lines of text: a free-form name line followed by
///! the two fixed-width orbital element lines. The element lines are carried
///! verbatim; validating them is the propagator's job.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Trailing status annotation, e.g. `NOAA 19 [+]`
static STATUS_MARKER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s*\[([^\[\]])\]\s*$").ok());

/// NORAD catalog number type
pub type CatalogNumber = u32;

/// Operational status decoded from the marker appended to catalog names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationalStatus {
    /// `[+]`
    Operational,
    /// `[-]`
    NonOperational,
    /// `[P]`
    PartiallyOperational,
    /// `[B]`
    Backup,
    /// `[S]`
    Spare,
    /// `[X]`
    ExtendedMission,
    /// `[D]`
    Decayed,
    /// `[?]` or any marker we do not recognise
    Unknown,
    /// No marker on the name line
    Unmarked,
}

impl Default for OperationalStatus {
    fn default() -> Self {
        OperationalStatus::Unmarked
    }
}

impl OperationalStatus {
    /// Decode a single marker character
    pub fn from_marker(marker: char) -> Self {
        match marker {
            '+' => OperationalStatus::Operational,
            '-' => OperationalStatus::NonOperational,
            'P' => OperationalStatus::PartiallyOperational,
            'B' => OperationalStatus::Backup,
            'S' => OperationalStatus::Spare,
            'X' => OperationalStatus::ExtendedMission,
            'D' => OperationalStatus::Decayed,
            _ => OperationalStatus::Unknown,
        }
    }

    /// Whether the object is expected to be transmitting
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            OperationalStatus::Operational
                | OperationalStatus::PartiallyOperational
                | OperationalStatus::Backup
                | OperationalStatus::ExtendedMission
        )
    }
}

/// One catalog entry: the name line and the two element lines
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    name: String,
    line1: String,
    line2: String,
}

impl Record {
    pub fn new(name: impl Into<String>, line1: impl Into<String>, line2: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line1: line1.into(),
            line2: line2.into(),
        }
    }

    /// Full name line, including any status marker
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn line1(&self) -> &str {
        &self.line1
    }

    pub fn line2(&self) -> &str {
        &self.line2
    }

    /// Status decoded from the trailing `[x]` marker
    pub fn status(&self) -> OperationalStatus {
        match split_marker(&self.name) {
            Some((_, marker)) => OperationalStatus::from_marker(marker),
            None => OperationalStatus::Unmarked,
        }
    }

    /// Name with the status marker and surrounding whitespace removed
    pub fn base_name(&self) -> &str {
        match split_marker(&self.name) {
            Some((base, _)) => base,
            None => self.name.trim(),
        }
    }

    /// Catalog number from columns 3-7 of the first element line.
    ///
    /// Returns `None` when the line is too short or the columns are not numeric.
    pub fn catalog_number(&self) -> Option<CatalogNumber> {
        self.line1.get(2..7)?.trim().parse().ok()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.name, self.line1, self.line2)
    }
}

fn split_marker(name: &str) -> Option<(&str, char)> {
    let caps = STATUS_MARKER.as_ref()?.captures(name)?;
    let base = caps.get(1)?.as_str().trim();
    let marker = caps.get(2)?.as_str().chars().next()?;
    Some((base, marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOAA_19_L1: &str = "1 33591U 09005A   19274.88964586 -.00000021  00000-0  14129-4 0  9997";
    const NOAA_19_L2: &str = "2 33591  99.1876 268.5944 0014972  83.9576 276.3300 14.12378214548496";

    #[test]
    fn test_display() {
        let record = Record::new("ISS", "line1", "line2");
        assert_eq!(record.to_string(), "ISS/line1/line2");
    }

    #[test]
    fn test_value_equality() {
        let a = Record::new("ISS", "line1", "line2");
        let b = Record::new("ISS".to_string(), "line1".to_string(), "line2".to_string());
        assert_eq!(a, b);
        assert_ne!(a, Record::new("ISS", "line1", "other"));
    }

    #[test]
    fn test_status_markers() {
        let cases = [
            ("NOAA 19 [+]", OperationalStatus::Operational),
            ("NOAA 1 [-]", OperationalStatus::NonOperational),
            ("NOAA 9 [P]", OperationalStatus::PartiallyOperational),
            ("NOAA 15 [B]", OperationalStatus::Backup),
            ("GOES 13 [S]", OperationalStatus::Spare),
            ("AO-7 [X]", OperationalStatus::ExtendedMission),
            ("OLD SAT [D]", OperationalStatus::Decayed),
            ("MYSTERY [?]", OperationalStatus::Unknown),
            ("ISS (ZARYA)", OperationalStatus::Unmarked),
        ];
        for (name, expected) in cases {
            let record = Record::new(name, "", "");
            assert_eq!(record.status(), expected, "status of {}", name);
        }
    }

    #[test]
    fn test_is_active() {
        assert!(OperationalStatus::Operational.is_active());
        assert!(OperationalStatus::Backup.is_active());
        assert!(!OperationalStatus::NonOperational.is_active());
        assert!(!OperationalStatus::Unmarked.is_active());
    }

    #[test]
    fn test_base_name() {
        assert_eq!(Record::new("NOAA 2 (ITOS-D) [-]", "", "").base_name(), "NOAA 2 (ITOS-D)");
        assert_eq!(Record::new("SUOMI NPP [+]", "", "").base_name(), "SUOMI NPP");
        assert_eq!(Record::new("ISS (ZARYA)  ", "", "").base_name(), "ISS (ZARYA)");
    }

    #[test]
    fn test_catalog_number() {
        let record = Record::new("NOAA 19 [+]", NOAA_19_L1, NOAA_19_L2);
        assert_eq!(record.catalog_number(), Some(33591));

        let short = Record::new("ISS", "line1", "line2");
        assert_eq!(short.catalog_number(), None);
        assert_eq!(Record::new("X", "1", "2").catalog_number(), None);
    }
}

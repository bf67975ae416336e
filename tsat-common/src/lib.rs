//! Catalog records, the name-indexed registry and the three-line text parser
//! shared by the tracker.

pub mod parser;
pub mod registry;
pub mod types;

pub use parser::{parse, parse_into, ParseOutcome};
pub use registry::Registry;
pub use types::{CatalogNumber, OperationalStatus, Record};

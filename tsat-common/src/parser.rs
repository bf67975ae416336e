///! Three-line catalog text parser
///!
///! The text is a flat run of lines grouped in triples
///! (name, element line 1, element line 2) with no separators or header.
///! Records are appended in reverse source order: the first stored record
///! is the last object in the text.

use crate::registry::Registry;
use crate::types::Record;

/// How far a parse got before the input ran out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Every name candidate was consumed
    Complete { records: usize },
    /// The element lines ran dry before the names did.
    ///
    /// `abandoned` counts the name candidates that were never processed,
    /// including the one that triggered the stop.
    Truncated { records: usize, abandoned: usize },
}

impl ParseOutcome {
    pub fn records(&self) -> usize {
        match *self {
            ParseOutcome::Complete { records } => records,
            ParseOutcome::Truncated { records, .. } => records,
        }
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self, ParseOutcome::Truncated { .. })
    }
}

/// Reset `registry` and fill it from `text`.
///
/// Short or misaligned input never fails: records appended before the
/// element lines ran out are kept and the outcome says where parsing stopped.
pub fn parse_into(text: &str, registry: &mut Registry) -> ParseOutcome {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut names: Vec<&str> = lines.iter().step_by(3).copied().collect();
    let mut firsts: Vec<&str> = lines.iter().skip(1).step_by(3).copied().collect();
    let mut seconds: Vec<&str> = lines.iter().skip(2).step_by(3).copied().collect();

    registry.reset();

    let candidates = names.len();
    for processed in 0..candidates {
        let Some(name) = names.pop() else {
            break;
        };
        if name.is_empty() {
            continue;
        }
        match (firsts.pop(), seconds.pop()) {
            (Some(line1), Some(line2)) => {
                registry.append(Record::new(name, line1, line2));
            }
            _ => {
                return ParseOutcome::Truncated {
                    records: registry.len(),
                    abandoned: candidates - processed,
                };
            }
        }
    }

    ParseOutcome::Complete {
        records: registry.len(),
    }
}

/// Parse `text` into a fresh registry
pub fn parse(text: &str) -> Registry {
    let mut registry = Registry::new();
    parse_into(text, &mut registry);
    registry
}

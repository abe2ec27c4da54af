//! Data-quality findings reported alongside (not instead of) results.

use std::fmt;

use serde::Serialize;

use crate::Source;

/// A recoverable inconsistency in curated data.
///
/// These never abort a lookup; they are carried next to the results so
/// callers can distinguish "no data" from "data we could not read".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityIssue {
    /// A PID reference that could not be decoded (e.g. a broken HDRUK list).
    UnparseableReference {
        phenotype_id: String,
        source: Source,
        raw: String,
        reason: String,
    },
    /// A PID reference for a source the phenotype ID does not mark present.
    UnflaggedReference {
        phenotype_id: String,
        source: Source,
        pid: String,
    },
    /// A detail node whose properties do not fit the declared record shape.
    MalformedDetail {
        source: Source,
        pid: String,
        reason: String,
    },
    /// A concept node that could not be read.
    MalformedConcept { source: Source, reason: String },
    /// A concept array attribute whose length differs from `PIDs`.
    ParallelArrayMismatch {
        cid: String,
        attribute: String,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for DataQualityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnparseableReference { phenotype_id, source, raw, reason } => write!(
                f,
                "{phenotype_id}: {source} reference '{raw}' could not be decoded ({reason})"
            ),
            Self::UnflaggedReference { phenotype_id, source, pid } => write!(
                f,
                "{phenotype_id}: {source} reference '{pid}' ignored, ID does not mark {source} present"
            ),
            Self::MalformedDetail { source, pid, reason } => {
                write!(f, "{source} detail {pid} is malformed: {reason}")
            }
            Self::MalformedConcept { source, reason } => {
                write!(f, "{source} concept is malformed: {reason}")
            }
            Self::ParallelArrayMismatch { cid, attribute, expected, actual } => write!(
                f,
                "concept {cid}: '{attribute}' has {actual} entries, expected {expected}"
            ),
        }
    }
}

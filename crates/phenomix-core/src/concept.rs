//! Per-source concept records and parallel-array projection.
//!
//! A concept shared by several details stores one entry per detail in each
//! array-valued attribute: `attribute[i]` belongs to `PIDs[i]`.

use serde::Serialize;
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::literal;
use crate::quality::DataQualityIssue;
use crate::{Properties, Source};

/// A concept node with its parallel arrays decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Concept {
    pub source: Source,
    #[serde(rename = "CID")]
    pub cid: String,
    /// Display name (`description`, `descr`, `ConceptName` or `name`).
    pub name: Option<String>,
    #[serde(rename = "PIDs")]
    pub pids: Vec<String>,
    /// Remaining properties, stringified containers expanded.
    pub attributes: Properties,
}

/// A concept reduced to the entries belonging to one detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedConcept {
    #[serde(rename = "CID")]
    pub cid: String,
    pub name: Option<String>,
    pub detail_pid: String,
    /// Whether `detail_pid` was found in the concept's `PIDs`.
    pub linked: bool,
    pub attributes: Properties,
}

/// Property holding the concept's display name in each source.
fn name_property(source: Source) -> &'static str {
    match source {
        Source::Sentinel => "description",
        Source::Cprd => "descr",
        Source::Ohdsi => "ConceptName",
        Source::Phekb | Source::Hdruk => "name",
    }
}

impl Concept {
    /// Validate a concept node's properties.
    pub fn from_properties(source: Source, properties: Properties) -> CoreResult<Self> {
        if !source.has_concepts() {
            return Err(CoreError::malformed(source, "source has no concept records"));
        }

        let mut attributes: Properties = properties
            .into_iter()
            .map(|(k, v)| {
                let v = literal::decode_stringified(&v).unwrap_or(v);
                (k, v)
            })
            .collect();

        let cid = attributes
            .remove("CID")
            .as_ref()
            .and_then(literal::scalar_text)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| CoreError::malformed(source, "concept has no CID"))?;

        let pids = match attributes.remove("PIDs") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.iter().filter_map(literal::scalar_text).collect(),
            Some(other) => literal::scalar_text(&other).into_iter().collect(),
        };

        let name = attributes
            .get(name_property(source))
            .and_then(literal::scalar_text);

        Ok(Self {
            source,
            cid,
            name,
            pids,
            attributes,
        })
    }

    /// Array attributes whose length differs from `PIDs`.
    pub fn parallel_array_issues(&self) -> Vec<DataQualityIssue> {
        self.attributes
            .iter()
            .filter_map(|(key, value)| match value {
                Value::Array(items) if items.len() != self.pids.len() => {
                    Some(DataQualityIssue::ParallelArrayMismatch {
                        cid: self.cid.clone(),
                        attribute: key.clone(),
                        expected: self.pids.len(),
                        actual: items.len(),
                    })
                }
                _ => None,
            })
            .collect()
    }

    /// Keep only the entries that belong to `detail_pid`.
    ///
    /// Arrays long enough to hold the detail's index are reduced to that
    /// element; scalars pass through. If the PID is not linked, attributes
    /// are returned unchanged.
    pub fn project(&self, detail_pid: &str) -> ProjectedConcept {
        let index = self.pids.iter().position(|p| p == detail_pid);

        let attributes = match index {
            Some(i) => self
                .attributes
                .iter()
                .map(|(key, value)| {
                    let projected = match value {
                        Value::Array(items) if items.len() > i => items[i].clone(),
                        other => other.clone(),
                    };
                    (key.clone(), projected)
                })
                .collect(),
            None => self.attributes.clone(),
        };

        let name = match (&self.name, index) {
            (Some(name), _) => Some(name.clone()),
            (None, Some(_)) => attributes
                .get(name_property(self.source))
                .and_then(literal::scalar_text),
            (None, None) => None,
        };

        ProjectedConcept {
            cid: self.cid.clone(),
            name,
            detail_pid: detail_pid.to_string(),
            linked: index.is_some(),
            attributes,
        }
    }
}

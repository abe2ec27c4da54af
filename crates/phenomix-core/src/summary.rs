//! Structured per-source phenotype summaries returned by the language model.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::Source;

/// Name placeholder the model uses when it cannot name the phenotype.
pub const UNKNOWN_NAME: &str = "Unknown";

/// One summary per source; empty where the source had no data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhenotypeSummary {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sentinel_summary: String,
    #[serde(default)]
    pub cprd_summary: String,
    #[serde(default)]
    pub hdruk_summary: String,
    #[serde(default)]
    pub ohdsi_summary: String,
    #[serde(default)]
    pub phekb_summary: String,
}

impl PhenotypeSummary {
    /// Parse the model's reply, tolerating code fences and surrounding prose.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        let json_str = extract_json(raw);
        if json_str.is_empty() {
            return Err(CoreError::MalformedSummary {
                reason: "empty response".to_string(),
                raw: raw.to_string(),
            });
        }

        serde_json::from_str(&json_str).map_err(|e| CoreError::MalformedSummary {
            reason: e.to_string(),
            raw: raw.to_string(),
        })
    }

    /// Summary text for a source, `None` when empty.
    pub fn for_source(&self, source: Source) -> Option<&str> {
        let text = match source {
            Source::Sentinel => &self.sentinel_summary,
            Source::Hdruk => &self.hdruk_summary,
            Source::Cprd => &self.cprd_summary,
            Source::Ohdsi => &self.ohdsi_summary,
            Source::Phekb => &self.phekb_summary,
        };
        Some(text.trim()).filter(|t| !t.is_empty())
    }

    /// The phenotype name, unless blank or the placeholder.
    pub fn known_name(&self) -> Option<&str> {
        let name = self.name.trim();
        if name.is_empty() || name == UNKNOWN_NAME {
            None
        } else {
            Some(name)
        }
    }
}

/// Extract JSON from a string that might be wrapped in markdown code blocks.
pub fn extract_json(text: &str) -> String {
    let trimmed = text.trim();

    if let Some(start) = trimmed.find("```json") {
        let after_marker = &trimmed[start + 7..];
        if let Some(end) = after_marker.find("```") {
            return after_marker[..end].trim().to_string();
        }
    }

    if let Some(start) = trimmed.find("```") {
        let after_marker = &trimmed[start + 3..];
        if let Some(end) = after_marker.find("```") {
            return after_marker[..end].trim().to_string();
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if end > start {
            return trimmed[start..=end].to_string();
        }
    }

    trimmed.to_string()
}

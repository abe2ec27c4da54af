//! Cross-database phenotype master records.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CoreError, CoreResult};
use crate::literal;
use crate::quality::DataQualityIssue;
use crate::Source;

/// Number of leading ID characters that encode source presence.
pub const PRESENCE_PREFIX_LEN: usize = 5;

/// Global phenotype identifier, e.g. `XHCOP0159`.
///
/// The first five characters flag presence in Sentinel, HDRUK, CPRD, OHDSI
/// and PheKB respectively (`S`, `H`, `C`, `O`, `P`, case-insensitive); any
/// other character marks the source absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhenotypeId(String);

impl PhenotypeId {
    /// Validate and wrap an identifier.
    pub fn parse(id: &str) -> CoreResult<Self> {
        let id = id.trim();
        if id.chars().count() < PRESENCE_PREFIX_LEN {
            return Err(CoreError::InvalidPhenotypeId(id.to_string()));
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the ID marks `source` as present.
    pub fn has_source(&self, source: Source) -> bool {
        self.0
            .chars()
            .nth(source.position())
            .map_or(false, |c| c.to_ascii_lowercase() == source.marker())
    }

    /// Present sources in identifier order.
    pub fn sources(&self) -> Vec<Source> {
        Source::ALL
            .into_iter()
            .filter(|s| self.has_source(*s))
            .collect()
    }
}

impl fmt::Display for PhenotypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PhenotypeId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PhenotypeId> for String {
    fn from(id: PhenotypeId) -> Self {
        id.0
    }
}

/// Decoded HDRUK reference.
///
/// One phenotype may map to several HDRUK phenotype versions, so the
/// reference is stored as a stringified list.
#[derive(Debug, Clone, PartialEq)]
pub enum HdrukRef {
    /// No reference stored.
    Absent,
    /// Decoded PIDs (possibly empty).
    Pids(Vec<String>),
    /// A reference was stored but could not be decoded.
    Unparseable { raw: String, reason: String },
}

impl HdrukRef {
    /// Decode a raw `hdruk_PID` property value.
    pub fn decode(raw: Option<&str>) -> Self {
        let raw = match raw.map(str::trim) {
            None | Some("") => return Self::Absent,
            Some(raw) => raw,
        };

        match literal::parse_list(raw) {
            Ok(items) => {
                let mut pids = Vec::with_capacity(items.len());
                for item in &items {
                    match literal::scalar_text(item) {
                        Some(pid) if !pid.trim().is_empty() => pids.push(pid.trim().to_string()),
                        Some(_) => {}
                        None => {
                            return Self::Unparseable {
                                raw: raw.to_string(),
                                reason: format!("unexpected list element {}", item),
                            }
                        }
                    }
                }
                Self::Pids(pids)
            }
            Err(e) => Self::Unparseable {
                raw: raw.to_string(),
                reason: e.to_string(),
            },
        }
    }

    /// PIDs to look up; empty for absent or unparseable references.
    pub fn pids(&self) -> &[String] {
        match self {
            Self::Pids(pids) => pids,
            _ => &[],
        }
    }
}

/// A phenotype master record (`phenotype` node).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phenotype {
    pub id: PhenotypeId,
    pub name: String,
    #[serde(default)]
    pub sentinel_pid: Option<String>,
    #[serde(default)]
    pub hdruk_pid: Option<String>,
    #[serde(default)]
    pub cprd_pid: Option<String>,
    #[serde(default)]
    pub ohdsi_pid: Option<String>,
    #[serde(default)]
    pub phekb_pid: Option<String>,
}

/// Detail lookups derived from a phenotype's references.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailPlan {
    /// `(source, PID)` pairs in source order; HDRUK may contribute several.
    pub lookups: Vec<(Source, String)>,
    pub issues: Vec<DataQualityIssue>,
}

impl Phenotype {
    /// Create a phenotype with no source references.
    pub fn new(id: PhenotypeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            sentinel_pid: None,
            hdruk_pid: None,
            cprd_pid: None,
            ohdsi_pid: None,
            phekb_pid: None,
        }
    }

    /// Builder-style setter for one source's raw reference.
    pub fn with_reference(mut self, source: Source, raw: impl Into<String>) -> Self {
        let raw = Some(raw.into());
        match source {
            Source::Sentinel => self.sentinel_pid = raw,
            Source::Hdruk => self.hdruk_pid = raw,
            Source::Cprd => self.cprd_pid = raw,
            Source::Ohdsi => self.ohdsi_pid = raw,
            Source::Phekb => self.phekb_pid = raw,
        }
        self
    }

    /// Raw stored reference for a source, blank values treated as absent.
    pub fn raw_reference(&self, source: Source) -> Option<&str> {
        let raw = match source {
            Source::Sentinel => &self.sentinel_pid,
            Source::Hdruk => &self.hdruk_pid,
            Source::Cprd => &self.cprd_pid,
            Source::Ohdsi => &self.ohdsi_pid,
            Source::Phekb => &self.phekb_pid,
        };
        raw.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Case-insensitive substring match between this phenotype's name and
    /// already-lowercased `text_lower`.
    ///
    /// Matches when the name occurs in the text (answer text mentioning a
    /// phenotype) or when the whole text occurs in the name (a short query
    /// such as "diabetes").
    pub fn matches_text(&self, text_lower: &str) -> bool {
        let name = self.name.trim().to_lowercase();
        let text = text_lower.trim();
        if name.is_empty() || text.is_empty() {
            return false;
        }
        text.contains(&name) || name.contains(text)
    }

    /// Work out which detail records to fetch.
    ///
    /// A reference is honored only when the ID flags its source present.
    pub fn detail_plan(&self) -> DetailPlan {
        let mut plan = DetailPlan::default();

        for source in Source::ALL {
            let Some(raw) = self.raw_reference(source) else {
                continue;
            };

            if !self.id.has_source(source) {
                warn!(phenotype = %self.id, %source, "Reference present for unflagged source");
                plan.issues.push(DataQualityIssue::UnflaggedReference {
                    phenotype_id: self.id.to_string(),
                    source,
                    pid: raw.to_string(),
                });
                continue;
            }

            match source {
                Source::Hdruk => match HdrukRef::decode(Some(raw)) {
                    HdrukRef::Pids(pids) => {
                        plan.lookups.extend(pids.into_iter().map(|pid| (source, pid)));
                    }
                    HdrukRef::Unparseable { raw, reason } => {
                        warn!(phenotype = %self.id, %raw, "Unparseable HDRUK reference");
                        plan.issues.push(DataQualityIssue::UnparseableReference {
                            phenotype_id: self.id.to_string(),
                            source,
                            raw,
                            reason,
                        });
                    }
                    HdrukRef::Absent => {}
                },
                _ => plan.lookups.push((source, raw.to_string())),
            }
        }

        plan
    }
}

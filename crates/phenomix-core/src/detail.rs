//! Per-source detail records.
//!
//! Each source describes a phenotype definition differently, so each gets
//! its own record type. Declared fields follow the schema descriptor;
//! anything else lands in `extra` with stringified lists expanded.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::lenient;
use crate::literal;
use crate::{Properties, Source};

/// Sentinel outcome definition (`sentinel_detail`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentinelDetail {
    #[serde(rename = "PID", deserialize_with = "lenient::required_id")]
    pub pid: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub outcome: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub algorithm_to_define_outcome: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub query_start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub query_end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub request_send_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub request_id: Vec<String>,
    #[serde(flatten)]
    pub extra: Properties,
}

/// HDRUK phenotype version (`hdruk_detail`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HdrukDetail {
    #[serde(rename = "PID", deserialize_with = "lenient::required_id")]
    pub pid: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub phenotype_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub phenotype_version_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub definition: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub owner: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient::text_list")]
    pub kind: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub sex: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub coding_system: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub data_sources: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub collections: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub event_date_start: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub event_date_end: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub created: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub updated: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub world_access: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub group_access: Option<i64>,
    #[serde(default, deserialize_with = "lenient::value_list")]
    pub publications: Vec<Value>,
    #[serde(flatten)]
    pub extra: Properties,
}

/// CPRD disease definition (`cprd_detail`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CprdDetail {
    #[serde(rename = "PID", deserialize_with = "lenient::required_id")]
    pub pid: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub disease: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub disease_num: Option<i64>,
    #[serde(flatten)]
    pub extra: Properties,
}

/// OHDSI cohort definition (`ohdsi_detail`).
///
/// Only the descriptive fields are declared; the many `criteriaLocation*`
/// and `domain*` indicator columns stay in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OhdsiDetail {
    #[serde(rename = "PID", deserialize_with = "lenient::required_id")]
    pub pid: String,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub cohort_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub cohort_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub cohort_name_formatted: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub logic_description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub exit_strategy: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub librarian: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub ohdsi_forum_post: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub created_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub modified_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub is_reference_cohort: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub number_of_concept_sets: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub hash_tag: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub contributors: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub contributor_organizations: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub domains_in_entry_events: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub recommended_referent_concept_ids: Vec<String>,
    #[serde(flatten)]
    pub extra: Properties,
}

/// PheKB phenotype (`phekb_detail`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhekbDetail {
    #[serde(rename = "PID", deserialize_with = "lenient::required_id")]
    pub pid: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub phenotype_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub type_of_phenotype: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub date_created: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub genders: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub races: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub ages: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub authors: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub files: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub phenotype_attributes: Vec<String>,
    #[serde(flatten)]
    pub extra: Properties,
}

/// A detail record, tagged by source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum Detail {
    Sentinel(SentinelDetail),
    Hdruk(HdrukDetail),
    Cprd(CprdDetail),
    Ohdsi(OhdsiDetail),
    Phekb(PhekbDetail),
}

impl Detail {
    /// Validate a node's properties against the record shape for `source`.
    pub fn from_properties(source: Source, properties: Properties) -> CoreResult<Self> {
        let value = Value::Object(properties.into_iter().collect());
        let malformed = |e: serde_json::Error| CoreError::malformed(source, e.to_string());

        let mut detail = match source {
            Source::Sentinel => Detail::Sentinel(serde_json::from_value(value).map_err(malformed)?),
            Source::Hdruk => Detail::Hdruk(serde_json::from_value(value).map_err(malformed)?),
            Source::Cprd => Detail::Cprd(serde_json::from_value(value).map_err(malformed)?),
            Source::Ohdsi => Detail::Ohdsi(serde_json::from_value(value).map_err(malformed)?),
            Source::Phekb => Detail::Phekb(serde_json::from_value(value).map_err(malformed)?),
        };
        expand_stringified(detail.extra_mut());
        Ok(detail)
    }

    pub fn source(&self) -> Source {
        match self {
            Detail::Sentinel(_) => Source::Sentinel,
            Detail::Hdruk(_) => Source::Hdruk,
            Detail::Cprd(_) => Source::Cprd,
            Detail::Ohdsi(_) => Source::Ohdsi,
            Detail::Phekb(_) => Source::Phekb,
        }
    }

    pub fn pid(&self) -> &str {
        match self {
            Detail::Sentinel(d) => &d.pid,
            Detail::Hdruk(d) => &d.pid,
            Detail::Cprd(d) => &d.pid,
            Detail::Ohdsi(d) => &d.pid,
            Detail::Phekb(d) => &d.pid,
        }
    }

    /// Best human-readable title for the record.
    pub fn title(&self) -> Option<&str> {
        match self {
            Detail::Sentinel(d) => d.outcome.as_deref().or(d.title.as_deref()),
            Detail::Hdruk(d) => d.name.as_deref(),
            Detail::Cprd(d) => d.disease.as_deref(),
            Detail::Ohdsi(d) => d.cohort_name_formatted.as_deref().or(d.cohort_name.as_deref()),
            Detail::Phekb(d) => d.name.as_deref(),
        }
    }

    /// Undeclared properties.
    pub fn extra(&self) -> &Properties {
        match self {
            Detail::Sentinel(d) => &d.extra,
            Detail::Hdruk(d) => &d.extra,
            Detail::Cprd(d) => &d.extra,
            Detail::Ohdsi(d) => &d.extra,
            Detail::Phekb(d) => &d.extra,
        }
    }

    fn extra_mut(&mut self) -> &mut Properties {
        match self {
            Detail::Sentinel(d) => &mut d.extra,
            Detail::Hdruk(d) => &mut d.extra,
            Detail::Cprd(d) => &mut d.extra,
            Detail::Ohdsi(d) => &mut d.extra,
            Detail::Phekb(d) => &mut d.extra,
        }
    }

    /// All non-empty properties keyed by their graph property names.
    pub fn display_properties(&self) -> Properties {
        let value = match self {
            Detail::Sentinel(d) => serde_json::to_value(d),
            Detail::Hdruk(d) => serde_json::to_value(d),
            Detail::Cprd(d) => serde_json::to_value(d),
            Detail::Ohdsi(d) => serde_json::to_value(d),
            Detail::Phekb(d) => serde_json::to_value(d),
        };

        match value {
            Ok(Value::Object(map)) => map
                .into_iter()
                .filter(|(_, v)| !is_empty_value(v))
                .collect(),
            _ => Properties::new(),
        }
    }
}

fn expand_stringified(properties: &mut Properties) {
    for value in properties.values_mut() {
        if let Some(decoded) = literal::decode_stringified(value) {
            *value = decoded;
        }
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

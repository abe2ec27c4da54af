//! The five phenotype databases federated by the graph.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A phenotype source database.
///
/// Variants are declared in identifier-position order: character `i` of a
/// phenotype ID marks presence of `Source::ALL[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Sentinel,
    Hdruk,
    Cprd,
    Ohdsi,
    Phekb,
}

impl Source {
    /// All sources, ordered by their position in a phenotype ID.
    pub const ALL: [Source; 5] = [
        Source::Sentinel,
        Source::Hdruk,
        Source::Cprd,
        Source::Ohdsi,
        Source::Phekb,
    ];

    /// Position of this source's presence marker within a phenotype ID.
    pub fn position(&self) -> usize {
        match self {
            Source::Sentinel => 0,
            Source::Hdruk => 1,
            Source::Cprd => 2,
            Source::Ohdsi => 3,
            Source::Phekb => 4,
        }
    }

    /// Lowercase marker character that flags presence at `position()`.
    pub fn marker(&self) -> char {
        match self {
            Source::Sentinel => 's',
            Source::Hdruk => 'h',
            Source::Cprd => 'c',
            Source::Ohdsi => 'o',
            Source::Phekb => 'p',
        }
    }

    /// Human-facing name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Source::Sentinel => "Sentinel",
            Source::Hdruk => "HDRUK",
            Source::Cprd => "CPRD",
            Source::Ohdsi => "OHDSI",
            Source::Phekb => "PheKB",
        }
    }

    /// Lowercase key used in labels and property names.
    pub fn key(&self) -> &'static str {
        match self {
            Source::Sentinel => "sentinel",
            Source::Hdruk => "hdruk",
            Source::Cprd => "cprd",
            Source::Ohdsi => "ohdsi",
            Source::Phekb => "phekb",
        }
    }

    /// Neo4j label of this source's detail nodes.
    pub fn detail_label(&self) -> &'static str {
        match self {
            Source::Sentinel => "sentinel_detail",
            Source::Hdruk => "hdruk_detail",
            Source::Cprd => "cprd_detail",
            Source::Ohdsi => "ohdsi_detail",
            Source::Phekb => "phekb_detail",
        }
    }

    /// Neo4j label of this source's concept nodes. HDRUK has none.
    pub fn concept_label(&self) -> Option<&'static str> {
        match self {
            Source::Sentinel => Some("sentinel_concept"),
            Source::Hdruk => None,
            Source::Cprd => Some("cprd_concept"),
            Source::Ohdsi => Some("ohdsi_concept"),
            Source::Phekb => Some("phekb_concept"),
        }
    }

    /// Property on the `phenotype` node holding this source's PID reference.
    pub fn pid_property(&self) -> &'static str {
        match self {
            Source::Sentinel => "sentinel_PID",
            Source::Hdruk => "hdruk_PID",
            Source::Cprd => "cprd_PID",
            Source::Ohdsi => "ohdsi_PID",
            Source::Phekb => "phekb_PID",
        }
    }

    /// Whether this source links its details to concept nodes.
    pub fn has_concepts(&self) -> bool {
        self.concept_label().is_some()
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Source {
    type Err = CoreError;

    /// Parse from string (case-insensitive, accepts labels too).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let key = lower
            .strip_suffix("_detail")
            .or_else(|| lower.strip_suffix("_concept"))
            .unwrap_or(&lower);
        match key {
            "sentinel" => Ok(Source::Sentinel),
            "hdruk" => Ok(Source::Hdruk),
            "cprd" => Ok(Source::Cprd),
            "ohdsi" => Ok(Source::Ohdsi),
            "phekb" => Ok(Source::Phekb),
            _ => Err(CoreError::UnknownSource(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_follow_declaration_order() {
        for (i, source) in Source::ALL.iter().enumerate() {
            assert_eq!(source.position(), i);
        }
    }

    #[test]
    fn test_hdruk_has_no_concepts() {
        assert!(!Source::Hdruk.has_concepts());
        assert_eq!(
            Source::ALL.iter().filter(|s| s.has_concepts()).count(),
            4
        );
    }

    #[test]
    fn test_parse_accepts_labels() {
        assert_eq!("PheKB".parse::<Source>().unwrap(), Source::Phekb);
        assert_eq!("cprd_detail".parse::<Source>().unwrap(), Source::Cprd);
        assert_eq!("ohdsi_concept".parse::<Source>().unwrap(), Source::Ohdsi);
        assert!("medline".parse::<Source>().is_err());
    }
}

//! Parameterized Cypher lookups.
//!
//! Labels are interpolated only from [`phenomix_core::Source`]; every value
//! coming from a phenotype record or user input is bound as a parameter.

pub mod concepts;
pub mod details;
pub mod generated;
pub mod introspect;
pub mod phenotypes;
pub mod related;

use serde::Serialize;
use thiserror::Error;

/// Why a single period record was set aside by the normalizer.
///
/// These never abort a computation. They are collected into
/// `AttainmentResult::rejected_records` so the caller can surface them.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RecordIssue {
    #[error("Invalid competency '{label}': expected DD/MM/YYYY or MM/YYYY")]
    InvalidCompetency { label: String },

    #[error("Record has no competency")]
    MissingCompetency,

    #[error("Record for competency '{label}' has no target")]
    MissingTarget { label: String },

    #[error("Record for competency '{label}' has a non-finite {field}")]
    NonFiniteValue { label: String, field: String },

    #[error("Duplicate competency {competency}: an earlier record already covers it")]
    DuplicateCompetency { competency: String },

    #[error("Competency {competency} is outside reference year {reference_year}")]
    OutsideReferenceYear {
        competency: String,
        reference_year: i32,
    },
}

#[derive(Error, Debug)]
pub enum AttainmentError {
    #[error(transparent)]
    InvalidRecord(#[from] RecordIssue),

    #[error("Series '{0}' has no valid periods")]
    EmptySeries(String),

    #[error("Indicator '{indicator}' has conflicting {field} across rows")]
    ConflictingMetadata { indicator: String, field: String },

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AttainmentError>;

use crate::error::RecordIssue;
use crate::schema::{Competency, PeriodRecord};
use crate::utils::parse_competency;
use log::warn;
use serde::Serialize;
use std::collections::BTreeSet;

/// A record that passed validation, keyed by its parsed competency.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPeriod {
    pub competency: Competency,
    pub target: f64,
    pub actual: Option<f64>,
    pub active: bool,
}

impl NormalizedPeriod {
    pub fn is_measured(&self) -> bool {
        self.actual.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRecord {
    /// Position of the record in the input array
    pub index: usize,
    /// Raw competency label, absent when the record had none
    pub label: Option<String>,
    pub issue: RecordIssue,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSeries {
    /// Valid periods in ascending chronological order
    pub periods: Vec<NormalizedPeriod>,
    pub rejected: Vec<RejectedRecord>,
}

/// Validates raw records and orders the valid ones chronologically.
///
/// Invalid records are set aside with the reason they failed instead of being
/// given a placeholder key. When two records share a competency, the first one in
/// input order is kept. If `reference_year` is set, records of any other year are
/// rejected.
pub fn normalize(records: &[PeriodRecord], reference_year: Option<i32>) -> NormalizedSeries {
    let mut series = NormalizedSeries::default();
    let mut seen: BTreeSet<Competency> = BTreeSet::new();

    for (index, record) in records.iter().enumerate() {
        let outcome = validate_record(record, reference_year).and_then(|period| {
            if seen.insert(period.competency) {
                Ok(period)
            } else {
                Err(RecordIssue::DuplicateCompetency {
                    competency: period.competency.to_string(),
                })
            }
        });

        match outcome {
            Ok(period) => series.periods.push(period),
            Err(issue) => {
                warn!(
                    "Rejecting record #{} ('{}'): {}",
                    index,
                    record.competency.as_deref().unwrap_or("<missing>"),
                    issue
                );
                series.rejected.push(RejectedRecord {
                    index,
                    label: record.competency.clone(),
                    issue,
                });
            }
        }
    }

    series.periods.sort_by_key(|p| p.competency.key());
    series
}

fn validate_record(
    record: &PeriodRecord,
    reference_year: Option<i32>,
) -> Result<NormalizedPeriod, RecordIssue> {
    let label = record
        .competency
        .as_deref()
        .ok_or(RecordIssue::MissingCompetency)?;
    let competency = parse_competency(label)?;

    let target = record.target.ok_or_else(|| RecordIssue::MissingTarget {
        label: label.to_string(),
    })?;

    if !target.is_finite() {
        return Err(RecordIssue::NonFiniteValue {
            label: label.to_string(),
            field: "target".to_string(),
        });
    }

    if record.actual.is_some_and(|a| !a.is_finite()) {
        return Err(RecordIssue::NonFiniteValue {
            label: label.to_string(),
            field: "actual".to_string(),
        });
    }

    if let Some(year) = reference_year {
        if competency.year() != year {
            return Err(RecordIssue::OutsideReferenceYear {
                competency: competency.to_string(),
                reference_year: year,
            });
        }
    }

    Ok(NormalizedPeriod {
        competency,
        target,
        actual: record.actual,
        active: record.active,
    })
}

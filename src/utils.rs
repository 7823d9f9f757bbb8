use crate::error::RecordIssue;
use crate::schema::Competency;
use chrono::{Datelike, NaiveDate};

/// Parses a competency label in the format "DD/MM/YYYY" or "MM/YYYY".
///
/// The day, when present, must exist in that month. The year must have four digits.
pub fn parse_competency(label: &str) -> Result<Competency, RecordIssue> {
    let invalid = || RecordIssue::InvalidCompetency {
        label: label.to_string(),
    };

    let trimmed = label.trim();
    let parts: Vec<&str> = trimmed.split('/').collect();

    if !has_competency_shape(&parts) {
        return Err(invalid());
    }

    let date = match parts.len() {
        // Full date: "15/03/2024"
        3 => NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"),
        // Month only: "03/2024"
        2 => NaiveDate::parse_from_str(&format!("01/{}", trimmed), "%d/%m/%Y"),
        _ => return Err(invalid()),
    }
    .map_err(|_| invalid())?;

    Competency::new(date.year(), date.month()).ok_or_else(invalid)
}

fn has_competency_shape(parts: &[&str]) -> bool {
    let Some((year, leading)) = parts.split_last() else {
        return false;
    };

    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

    matches!(parts.len(), 2 | 3)
        && year.len() == 4
        && all_digits(year)
        && leading.iter().all(|p| p.len() <= 2 && all_digits(p))
}

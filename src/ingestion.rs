use crate::error::{AttainmentError, Result};
use crate::schema::{
    default_active, AggregationMode, IndicatorSeries, PeriodRecord, TrendPolarity,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One spreadsheet row: a single month of a single indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorRow {
    pub indicator: String,
    pub competency: String,
    #[serde(default)]
    pub target: Option<f64>,
    #[serde(default)]
    pub actual: Option<f64>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub trend_polarity: TrendPolarity,
    pub aggregation_mode: AggregationMode,
}

/// Groups flat rows into one series per indicator name.
///
/// Polarity and aggregation mode are properties of the indicator, so rows of the
/// same indicator that disagree on either are an error.
pub fn group_rows(rows: &[IndicatorRow]) -> Result<BTreeMap<String, IndicatorSeries>> {
    let mut indicators: BTreeMap<String, IndicatorSeries> = BTreeMap::new();

    for row in rows {
        let series = indicators
            .entry(row.indicator.clone())
            .or_insert_with(|| {
                IndicatorSeries::new(row.trend_polarity, row.aggregation_mode, Vec::new())
                    .named(row.indicator.clone())
            });

        if series.trend_polarity != row.trend_polarity {
            return Err(AttainmentError::ConflictingMetadata {
                indicator: row.indicator.clone(),
                field: "trendPolarity".to_string(),
            });
        }

        if series.aggregation_mode != row.aggregation_mode {
            return Err(AttainmentError::ConflictingMetadata {
                indicator: row.indicator.clone(),
                field: "aggregationMode".to_string(),
            });
        }

        series.periods.push(PeriodRecord {
            competency: Some(row.competency.clone()),
            target: row.target,
            actual: row.actual,
            active: row.active,
        });
    }

    Ok(indicators)
}

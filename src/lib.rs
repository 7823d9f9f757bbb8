//! # KPI Attainment
//!
//! A library for computing goal attainment of KPI indicators from monthly
//! target/actual series, as shown on management dashboards.
//!
//! ## Core Concepts
//!
//! - **Competency**: the calendar month a target and (possibly absent) actual belong to
//! - **Attainment**: actual / target as a percentage, inverted for lower-is-better indicators
//! - **Aggregation Mode**: how the year is summarized (Evolution, Average, Accumulated)
//! - **Partial Attainment**: attainment through the latest measured period
//! - **Annual Attainment**: the to-date actual against the full-year target horizon
//! - **Not Computable**: `None`, for ratios that are undefined (e.g. a zero target)
//!
//! ## Example
//!
//! ```rust
//! use kpi_attainment::*;
//!
//! let series = IndicatorSeries::new(
//!     TrendPolarity::HigherIsBetter,
//!     AggregationMode::Accumulated,
//!     vec![
//!         PeriodRecord::new("01/2024", 10.0, Some(10.0)),
//!         PeriodRecord::new("02/2024", 10.0, Some(5.0)),
//!         PeriodRecord::new("03/2024", 10.0, None),
//!     ],
//! );
//!
//! let result = compute_attainment(&series);
//! assert!((result.partial.unwrap() - 75.0).abs() < 1e-9);
//! assert!((result.annual.unwrap() - 50.0).abs() < 1e-9);
//! assert_eq!(result.year_headline_value, 15.0);
//! ```

pub mod aggregator;
pub mod attainment;
pub mod engine;
pub mod error;
pub mod inactivation;
pub mod ingestion;
pub mod normalizer;
pub mod schema;
pub mod utils;

pub use aggregator::{Aggregator, Horizon};
pub use attainment::{ratio, Attainment};
pub use engine::{process_series, HorizonProjector, Projection};
pub use error::{AttainmentError, RecordIssue, Result};
pub use inactivation::{FilteredSeries, InactivationFilter};
pub use ingestion::*;
pub use normalizer::{normalize, NormalizedPeriod, NormalizedSeries, RejectedRecord};
pub use schema::*;
pub use utils::*;

use log::{debug, info};
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything the dashboard needs to render one indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttainmentResult {
    /// Attainment of every valid period, in chronological order. Inactive periods are `None`.
    pub per_period: BTreeMap<Competency, Attainment>,
    pub partial: Attainment,
    pub annual: Attainment,
    /// Raw year figure: latest actual, mean actual, or summed actuals depending on the mode
    pub year_headline_value: f64,
    pub average_attainment: f64,
    pub first_inactive_competency: Option<Competency>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected_records: Vec<RejectedRecord>,
}

pub struct AttainmentProcessor;

impl AttainmentProcessor {
    pub fn process(series: &IndicatorSeries, config: &EngineConfig) -> Result<AttainmentResult> {
        config.validate()?;
        Ok(Self::run(series, config))
    }

    /// Logs and computes one series under an already validated configuration.
    fn run(series: &IndicatorSeries, config: &EngineConfig) -> AttainmentResult {
        info!(
            "Computing attainment for indicator {} ({:?}, {:?})",
            series.display_name(),
            series.trend_polarity,
            series.aggregation_mode
        );
        debug!(
            "Series contains {} records, inactive policy {:?}",
            series.periods.len(),
            config.inactive_policy
        );

        let result = process_series(series, config);

        if !result.rejected_records.is_empty() {
            info!(
                "Indicator {}: {} record(s) rejected during normalization",
                series.display_name(),
                result.rejected_records.len()
            );
        }

        result
    }

    /// Like [`Self::process`], but a series left without any valid period is an error.
    pub fn process_strict(
        series: &IndicatorSeries,
        config: &EngineConfig,
    ) -> Result<AttainmentResult> {
        let result = Self::process(series, config)?;

        if result.per_period.is_empty() {
            return Err(AttainmentError::EmptySeries(
                series.display_name().to_string(),
            ));
        }

        Ok(result)
    }

    pub fn process_many(
        indicators: &BTreeMap<String, IndicatorSeries>,
        config: &EngineConfig,
    ) -> Result<BTreeMap<String, AttainmentResult>> {
        config.validate()?;

        let mut results = BTreeMap::new();
        for (name, series) in indicators {
            results.insert(name.clone(), Self::process(series, config)?);
        }

        Ok(results)
    }
}

/// Computes attainment with the default configuration.
pub fn compute_attainment(series: &IndicatorSeries) -> AttainmentResult {
    AttainmentProcessor::run(series, &EngineConfig::default())
}

pub fn compute_attainment_with_config(
    series: &IndicatorSeries,
    config: &EngineConfig,
) -> Result<AttainmentResult> {
    AttainmentProcessor::process(series, config)
}

pub fn compute_attainment_strict(
    series: &IndicatorSeries,
    config: &EngineConfig,
) -> Result<AttainmentResult> {
    AttainmentProcessor::process_strict(series, config)
}

/// Parses an `IndicatorSeries` JSON payload and computes it with the default configuration.
pub fn compute_from_json(json: &str) -> Result<AttainmentResult> {
    let series = IndicatorSeries::from_json(json)?;
    AttainmentProcessor::process(&series, &EngineConfig::default())
}

pub fn process_indicators(
    indicators: &BTreeMap<String, IndicatorSeries>,
    config: &EngineConfig,
) -> Result<BTreeMap<String, AttainmentResult>> {
    AttainmentProcessor::process_many(indicators, config)
}

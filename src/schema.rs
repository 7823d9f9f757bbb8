use crate::error::{AttainmentError, RecordIssue, Result};
use crate::utils::parse_competency;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TrendPolarity {
    #[schemars(description = "Larger actual values are better (sales, margin, NPS). Attainment = actual / target.")]
    HigherIsBetter,

    #[schemars(description = "Smaller actual values are better (cost, defects, lead time). Attainment = target / actual.")]
    LowerIsBetter,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    #[schemars(description = "The year is summarized by the latest measured period.")]
    Evolution,

    #[schemars(description = "The year is summarized by the mean of the measured periods.")]
    Average,

    #[schemars(description = "Targets and actuals are summed over the horizon before the ratio is taken.")]
    Accumulated,
}

/// How inactive periods take part in the horizons used for aggregation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InactivePolicy {
    /// Inactive periods are dropped from the working series.
    #[default]
    Exclude,
    /// Inactive periods stay in place with a zero target and no actual.
    ZeroTarget,
    /// Inactive periods stay in place with their own target and no actual.
    IncludeTarget,
}

/// A calendar month. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Competency {
    year: i32,
    month: u32,
}

impl Competency {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Sortable integer key, `year * 100 + month`.
    pub fn key(&self) -> i32 {
        self.year * 100 + self.month as i32
    }
}

impl fmt::Display for Competency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

impl FromStr for Competency {
    type Err = AttainmentError;

    fn from_str(label: &str) -> Result<Self> {
        Ok(parse_competency(label)?)
    }
}

impl TryFrom<String> for Competency {
    type Error = RecordIssue;

    fn try_from(label: String) -> std::result::Result<Self, Self::Error> {
        parse_competency(&label)
    }
}

impl From<Competency> for String {
    fn from(competency: Competency) -> Self {
        competency.to_string()
    }
}

pub(crate) fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRecord {
    #[serde(default)]
    #[schemars(description = "Calendar month of the record, as DD/MM/YYYY or MM/YYYY (e.g. '01/03/2024' or '03/2024'). Required: records without it are rejected.")]
    pub competency: Option<String>,

    #[serde(default)]
    #[schemars(description = "The goal for the period ('meta'). Required: records without it are rejected.")]
    pub target: Option<f64>,

    #[serde(default)]
    #[schemars(description = "The measured result ('resultado'), or null when not measured yet.")]
    pub actual: Option<f64>,

    #[serde(default = "default_active")]
    #[schemars(description = "False once the indicator has been deactivated for this period. Defaults to true.")]
    pub active: bool,
}

impl PeriodRecord {
    pub fn new(competency: impl Into<String>, target: f64, actual: Option<f64>) -> Self {
        Self {
            competency: Some(competency.into()),
            target: Some(target),
            actual,
            active: true,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSeries {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Optional indicator name, used in logs and batch output.")]
    pub name: Option<String>,

    #[schemars(description = "Whether higher or lower actual values represent better performance.")]
    pub trend_polarity: TrendPolarity,

    #[schemars(description = "Rule used to turn the monthly series into year-level figures.")]
    pub aggregation_mode: AggregationMode,

    #[schemars(description = "Monthly records. Order is irrelevant; competencies must be unique.")]
    pub periods: Vec<PeriodRecord>,
}

impl IndicatorSeries {
    pub fn new(
        trend_polarity: TrendPolarity,
        aggregation_mode: AggregationMode,
        periods: Vec<PeriodRecord>,
    ) -> Self {
        Self {
            name: None,
            trend_polarity,
            aggregation_mode,
            periods,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(IndicatorSeries)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    #[serde(default)]
    #[schemars(description = "How inactive periods count toward target sums and the annual horizon.")]
    pub inactive_policy: InactivePolicy,

    #[serde(default)]
    #[schemars(description = "When set, only records of this calendar year are projected; others are rejected.")]
    pub reference_year: Option<i32>,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(year) = self.reference_year {
            if NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
                return Err(AttainmentError::InvalidConfig(format!(
                    "reference year {} is out of range",
                    year
                )));
            }
        }
        Ok(())
    }
}

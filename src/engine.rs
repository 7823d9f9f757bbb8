use crate::aggregator::{last_measured, Aggregator, Horizon};
use crate::attainment::Attainment;
use crate::inactivation::InactivationFilter;
use crate::normalizer::{normalize, NormalizedPeriod};
use crate::schema::*;
use crate::AttainmentResult;
use log::debug;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub partial: Attainment,
    pub annual: Attainment,
    pub year_headline_value: f64,
}

impl Projection {
    fn empty() -> Self {
        Self {
            partial: None,
            annual: None,
            year_headline_value: 0.0,
        }
    }
}

/// Runs the aggregator over the to-date and full-year horizons.
pub struct HorizonProjector {
    aggregator: Aggregator,
}

impl HorizonProjector {
    pub fn new(mode: AggregationMode, polarity: TrendPolarity) -> Self {
        Self {
            aggregator: Aggregator::new(mode, polarity),
        }
    }

    /// Everything up to and including the last measured period.
    pub fn partial_horizon(periods: &[NormalizedPeriod]) -> Option<Horizon> {
        last_measured(periods).map(|k| Horizon {
            actual_through: k,
            target_through: k,
        })
    }

    /// Actuals up to the last measured period, targets up to the end of the series.
    pub fn annual_horizon(periods: &[NormalizedPeriod]) -> Option<Horizon> {
        last_measured(periods).map(|k| Horizon {
            actual_through: k,
            target_through: periods.len() - 1,
        })
    }

    pub fn project(&self, periods: &[NormalizedPeriod]) -> Projection {
        let (Some(partial_horizon), Some(annual_horizon)) = (
            Self::partial_horizon(periods),
            Self::annual_horizon(periods),
        ) else {
            debug!("No measured period; projection is empty");
            return Projection::empty();
        };

        debug!(
            "Projecting {:?} over {} periods: partial {:?}, annual {:?}",
            self.aggregator.mode(),
            periods.len(),
            partial_horizon,
            annual_horizon
        );

        Projection {
            partial: self.aggregator.aggregate(periods, partial_horizon),
            annual: self.aggregator.aggregate(periods, annual_horizon),
            year_headline_value: self.year_headline_value(periods, partial_horizon.actual_through),
        }
    }

    /// Raw (non-percentage) year figure. Always measured "so far", never projected.
    fn year_headline_value(&self, periods: &[NormalizedPeriod], k: usize) -> f64 {
        let measured = periods[..=k].iter().filter_map(|p| p.actual);

        match self.aggregator.mode() {
            AggregationMode::Evolution => periods[k].actual.unwrap_or(0.0),
            AggregationMode::Average => {
                let (sum, count) =
                    measured.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
                if count == 0 {
                    0.0
                } else {
                    sum / count as f64
                }
            }
            AggregationMode::Accumulated => measured.sum(),
        }
    }
}

/// Runs the full pipeline for one indicator.
pub fn process_series(series: &IndicatorSeries, config: &EngineConfig) -> AttainmentResult {
    let normalized = normalize(&series.periods, config.reference_year);
    let filtered = InactivationFilter::new(config.inactive_policy).apply(&normalized.periods);

    let aggregator = Aggregator::new(series.aggregation_mode, series.trend_polarity);
    let per_period: BTreeMap<Competency, Attainment> = normalized
        .periods
        .iter()
        .map(|p| {
            let value = if p.active {
                aggregator.attainment_of(p)
            } else {
                None
            };
            (p.competency, value)
        })
        .collect();

    let projection = HorizonProjector::new(series.aggregation_mode, series.trend_polarity)
        .project(&filtered.working);

    AttainmentResult {
        per_period,
        partial: projection.partial,
        annual: projection.annual,
        year_headline_value: projection.year_headline_value,
        average_attainment: aggregator.average(&filtered.active),
        first_inactive_competency: filtered.first_inactive(),
        rejected_records: normalized.rejected,
    }
}

use crate::attainment::{ratio, Attainment};
use crate::normalizer::NormalizedPeriod;
use crate::schema::{AggregationMode, TrendPolarity};

/// Inclusive index bounds over a chronologically ordered series.
///
/// Actuals are read up to `actual_through` and targets up to `target_through`.
/// The two differ for the annual horizon, where a to-date actual is compared
/// with the full-year target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon {
    pub actual_through: usize,
    pub target_through: usize,
}

/// Index of the last period carrying a measured actual.
pub fn last_measured(periods: &[NormalizedPeriod]) -> Option<usize> {
    periods.iter().rposition(NormalizedPeriod::is_measured)
}

pub struct Aggregator {
    mode: AggregationMode,
    polarity: TrendPolarity,
}

impl Aggregator {
    pub fn new(mode: AggregationMode, polarity: TrendPolarity) -> Self {
        Self { mode, polarity }
    }

    pub fn mode(&self) -> AggregationMode {
        self.mode
    }

    pub fn attainment_of(&self, period: &NormalizedPeriod) -> Attainment {
        ratio(period.target, period.actual, self.polarity)
    }

    pub fn per_period(&self, periods: &[NormalizedPeriod]) -> Vec<Attainment> {
        periods.iter().map(|p| self.attainment_of(p)).collect()
    }

    /// Attainment of the latest measured period.
    pub fn evolution(&self, periods: &[NormalizedPeriod]) -> Attainment {
        last_measured(periods).and_then(|k| self.attainment_of(&periods[k]))
    }

    /// Mean of the computable per-period attainments, `0.0` when there are none.
    pub fn average(&self, periods: &[NormalizedPeriod]) -> f64 {
        let (sum, count) = self
            .per_period(periods)
            .into_iter()
            .flatten()
            .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));

        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    /// Ratio of summed actuals to summed targets over `horizon`.
    ///
    /// Raw values are summed first; ratios are never averaged. Not computable when
    /// no period in the actual range has been measured.
    pub fn accumulated(&self, periods: &[NormalizedPeriod], horizon: Horizon) -> Attainment {
        let targets = periods.get(..=horizon.target_through)?;
        let actuals = periods.get(..=horizon.actual_through)?;

        let target_sum: f64 = targets.iter().map(|p| p.target).sum();

        let mut measured = actuals.iter().filter_map(|p| p.actual).peekable();
        measured.peek()?;
        let actual_sum: f64 = measured.sum();

        if !target_sum.is_finite() || !actual_sum.is_finite() {
            return None;
        }

        ratio(target_sum, Some(actual_sum), self.polarity)
    }

    /// Attainment over `horizon` for the configured mode.
    ///
    /// Evolution and Average compare the actual at `actual_through` with the single
    /// target at `target_through`; over a same-period horizon Evolution is the
    /// attainment of the latest measured period in it. Accumulated delegates to
    /// [`Self::accumulated`].
    pub fn aggregate(&self, periods: &[NormalizedPeriod], horizon: Horizon) -> Attainment {
        match self.mode {
            AggregationMode::Evolution if horizon.actual_through == horizon.target_through => {
                self.evolution(periods.get(..=horizon.actual_through)?)
            }
            AggregationMode::Evolution | AggregationMode::Average => {
                let target = periods.get(horizon.target_through)?.target;
                let actual = periods.get(horizon.actual_through)?.actual;
                ratio(target, actual, self.polarity)
            }
            AggregationMode::Accumulated => self.accumulated(periods, horizon),
        }
    }
}

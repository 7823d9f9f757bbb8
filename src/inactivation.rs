use crate::normalizer::NormalizedPeriod;
use crate::schema::{Competency, InactivePolicy};
use log::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredSeries {
    pub active: Vec<NormalizedPeriod>,
    pub inactive: Vec<NormalizedPeriod>,
    /// The series the aggregator runs on. Inactive periods never carry an actual here.
    pub working: Vec<NormalizedPeriod>,
}

impl FilteredSeries {
    pub fn first_inactive(&self) -> Option<Competency> {
        self.inactive.first().map(|p| p.competency)
    }
}

pub struct InactivationFilter {
    policy: InactivePolicy,
}

impl InactivationFilter {
    pub fn new(policy: InactivePolicy) -> Self {
        Self { policy }
    }

    /// Splits a chronologically ordered series into active and inactive periods and
    /// builds the working series according to the configured policy.
    pub fn apply(&self, periods: &[NormalizedPeriod]) -> FilteredSeries {
        let (active, inactive): (Vec<_>, Vec<_>) =
            periods.iter().cloned().partition(|p| p.active);

        let working = match self.policy {
            InactivePolicy::Exclude => active.clone(),
            InactivePolicy::ZeroTarget => periods
                .iter()
                .map(|p| {
                    if p.active {
                        p.clone()
                    } else {
                        NormalizedPeriod {
                            target: 0.0,
                            actual: None,
                            ..p.clone()
                        }
                    }
                })
                .collect(),
            InactivePolicy::IncludeTarget => periods
                .iter()
                .map(|p| {
                    if p.active {
                        p.clone()
                    } else {
                        NormalizedPeriod {
                            actual: None,
                            ..p.clone()
                        }
                    }
                })
                .collect(),
        };

        if !inactive.is_empty() {
            debug!(
                "{} of {} periods inactive (first: {}), policy {:?}",
                inactive.len(),
                periods.len(),
                inactive[0].competency,
                self.policy
            );
        }

        FilteredSeries {
            active,
            inactive,
            working,
        }
    }
}

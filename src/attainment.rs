//! Polarity-aware attainment ratio.
//!
//! Every percentage the engine reports, per period or over summed horizons, is
//! produced by [`ratio`].

use crate::schema::TrendPolarity;

/// Attainment as a percentage, or `None` when the ratio is undefined.
pub type Attainment = Option<f64>;

/// Computes the attainment of `actual` against `target`.
///
/// - No actual: not computable.
/// - `HigherIsBetter`: `actual / target * 100`, not computable when `target == 0`.
/// - `LowerIsBetter`: `target / actual * 100`, not computable when `actual == 0`.
///
/// A quotient that overflows to a non-finite value is also reported as not computable.
pub fn ratio(target: f64, actual: Option<f64>, polarity: TrendPolarity) -> Attainment {
    let actual = actual?;

    let value = match polarity {
        TrendPolarity::HigherIsBetter => {
            if target == 0.0 {
                return None;
            }
            actual / target * 100.0
        }
        TrendPolarity::LowerIsBetter => {
            if actual == 0.0 {
                return None;
            }
            target / actual * 100.0
        }
    };

    value.is_finite().then_some(value)
}

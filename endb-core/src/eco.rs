use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::entities::*;

lazy_static! {
    static ref DEFAULT_ECO_WEIGHTS: HashMap<String, f64> = [
        (METRIC_ENERGY_EFFICIENCY, 0.25),
        (METRIC_WATER_CONSERVATION, 0.20),
        (METRIC_WASTE_REDUCTION, 0.20),
        (METRIC_SUSTAINABLE_MATERIALS, 0.20),
        (METRIC_COMMUNITY_IMPACT, 0.15),
    ]
    .into_iter()
    .map(|(metric, weight)| (metric.to_owned(), weight))
    .collect();
}

pub fn default_eco_weights() -> &'static HashMap<String, f64> {
    &DEFAULT_ECO_WEIGHTS
}

/// Weighted average of named sub-scores, rounded to two decimals.
///
/// Keys without a positive, finite weight are excluded from both the
/// accumulated total and the divisor, i.e. the weights don't need to
/// be normalized. Score values are clamped into `[0.0, 1.0]` before
/// weighting. Without any effectively weighted key the result is `0.0`.
pub fn calculate_eco_rating(
    input: &HashMap<String, f64>,
    weights: &HashMap<String, f64>,
) -> EcoScoreValue {
    // Accumulate in stable key order, float addition is not
    // associative and the map iteration order varies per process.
    let mut metrics: Vec<_> = input.iter().collect();
    metrics.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
    let (total, weight_sum) = metrics
        .into_iter()
        .filter_map(|(metric, &value)| {
            let weight = weights.get(metric).copied().unwrap_or(0.0);
            if weight <= 0.0 || !weight.is_finite() {
                return None;
            }
            let value = f64::from(EcoScoreValue::from(value).clamp());
            Some((value * weight, weight))
        })
        .fold((0.0, 0.0), |(total, weight_sum), (weighted, weight)| {
            (total + weighted, weight_sum + weight)
        });
    if weight_sum == 0.0 {
        return EcoScoreValue::min();
    }
    (((total / weight_sum) * 100.0).round() / 100.0).into()
}

pub trait EcoRated {
    /// Weighted score over the provided metrics with the default weights,
    /// or `None` if no metric has been provided.
    fn eco_rating(&self) -> Option<EcoScoreValue>;
}

impl EcoRated for EcoScores {
    fn eco_rating(&self) -> Option<EcoScoreValue> {
        if self.is_empty() {
            return None;
        }
        Some(calculate_eco_rating(
            &self.to_metric_map(),
            default_eco_weights(),
        ))
    }
}

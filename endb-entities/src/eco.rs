use std::collections::HashMap;

pub const METRIC_ENERGY_EFFICIENCY: &str = "energyEfficiency";
pub const METRIC_WATER_CONSERVATION: &str = "waterConservation";
pub const METRIC_WASTE_REDUCTION: &str = "wasteReduction";
pub const METRIC_SUSTAINABLE_MATERIALS: &str = "sustainableMaterials";
pub const METRIC_COMMUNITY_IMPACT: &str = "communityImpact";

/// Named sustainability sub-metrics of a listing.
///
/// Each value is normalized into `[0.0, 1.0]`. Individual metrics
/// may be absent when the owner has not provided them.
#[rustfmt::skip]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct EcoScores {
    pub energy_efficiency     : Option<f64>,
    pub water_conservation    : Option<f64>,
    pub waste_reduction       : Option<f64>,
    pub sustainable_materials : Option<f64>,
    pub community_impact      : Option<f64>,
}

impl EcoScores {
    pub fn is_empty(&self) -> bool {
        let Self {
            energy_efficiency,
            water_conservation,
            waste_reduction,
            sustainable_materials,
            community_impact,
        } = self;
        energy_efficiency.is_none()
            && water_conservation.is_none()
            && waste_reduction.is_none()
            && sustainable_materials.is_none()
            && community_impact.is_none()
    }

    /// The provided metrics, keyed by their canonical metric names.
    pub fn to_metric_map(&self) -> HashMap<String, f64> {
        let Self {
            energy_efficiency,
            water_conservation,
            waste_reduction,
            sustainable_materials,
            community_impact,
        } = *self;
        [
            (METRIC_ENERGY_EFFICIENCY, energy_efficiency),
            (METRIC_WATER_CONSERVATION, water_conservation),
            (METRIC_WASTE_REDUCTION, waste_reduction),
            (METRIC_SUSTAINABLE_MATERIALS, sustainable_materials),
            (METRIC_COMMUNITY_IMPACT, community_impact),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name.to_owned(), v)))
        .collect()
    }
}

/// Weighted eco score of a listing, in `[0.0, 1.0]`.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct EcoScoreValue(f64);

impl EcoScoreValue {
    pub const fn min() -> Self {
        Self(0.0)
    }

    pub const fn max() -> Self {
        Self(1.0)
    }

    pub fn clamp(self) -> Self {
        Self(self.0.max(Self::min().0).min(Self::max().0))
    }

    pub fn is_valid(self) -> bool {
        self >= Self::min() && self <= Self::max()
    }
}

impl From<f64> for EcoScoreValue {
    fn from(from: f64) -> Self {
        Self(from)
    }
}

impl From<EcoScoreValue> for f64 {
    fn from(from: EcoScoreValue) -> Self {
        from.0
    }
}

//! Producer tiers and their tunable economic constants.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

pub mod registry;
pub use registry::*;

/// Lowest growth the cost curves are evaluated at. Growth 1.0 zeroes the
/// denominator of the cumulative closed form.
pub const GROWTH_FLOOR: f64 = 1.0001;

/// Slider span for cost growth, matching the game's tuning window.
pub const GROWTH_SLIDER_MIN: f64 = 1.0;
pub const GROWTH_SLIDER_MAX: f64 = 1.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProducerTier {
    Interns,
    JuniorDevs,
    SeniorDevs,
}

impl ProducerTier {
    pub const ALL: [ProducerTier; 3] =
        [ProducerTier::Interns, ProducerTier::JuniorDevs, ProducerTier::SeniorDevs];

    pub fn label(self) -> &'static str {
        match self {
            ProducerTier::Interns => "interns",
            ProducerTier::JuniorDevs => "junior devs",
            ProducerTier::SeniorDevs => "senior devs",
        }
    }
}

impl fmt::Display for ProducerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validated constants for one tier. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProducerTierConfig {
    initial_cost: f64,
    cost_growth: f64,
    base_production: f64,
}

impl ProducerTierConfig {
    pub fn new(initial_cost: f64, cost_growth: f64, base_production: f64) -> Result<Self> {
        if !(initial_cost.is_finite() && initial_cost > 0.0) {
            return Err(ConfigError::InitialCost(initial_cost));
        }
        if !(cost_growth.is_finite() && cost_growth > 1.0) {
            return Err(ConfigError::CostGrowth(cost_growth));
        }
        if !(base_production.is_finite() && base_production >= 0.0) {
            return Err(ConfigError::BaseProduction(base_production));
        }
        Ok(Self { initial_cost, cost_growth, base_production })
    }

    pub fn initial_cost(&self) -> f64 {
        self.initial_cost
    }

    pub fn cost_growth(&self) -> f64 {
        self.cost_growth
    }

    pub fn base_production(&self) -> f64 {
        self.base_production
    }
}

/// Closed interval a live parameter may take.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
}

impl ParamRange {
    pub fn new(min: f64, max: f64) -> Option<ParamRange> {
        (min.is_finite() && max.is_finite() && min <= max).then_some(ParamRange { min, max })
    }

    /// `[v / 10, v * 10]`, the conventional window around a default.
    pub fn around(value: f64) -> ParamRange {
        ParamRange { min: value / 10.0, max: value * 10.0 }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Nearest value inside the range; NaN maps to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() { self.min } else { value.clamp(self.min, self.max) }
    }

    /// Overlap with `other`, if any.
    pub fn intersect(&self, other: ParamRange) -> Option<ParamRange> {
        ParamRange::new(self.min.max(other.min), self.max.min(other.max))
    }
}

/// What a binding needs to create one slider-backed parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct LiveParameterSpec {
    pub label: String,
    pub range: ParamRange,
    pub init: f64,
}

impl LiveParameterSpec {
    pub fn new(label: impl Into<String>, range: ParamRange, init: f64) -> LiveParameterSpec {
        LiveParameterSpec { label: label.into(), range, init }
    }

    pub fn validate(&self) -> Result<()> {
        let ParamRange { min, max } = self.range;
        if ParamRange::new(min, max).is_none() {
            return Err(ConfigError::Range { label: self.label.clone(), min, max });
        }
        if !self.range.contains(self.init) {
            return Err(ConfigError::InitialValue {
                label: self.label.clone(),
                value: self.init,
                min,
                max,
            });
        }
        Ok(())
    }
}

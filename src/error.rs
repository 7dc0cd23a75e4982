//! Startup-time configuration errors.
//!
//! Every error here is raised while building the registry, the domain or a
//! binding. Once a session is running, recompute is plain arithmetic over
//! validated inputs and has no error path.

use thiserror::Error;

use crate::producers::ProducerTier;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("initial cost must be finite and > 0, got {0}")]
    InitialCost(f64),

    #[error("cost growth must be finite and > 1, got {0}")]
    CostGrowth(f64),

    #[error("base production must be finite and >= 0, got {0}")]
    BaseProduction(f64),

    #[error("multiplier table has no knots")]
    EmptyTable,

    #[error("multiplier columns differ in length: {counts} counts, {multipliers} multipliers")]
    ColumnLength { counts: usize, multipliers: usize },

    #[error("multiplier knot {index} is not finite: ({x}, {y})")]
    NonFiniteKnot { index: usize, x: f64, y: f64 },

    #[error("multiplier knot {index} goes back in count: {prev} then {x}")]
    DecreasingCount { index: usize, prev: f64, x: f64 },

    #[error("multiplier knot {index} lowers the multiplier: {prev} then {y}")]
    DecreasingMultiplier { index: usize, prev: f64, y: f64 },

    #[error("domain range must hold ascending, finite, non-negative counts")]
    Domain,

    #[error("parameter '{label}': invalid range [{min}, {max}]")]
    Range { label: String, min: f64, max: f64 },

    #[error("parameter '{label}': initial value {value} outside [{min}, {max}]")]
    InitialValue { label: String, value: f64, min: f64, max: f64 },

    #[error("parameter '{label}': curve is not finite at {bound} over the domain")]
    Overflow { label: String, bound: f64 },

    #[error("tier {0} is configured twice")]
    DuplicateTier(ProducerTier),

    #[error("{tier}: {source}")]
    Tier {
        tier: ProducerTier,
        #[source]
        source: Box<ConfigError>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Attach the tier a validation failure belongs to.
    pub fn in_tier(self, tier: ProducerTier) -> ConfigError {
        ConfigError::Tier { tier, source: Box::new(self) }
    }
}

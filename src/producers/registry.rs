//! Static registry: one config plus one multiplier table per tier.
//!
//! Read once when a scene is assembled. Balance changes go through this
//! registry (in code, or a JSON file of the same shape), never through a
//! running session.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    GROWTH_SLIDER_MAX, GROWTH_SLIDER_MIN, LiveParameterSpec, ParamRange, ProducerTier,
    ProducerTierConfig,
};
use crate::curves::MultiplierTable;
use crate::error::{ConfigError, Result};

/// Unlock thresholds shared by every default table.
const UNLOCK_COUNTS: [f64; 7] = [0.0, 99.0, 100.0, 199.0, 200.0, 399.0, 400.0];

#[derive(Clone, Debug, PartialEq)]
pub struct TierProfile {
    pub tier: ProducerTier,
    pub config: ProducerTierConfig,
    pub multipliers: MultiplierTable,
}

impl TierProfile {
    pub fn cost_growth_param(&self) -> LiveParameterSpec {
        let growth = self.config.cost_growth();
        LiveParameterSpec::new(
            format!("{} cost growth", self.tier),
            ParamRange { min: GROWTH_SLIDER_MIN, max: GROWTH_SLIDER_MAX.max(growth) },
            growth,
        )
    }

    pub fn initial_cost_param(&self) -> LiveParameterSpec {
        let cost = self.config.initial_cost();
        LiveParameterSpec::new(format!("{} initial cost", self.tier), ParamRange::around(cost), cost)
    }

    pub fn base_production_param(&self) -> LiveParameterSpec {
        let production = self.config.base_production();
        LiveParameterSpec::new(
            format!("{} production", self.tier),
            ParamRange::around(production),
            production,
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProducerRegistry {
    profiles: Vec<TierProfile>,
}

impl ProducerRegistry {
    pub fn new(profiles: Vec<TierProfile>) -> Result<ProducerRegistry> {
        for (i, p) in profiles.iter().enumerate() {
            if profiles[..i].iter().any(|q| q.tier == p.tier) {
                return Err(ConfigError::DuplicateTier(p.tier));
            }
        }
        Ok(ProducerRegistry { profiles })
    }

    /// The game's shipped balance.
    pub fn defaults() -> Result<ProducerRegistry> {
        let profile = |tier: ProducerTier, cost, growth, production, mults: [f64; 7]| {
            let config = ProducerTierConfig::new(cost, growth, production).map_err(|e| e.in_tier(tier))?;
            let multipliers =
                MultiplierTable::from_columns(&UNLOCK_COUNTS, &mults).map_err(|e| e.in_tier(tier))?;
            Ok::<_, ConfigError>(TierProfile { tier, config, multipliers })
        };
        ProducerRegistry::new(vec![
            profile(
                ProducerTier::Interns,
                20.0,
                1.015,
                1.0,
                [1.0, 1.0, 2.0, 2.0, 16.0, 16.0, 256.0],
            )?,
            profile(
                ProducerTier::JuniorDevs,
                1250.0,
                1.02,
                40.0,
                [1.0, 1.0, 8.0, 8.0, 32.0, 32.0, 512.0],
            )?,
            profile(
                ProducerTier::SeniorDevs,
                15_000.0,
                1.0175,
                1000.0,
                [1.0, 1.0, 2.0, 2.0, 8.0, 8.0, 256.0],
            )?,
        ])
    }

    pub fn get(&self, tier: ProducerTier) -> Option<&TierProfile> {
        self.profiles.iter().find(|p| p.tier == tier)
    }

    pub fn profiles(&self) -> &[TierProfile] {
        &self.profiles
    }

    pub fn from_json_str(json: &str) -> Result<ProducerRegistry> {
        let file: RegistryFile = serde_json::from_str(json)?;
        file.into_registry()
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ProducerRegistry> {
        let file: RegistryFile = serde_json::from_reader(reader)?;
        file.into_registry()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<ProducerRegistry> {
        let file = File::open(path)?;
        ProducerRegistry::from_reader(BufReader::new(file))
    }

    /// Pretty JSON in the shape [`ProducerRegistry::from_json_str`] reads.
    pub fn to_json_string(&self) -> Result<String> {
        let file = RegistryFile {
            tiers: self
                .profiles
                .iter()
                .map(|p| TierEntry {
                    tier: p.tier,
                    initial_cost: p.config.initial_cost(),
                    cost_growth: p.config.cost_growth(),
                    base_production: p.config.base_production(),
                    multipliers: p.multipliers.clone(),
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }
}

#[derive(Serialize, Deserialize)]
struct RegistryFile {
    tiers: Vec<TierEntry>,
}

#[derive(Serialize, Deserialize)]
struct TierEntry {
    tier: ProducerTier,
    initial_cost: f64,
    cost_growth: f64,
    base_production: f64,
    multipliers: MultiplierTable,
}

impl RegistryFile {
    fn into_registry(self) -> Result<ProducerRegistry> {
        let profiles = self
            .tiers
            .into_iter()
            .map(|e| {
                let config = ProducerTierConfig::new(e.initial_cost, e.cost_growth, e.base_production)
                    .map_err(|err| err.in_tier(e.tier))?;
                Ok(TierProfile { tier: e.tier, config, multipliers: e.multipliers })
            })
            .collect::<Result<Vec<_>>>()?;
        ProducerRegistry::new(profiles)
    }
}

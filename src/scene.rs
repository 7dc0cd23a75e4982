//! Scene assembly: one cost binding and one production binding per tier on a
//! shared canvas, plus the 100-unit reference line.
//!
//! Tiers are taken in registry order; each contributes three series (unit
//! cost, cumulative cost, production) and three sliders.

use log::info;

use crate::binding::{
    Canvas, Controls, CostBinding, Marker, ProductionBinding, Rgb, SeriesStyle, Shared,
};
use crate::domain::DomainRange;
use crate::error::Result;
use crate::producers::{ProducerRegistry, ProducerTier};

/// First unlock threshold, marked on the plot.
pub const REFERENCE_COUNT: f64 = 100.0;
pub const REFERENCE_Y_MAX: f64 = 1e3;

pub fn cost_color(tier: ProducerTier) -> Rgb {
    match tier {
        ProducerTier::Interns => Rgb(0x95, 0xd0, 0xfc),
        ProducerTier::JuniorDevs => Rgb(0xfd, 0xaa, 0x48),
        ProducerTier::SeniorDevs => Rgb(0x96, 0xf9, 0x7b),
    }
}

pub fn production_color(tier: ProducerTier) -> Rgb {
    match tier {
        ProducerTier::Interns => Rgb(0x03, 0x43, 0xdf),
        ProducerTier::JuniorDevs => Rgb(0xf9, 0x73, 0x06),
        ProducerTier::SeniorDevs => Rgb(0x15, 0xb0, 0x1a),
    }
}

pub struct TierBindings {
    pub tier: ProducerTier,
    pub cost: CostBinding,
    pub production: ProductionBinding,
}

/// Owns every binding; dropping the scene drops them.
pub struct Scene {
    domain: DomainRange,
    tiers: Vec<TierBindings>,
}

impl Scene {
    pub fn assemble<K, C>(
        canvas: &Shared<K>,
        controls: &mut C,
        registry: &ProducerRegistry,
        domain: DomainRange,
    ) -> Result<Scene>
    where
        K: Canvas + ?Sized + 'static,
        C: Controls + ?Sized,
    {
        canvas.borrow_mut().add_reference_line(REFERENCE_COUNT, 0.0, REFERENCE_Y_MAX);

        let mut tiers = Vec::with_capacity(registry.profiles().len());
        for profile in registry.profiles() {
            let tier = profile.tier;
            let cost = CostBinding::for_tier(
                canvas,
                controls,
                &domain,
                profile,
                SeriesStyle::new(cost_color(tier), Marker::Circle, format!("{tier} cost")),
            )?;
            let production = ProductionBinding::for_tier(
                canvas,
                controls,
                &domain,
                profile,
                SeriesStyle::new(production_color(tier), Marker::Circle, format!("{tier} production")),
            )?;
            tiers.push(TierBindings { tier, cost, production });
        }

        info!(
            "scene assembled: {} tiers over {} counts ({:.1} ..= {:.1})",
            tiers.len(),
            domain.len(),
            domain.counts()[0],
            domain.max_count()
        );
        Ok(Scene { domain, tiers })
    }

    pub fn domain(&self) -> &DomainRange {
        &self.domain
    }

    pub fn tiers(&self) -> &[TierBindings] {
        &self.tiers
    }

    pub fn tier(&self, tier: ProducerTier) -> Option<&TierBindings> {
        self.tiers.iter().find(|t| t.tier == tier)
    }

    pub fn cost(&self, tier: ProducerTier) -> Option<&CostBinding> {
        self.tier(tier).map(|t| &t.cost)
    }

    pub fn production(&self, tier: ProducerTier) -> Option<&ProductionBinding> {
        self.tier(tier).map(|t| &t.production)
    }
}

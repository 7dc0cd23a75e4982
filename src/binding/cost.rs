use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use crate::binding::sdk::{
    Canvas, Controls, CurveModel, LiveParameter, Marker, SeriesHandle, SeriesStyle, Shared,
    ensure_finite, subscribe,
};
use crate::curves::{cumulative_cost_into, unit_cost_into};
use crate::domain::DomainRange;
use crate::error::Result;
use crate::producers::{GROWTH_FLOOR, LiveParameterSpec, ParamRange, TierProfile};

/// Growth and initial-cost parameters of one cost binding.
#[derive(Clone, Debug, PartialEq)]
pub struct CostParams {
    pub growth: LiveParameterSpec,
    pub initial_cost: LiveParameterSpec,
}

impl CostParams {
    pub fn seeded(profile: &TierProfile) -> CostParams {
        CostParams {
            growth: profile.cost_growth_param(),
            initial_cost: profile.initial_cost_param(),
        }
    }
}

struct CostCurves {
    counts: DomainRange,
    unit: Vec<f64>,
    cumulative: Vec<f64>,
    unit_handle: SeriesHandle,
    cumulative_handle: SeriesHandle,
}

impl CurveModel for CostCurves {
    // values: [growth, initial_cost]
    fn recompute(&mut self, values: &[f64]) {
        let (growth, initial_cost) = (values[0], values[1]);
        unit_cost_into(&mut self.unit, initial_cost, growth, self.counts.counts());
        cumulative_cost_into(&mut self.cumulative, initial_cost, growth, self.counts.counts());
    }

    fn for_each_series(&self, f: &mut dyn FnMut(SeriesHandle, &[f64])) {
        f(self.unit_handle, &self.unit);
        f(self.cumulative_handle, &self.cumulative);
    }
}

/// Unit-cost and cumulative-cost series for one tier, driven by the growth
/// and initial-cost sliders. Moving either recomputes both curves.
pub struct CostBinding {
    growth: LiveParameter,
    initial_cost: LiveParameter,
    curves: Shared<CostCurves>,
    recomputes: Rc<Cell<usize>>,
}

impl CostBinding {
    /// `style` is the unit-cost style; the cumulative series reuses its
    /// color with a `+` marker and a `sum(...)` label.
    pub fn new<K, C>(
        canvas: &Shared<K>,
        controls: &mut C,
        domain: &DomainRange,
        style: SeriesStyle,
        params: CostParams,
    ) -> Result<CostBinding>
    where
        K: Canvas + ?Sized + 'static,
        C: Controls + ?Sized,
    {
        let growth = LiveParameter::bind(
            controls,
            &params.growth,
            ParamRange { min: GROWTH_FLOOR, max: f64::MAX },
        )?;
        let initial_cost = LiveParameter::bind(
            controls,
            &params.initial_cost,
            ParamRange { min: f64::MIN_POSITIVE, max: f64::MAX },
        )?;

        // Top of both valid ranges must stay finite over the domain.
        let counts = domain.counts();
        let (g_max, c_max) = (growth.valid().max, initial_cost.valid().max);
        let mut probe = vec![0.0; counts.len()];
        unit_cost_into(&mut probe, c_max, g_max, counts);
        ensure_finite(growth.label(), g_max, &probe)?;
        cumulative_cost_into(&mut probe, c_max, g_max, counts);
        ensure_finite(growth.label(), g_max, &probe)?;

        let mut unit = vec![0.0; counts.len()];
        let mut cumulative = vec![0.0; counts.len()];
        unit_cost_into(&mut unit, initial_cost.value(), growth.value(), counts);
        cumulative_cost_into(&mut cumulative, initial_cost.value(), growth.value(), counts);

        let sum_style = SeriesStyle::new(style.color, Marker::Plus, format!("sum({})", style.label));
        let (unit_handle, cumulative_handle) = {
            let mut canvas = canvas.borrow_mut();
            let unit_handle = canvas.create_series(counts, &unit, &style);
            let cumulative_handle = canvas.create_series(counts, &cumulative, &sum_style);
            (unit_handle, cumulative_handle)
        };

        let curves = Rc::new(RefCell::new(CostCurves {
            counts: domain.clone(),
            unit,
            cumulative,
            unit_handle,
            cumulative_handle,
        }));
        let recomputes = Rc::new(Cell::new(0));
        subscribe(
            canvas,
            controls,
            &[growth.clone(), initial_cost.clone()],
            &curves,
            &recomputes,
        );

        Ok(CostBinding { growth, initial_cost, curves, recomputes })
    }

    /// Build from a registry profile with seeded parameters.
    pub fn for_tier<K, C>(
        canvas: &Shared<K>,
        controls: &mut C,
        domain: &DomainRange,
        profile: &TierProfile,
        style: SeriesStyle,
    ) -> Result<CostBinding>
    where
        K: Canvas + ?Sized + 'static,
        C: Controls + ?Sized,
    {
        CostBinding::new(canvas, controls, domain, style, CostParams::seeded(profile))
            .map_err(|e| e.in_tier(profile.tier))
    }

    pub fn growth(&self) -> &LiveParameter {
        &self.growth
    }

    pub fn initial_cost(&self) -> &LiveParameter {
        &self.initial_cost
    }

    /// Tracked parameters, growth first.
    pub fn live_parameters(&self) -> [&LiveParameter; 2] {
        [&self.growth, &self.initial_cost]
    }

    pub fn unit_cost(&self) -> Ref<'_, [f64]> {
        Ref::map(self.curves.borrow(), |c| c.unit.as_slice())
    }

    pub fn cumulative_cost(&self) -> Ref<'_, [f64]> {
        Ref::map(self.curves.borrow(), |c| c.cumulative.as_slice())
    }

    pub fn series(&self) -> (SeriesHandle, SeriesHandle) {
        let c = self.curves.borrow();
        (c.unit_handle, c.cumulative_handle)
    }

    /// Change notifications handled so far.
    pub fn recompute_count(&self) -> usize {
        self.recomputes.get()
    }
}

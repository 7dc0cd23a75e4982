use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use crate::binding::sdk::{
    Canvas, Controls, CurveModel, LiveParameter, SeriesHandle, SeriesStyle, Shared, ensure_finite,
    subscribe,
};
use crate::curves::{MultiplierTable, production_into};
use crate::domain::DomainRange;
use crate::error::Result;
use crate::producers::{LiveParameterSpec, ParamRange, TierProfile};

struct ProductionCurve {
    counts: DomainRange,
    table: MultiplierTable,
    values: Vec<f64>,
    handle: SeriesHandle,
}

impl CurveModel for ProductionCurve {
    // values: [base_production]
    fn recompute(&mut self, values: &[f64]) {
        production_into(&mut self.values, self.counts.counts(), &self.table, values[0]);
    }

    fn for_each_series(&self, f: &mut dyn FnMut(SeriesHandle, &[f64])) {
        f(self.handle, &self.values);
    }
}

/// Production series for one tier. The multiplier table is fixed; only the
/// base-production slider triggers a recompute.
pub struct ProductionBinding {
    base_production: LiveParameter,
    curve: Shared<ProductionCurve>,
    recomputes: Rc<Cell<usize>>,
}

impl ProductionBinding {
    pub fn new<K, C>(
        canvas: &Shared<K>,
        controls: &mut C,
        domain: &DomainRange,
        table: MultiplierTable,
        style: SeriesStyle,
        base_production: LiveParameterSpec,
    ) -> Result<ProductionBinding>
    where
        K: Canvas + ?Sized + 'static,
        C: Controls + ?Sized,
    {
        let base_production = LiveParameter::bind(
            controls,
            &base_production,
            ParamRange { min: 0.0, max: f64::MAX },
        )?;

        let counts = domain.counts();
        let mut values = vec![0.0; counts.len()];
        production_into(&mut values, counts, &table, base_production.valid().max);
        ensure_finite(base_production.label(), base_production.valid().max, &values)?;
        production_into(&mut values, counts, &table, base_production.value());

        let handle = canvas.borrow_mut().create_series(counts, &values, &style);
        let curve = Rc::new(RefCell::new(ProductionCurve {
            counts: domain.clone(),
            table,
            values,
            handle,
        }));
        let recomputes = Rc::new(Cell::new(0));
        subscribe(canvas, controls, &[base_production.clone()], &curve, &recomputes);

        Ok(ProductionBinding { base_production, curve, recomputes })
    }

    pub fn for_tier<K, C>(
        canvas: &Shared<K>,
        controls: &mut C,
        domain: &DomainRange,
        profile: &TierProfile,
        style: SeriesStyle,
    ) -> Result<ProductionBinding>
    where
        K: Canvas + ?Sized + 'static,
        C: Controls + ?Sized,
    {
        ProductionBinding::new(
            canvas,
            controls,
            domain,
            profile.multipliers.clone(),
            style,
            profile.base_production_param(),
        )
        .map_err(|e| e.in_tier(profile.tier))
    }

    pub fn base_production(&self) -> &LiveParameter {
        &self.base_production
    }

    pub fn live_parameters(&self) -> [&LiveParameter; 1] {
        [&self.base_production]
    }

    pub fn values(&self) -> Ref<'_, [f64]> {
        Ref::map(self.curve.borrow(), |c| c.values.as_slice())
    }

    pub fn table(&self) -> Ref<'_, MultiplierTable> {
        Ref::map(self.curve.borrow(), |c| &c.table)
    }

    pub fn series(&self) -> SeriesHandle {
        self.curve.borrow().handle
    }

    pub fn recompute_count(&self) -> usize {
        self.recomputes.get()
    }
}

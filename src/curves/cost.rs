//! Cost curves: c·gⁿ per unit and its geometric-series sum.

/// Price of the n-th unit: c · gⁿ.
#[inline]
pub fn unit_cost(initial_cost: f64, growth: f64, n: f64) -> f64 {
    initial_cost * growth.powf(n)
}

/// Total spend to own n units: c · (1 - gⁿ) / (1 - g).
///
/// `growth` must not be 1.0; the closed form divides by zero there. Config
/// and bindings keep growth strictly above 1.
#[inline]
pub fn cumulative_cost(initial_cost: f64, growth: f64, n: f64) -> f64 {
    initial_cost * (1.0 - growth.powf(n)) / (1.0 - growth)
}

/// Literal Σ_{k<n} c·gᵏ over integer counts.
pub fn discrete_cumulative_cost(initial_cost: f64, growth: f64, n: u32) -> f64 {
    let mut total = 0.0;
    let mut price = initial_cost;
    for _ in 0..n {
        total += price;
        price *= growth;
    }
    total
}

/// Largest real n with `cumulative_cost(c, g, n) <= budget`.
///
/// Inverts the closed form: n = ln(1 + B·(g-1)/c) / ln g.
#[inline]
pub fn affordable_units(initial_cost: f64, growth: f64, budget: f64) -> f64 {
    if budget <= 0.0 {
        return 0.0;
    }
    (budget * (growth - 1.0) / initial_cost).ln_1p() / growth.ln()
}

/// Seconds of production needed to pay `cost`; infinite without production.
#[inline]
pub fn time_to_next_unit(cost: f64, production_rate: f64) -> f64 {
    if production_rate > 0.0 {
        cost / production_rate
    } else {
        f64::INFINITY
    }
}

/// Elementwise [`unit_cost`], written into `out`.
pub fn unit_cost_into(out: &mut [f64], initial_cost: f64, growth: f64, counts: &[f64]) {
    debug_assert_eq!(out.len(), counts.len());
    for (y, &n) in out.iter_mut().zip(counts) {
        *y = unit_cost(initial_cost, growth, n);
    }
}

/// Elementwise [`cumulative_cost`], written into `out`.
pub fn cumulative_cost_into(out: &mut [f64], initial_cost: f64, growth: f64, counts: &[f64]) {
    debug_assert_eq!(out.len(), counts.len());
    for (y, &n) in out.iter_mut().zip(counts) {
        *y = cumulative_cost(initial_cost, growth, n);
    }
}

/// Elementwise [`time_to_next_unit`] over aligned cost and production series.
pub fn time_to_next_unit_into(out: &mut [f64], costs: &[f64], production_rates: &[f64]) {
    debug_assert_eq!(costs.len(), production_rates.len());
    for ((y, &cost), &rate) in out.iter_mut().zip(costs).zip(production_rates) {
        *y = time_to_next_unit(cost, rate);
    }
}

pub fn unit_cost_over(initial_cost: f64, growth: f64, counts: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; counts.len()];
    unit_cost_into(&mut out, initial_cost, growth, counts);
    out
}

pub fn cumulative_cost_over(initial_cost: f64, growth: f64, counts: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; counts.len()];
    cumulative_cost_into(&mut out, initial_cost, growth, counts);
    out
}

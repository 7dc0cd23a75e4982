//! Production: units owned × unlock multiplier × per-unit output.

use super::multiplier::{MultiplierTable, interpolate_multiplier};

#[inline]
pub fn production(count: f64, table: &MultiplierTable, base_production: f64) -> f64 {
    count * interpolate_multiplier(table, count) * base_production
}

/// Elementwise [`production`], written into `out`.
pub fn production_into(out: &mut [f64], counts: &[f64], table: &MultiplierTable, base_production: f64) {
    debug_assert_eq!(out.len(), counts.len());
    for (y, &n) in out.iter_mut().zip(counts) {
        *y = production(n, table, base_production);
    }
}

pub fn production_over(counts: &[f64], table: &MultiplierTable, base_production: f64) -> Vec<f64> {
    let mut out = vec![0.0; counts.len()];
    production_into(&mut out, counts, table, base_production);
    out
}

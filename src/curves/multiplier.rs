//! Piecewise-linear production multipliers keyed by units owned.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// One control point: at `count` units the multiplier is `multiplier`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Knot {
    pub count: f64,
    pub multiplier: f64,
}

impl Knot {
    pub fn new(count: f64, multiplier: f64) -> Knot {
        Knot { count, multiplier }
    }
}

/// Validated knot sequence.
///
/// Counts never decrease. Two knots may share a count to model a step; the
/// table is right-continuous there, so the last listed multiplier wins.
/// Multipliers never decrease either, which keeps the curve monotone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>")]
pub struct MultiplierTable {
    knots: Vec<Knot>,
}

impl MultiplierTable {
    pub fn new(knots: Vec<Knot>) -> Result<MultiplierTable> {
        if knots.is_empty() {
            return Err(ConfigError::EmptyTable);
        }
        for (index, k) in knots.iter().enumerate() {
            if !k.count.is_finite() || !k.multiplier.is_finite() {
                return Err(ConfigError::NonFiniteKnot { index, x: k.count, y: k.multiplier });
            }
        }
        for (index, pair) in knots.windows(2).enumerate() {
            let (prev, next) = (pair[0], pair[1]);
            if next.count < prev.count {
                return Err(ConfigError::DecreasingCount {
                    index: index + 1,
                    prev: prev.count,
                    x: next.count,
                });
            }
            if next.multiplier < prev.multiplier {
                return Err(ConfigError::DecreasingMultiplier {
                    index: index + 1,
                    prev: prev.multiplier,
                    y: next.multiplier,
                });
            }
        }
        Ok(MultiplierTable { knots })
    }

    /// Build from parallel `(count, multiplier)` pairs.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<MultiplierTable> {
        MultiplierTable::new(pairs.iter().map(|&(x, y)| Knot::new(x, y)).collect())
    }

    /// Build from parallel arrays of counts and multipliers.
    pub fn from_columns(counts: &[f64], multipliers: &[f64]) -> Result<MultiplierTable> {
        if counts.len() != multipliers.len() {
            return Err(ConfigError::ColumnLength {
                counts: counts.len(),
                multipliers: multipliers.len(),
            });
        }
        MultiplierTable::new(
            counts.iter().zip(multipliers).map(|(&x, &y)| Knot::new(x, y)).collect(),
        )
    }

    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    pub fn first(&self) -> Knot {
        self.knots[0]
    }

    pub fn last(&self) -> Knot {
        self.knots[self.knots.len() - 1]
    }

    /// Multiplier at `count`; see [`interpolate_multiplier`].
    pub fn at(&self, count: f64) -> f64 {
        interpolate_multiplier(self, count)
    }
}

impl TryFrom<Vec<(f64, f64)>> for MultiplierTable {
    type Error = ConfigError;

    fn try_from(pairs: Vec<(f64, f64)>) -> Result<MultiplierTable> {
        MultiplierTable::from_pairs(&pairs)
    }
}

impl From<MultiplierTable> for Vec<(f64, f64)> {
    fn from(table: MultiplierTable) -> Self {
        table.knots.iter().map(|k| (k.count, k.multiplier)).collect()
    }
}

/// Linear blend between neighbouring knots, clamped to the boundary
/// multipliers outside the knot span. Exact at knots.
pub fn interpolate_multiplier(table: &MultiplierTable, count: f64) -> f64 {
    let knots = table.knots();
    let (first, last) = (table.first(), table.last());
    if count.is_nan() {
        return f64::NAN;
    }
    if count < first.count {
        return first.multiplier;
    }
    if count >= last.count {
        return last.multiplier;
    }

    // First knot strictly past `count`; its predecessor is the last knot at
    // or before it, which is the right-continuous choice on ties.
    let upper = knots.partition_point(|k| k.count <= count);
    let (left, right) = (knots[upper - 1], knots[upper]);
    if left.count == count {
        return left.multiplier;
    }
    let t = (count - left.count) / (right.count - left.count);
    left.multiplier + t * (right.multiplier - left.multiplier)
}

/// Elementwise [`interpolate_multiplier`], written into `out`.
pub fn interpolate_multiplier_into(out: &mut [f64], table: &MultiplierTable, counts: &[f64]) {
    debug_assert_eq!(out.len(), counts.len());
    for (y, &n) in out.iter_mut().zip(counts) {
        *y = interpolate_multiplier(table, n);
    }
}

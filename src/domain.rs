//! The shared x-axis: unit counts every curve is sampled at.

use std::rc::Rc;

use crate::error::{ConfigError, Result};

/// Default exploration span, 10¹ ..= 10²·⁸ units.
pub const DEFAULT_START_EXP: f64 = 1.0;
pub const DEFAULT_STOP_EXP: f64 = 2.8;
pub const DEFAULT_POINTS: usize = 100;

/// Ascending, finite, non-negative unit counts. Cloning shares the samples.
#[derive(Clone, Debug, PartialEq)]
pub struct DomainRange {
    counts: Rc<[f64]>,
}

impl DomainRange {
    /// `points` samples from 10^start to 10^stop inclusive, evenly spaced in
    /// the exponent.
    pub fn logspace(start_exp: f64, stop_exp: f64, points: usize) -> Result<DomainRange> {
        if points == 0 || !start_exp.is_finite() || !stop_exp.is_finite() {
            return Err(ConfigError::Domain);
        }
        DomainRange::from_counts(logspace_counts(start_exp, stop_exp, points))
    }

    pub fn from_counts(counts: Vec<f64>) -> Result<DomainRange> {
        let valid = !counts.is_empty()
            && counts.iter().all(|n| n.is_finite() && *n >= 0.0)
            && counts.windows(2).all(|w| w[0] <= w[1]);
        if !valid {
            return Err(ConfigError::Domain);
        }
        Ok(DomainRange { counts: counts.into() })
    }

    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn max_count(&self) -> f64 {
        self.counts[self.counts.len() - 1]
    }
}

impl Default for DomainRange {
    fn default() -> Self {
        let counts = logspace_counts(DEFAULT_START_EXP, DEFAULT_STOP_EXP, DEFAULT_POINTS);
        DomainRange { counts: counts.into() }
    }
}

fn logspace_counts(start_exp: f64, stop_exp: f64, points: usize) -> Vec<f64> {
    let step = if points > 1 {
        (stop_exp - start_exp) / (points - 1) as f64
    } else {
        0.0
    };
    (0..points).map(|i| 10f64.powf(start_exp + step * i as f64)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spans_ten_to_ten_pow_two_point_eight() {
        let d = DomainRange::default();
        assert_eq!(d.len(), 100);
        assert!((d.counts()[0] - 10.0).abs() < 1e-12);
        assert!((d.max_count() - 10f64.powf(2.8)).abs() < 1e-9);
        assert!(d.counts().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn single_point_sits_at_start() {
        let d = DomainRange::logspace(2.0, 3.0, 1).unwrap();
        assert_eq!(d.len(), 1);
        assert!((d.counts()[0] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_unordered_or_negative_counts() {
        assert!(DomainRange::from_counts(vec![]).is_err());
        assert!(DomainRange::from_counts(vec![2.0, 1.0]).is_err());
        assert!(DomainRange::from_counts(vec![-1.0, 1.0]).is_err());
        assert!(DomainRange::logspace(1.0, 2.0, 0).is_err());
    }
}

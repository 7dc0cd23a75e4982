//! Pure curve math: unit cost, cumulative cost, multiplier interpolation and
//! production. No state; every function is deterministic.

pub mod cost;
pub mod multiplier;
pub mod production;

pub use cost::*;
pub use multiplier::*;
pub use production::*;

// Reactive curve bindings: series kept in step with live parameters.

pub mod sdk;
pub mod cost;
pub mod production;

pub use cost::*;
pub use production::*;
pub use sdk::*;

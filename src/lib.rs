/*!
`idle_curves` — reactive exploration of exponential cost/production curves
for balancing an idle game's economy.

What it does
- Evaluates the economy's closed forms over a shared, log-spaced unit-count
  axis:
  * unit cost `c · gⁿ`,
  * cumulative cost `c · (1 - gⁿ) / (1 - g)`,
  * production `n · m(n) · p`, with `m` a piecewise-linear unlock table.
- Keeps rendered series in step with slider-backed parameters: a change
  notification recomputes the affected curves in place and requests one
  redraw, synchronously.

How to use (call surface only)
- Start from [`ProducerRegistry::defaults`] or load one with
  [`ProducerRegistry::from_path`].
- Hand a [`Canvas`] and a [`Controls`] implementation to [`Scene::assemble`],
  or build a [`CostBinding`] / [`ProductionBinding`] yourself.
- [`headless`] provides in-memory collaborators; with `render-svg`,
  [`svg::render`] writes a snapshot.

What it does NOT do
- No game loop, no fitting of parameters, no persistence of slider values.
*/

pub mod binding;
pub mod curves;
pub mod domain;
pub mod error;
pub mod headless;
pub mod producers;
pub mod scene;
#[cfg(feature = "render-svg")]
pub mod svg;

pub use binding::{
    Canvas, Controls, CostBinding, CostParams, LiveParameter, Marker, ProductionBinding, Rgb,
    SeriesHandle, SeriesStyle, Shared, SliderHandle,
};
pub use domain::DomainRange;
pub use error::{ConfigError, Result};
pub use producers::{
    LiveParameterSpec, ParamRange, ProducerRegistry, ProducerTier, ProducerTierConfig, TierProfile,
};
pub use scene::Scene;

// src/binding/sdk.rs

//! # Binding SDK
//!
//! Collaborator traits plus the harness every reactive curve binding is built
//! on. A *binding* owns one or more rendered series and the live parameters
//! that drive them; when a parameter's slider moves it recomputes its curves
//! and pushes the new y-values to the canvas.
//!
//! ## Collaborators
//! - [`Canvas`]: create a line series, update its y-values in place, request a
//!   redraw, draw a vertical reference line.
//! - [`Controls`]: create a slider, register a change callback, read the
//!   current value.
//!
//! The crate ships headless versions of both in [`crate::headless`].
//!
//! ## What the harness gives you
//! - [`LiveParameter`]: a slider-backed scalar with its own storage cell and a
//!   valid range used to clamp every read.
//! - [`subscribe`]: wires one change handler per parameter. Each handler
//!   stores the value it was handed, asks the controls for the current value
//!   of *every* other tracked slider, calls [`CurveModel::recompute`], pushes
//!   each series and issues one redraw.
//!
//! ## Your responsibilities (per binding)
//! Implement [`CurveModel`] for the binding's private state:
//!
//! 1) **recompute**: `(&mut self, &[f64])` with the clamped values in the
//!    order the parameters were passed to `subscribe`. Overwrite the owned
//!    y-buffers in place; never resize them.
//! 2) **for_each_series**: hand each `(SeriesHandle, &[f64])` to the callback
//!    so the harness can push them.
//!
//! ## Ordering
//! Everything runs synchronously on the thread that delivers the change
//! notification: one notification, one recompute, one redraw request. State
//! is shared through `Rc<RefCell<_>>`, so bindings are `!Send`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, warn};

use crate::error::{ConfigError, Result};
use crate::producers::{LiveParameterSpec, ParamRange};

pub type Shared<T> = Rc<RefCell<T>>;

/// Change callback handed to [`Controls::on_change`]. Receives the controls
/// that fired it, so sibling sliders can be read, and the new value.
pub type OnChange = Box<dyn FnMut(&dyn Controls, f64)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SeriesHandle(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SliderHandle(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Plus,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SeriesStyle {
    pub color: Rgb,
    pub marker: Marker,
    pub label: String,
}

impl SeriesStyle {
    pub fn new(color: Rgb, marker: Marker, label: impl Into<String>) -> SeriesStyle {
        SeriesStyle { color, marker, label: label.into() }
    }
}

/// Rendering surface.
pub trait Canvas {
    fn create_series(&mut self, x: &[f64], y: &[f64], style: &SeriesStyle) -> SeriesHandle;
    fn update_series_y(&mut self, handle: SeriesHandle, y: &[f64]);
    fn request_redraw(&mut self);
    fn add_reference_line(&mut self, x: f64, y_min: f64, y_max: f64);
}

/// Input widgets.
pub trait Controls {
    fn create_slider(&mut self, label: &str, range: ParamRange, init: f64) -> SliderHandle;
    fn on_change(&mut self, handle: SliderHandle, callback: OnChange);
    fn current_value(&self, handle: SliderHandle) -> f64;
}

/// A slider-backed scalar.
///
/// Clones share the same storage cell; distinct parameters never do.
#[derive(Clone, Debug)]
pub struct LiveParameter {
    label: Rc<str>,
    range: ParamRange,
    valid: ParamRange,
    initial: f64,
    value: Rc<Cell<f64>>,
    slider: SliderHandle,
}

impl LiveParameter {
    /// Create the slider for `spec` and a parameter whose reads are clamped
    /// to `spec.range ∩ limits`.
    pub fn bind<C: Controls + ?Sized>(
        controls: &mut C,
        spec: &LiveParameterSpec,
        limits: ParamRange,
    ) -> Result<LiveParameter> {
        spec.validate()?;
        let valid = spec.range.intersect(limits).ok_or_else(|| ConfigError::Range {
            label: spec.label.clone(),
            min: spec.range.min.max(limits.min),
            max: spec.range.max.min(limits.max),
        })?;
        let slider = controls.create_slider(&spec.label, spec.range, spec.init);
        Ok(LiveParameter {
            label: spec.label.as_str().into(),
            range: spec.range,
            valid,
            initial: spec.init,
            value: Rc::new(Cell::new(spec.init)),
            slider,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Declared slider range.
    pub fn range(&self) -> ParamRange {
        self.range
    }

    /// Range reads are clamped to: the declared range narrowed to where the
    /// curves stay finite.
    pub fn valid(&self) -> ParamRange {
        self.valid
    }

    pub fn initial(&self) -> f64 {
        self.initial
    }

    pub fn slider(&self) -> SliderHandle {
        self.slider
    }

    /// Last value delivered, unclamped.
    pub fn raw(&self) -> f64 {
        self.value.get()
    }

    /// Last value delivered, clamped into [`LiveParameter::valid`].
    pub fn value(&self) -> f64 {
        self.valid.clamp(self.value.get())
    }

    fn store(&self, value: f64) {
        self.value.set(value);
    }

    /// Log a notification that will be clamped: `debug!` when the slider can
    /// produce it (growth 1.0), `warn!` otherwise.
    fn report_clamp(&self, raw: f64) {
        let v = self.valid.clamp(raw);
        if v == raw {
            return;
        }
        if self.range.contains(raw) {
            debug!("{}: {raw} evaluated as {v}", self.label);
        } else {
            warn!("{}: {raw} outside [{}, {}], using {v}", self.label, self.valid.min, self.valid.max);
        }
    }

    fn shares_storage(&self, other: &LiveParameter) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}

/// Private state of a binding: owned y-buffers and how to refill them.
pub trait CurveModel {
    /// Refill every owned series from clamped parameter values.
    fn recompute(&mut self, values: &[f64]);

    fn for_each_series(&self, f: &mut dyn FnMut(SeriesHandle, &[f64]));
}

/// Register one change handler per parameter.
pub fn subscribe<K, C, M>(
    canvas: &Shared<K>,
    controls: &mut C,
    params: &[LiveParameter],
    model: &Shared<M>,
    recomputes: &Rc<Cell<usize>>,
) where
    K: Canvas + ?Sized + 'static,
    C: Controls + ?Sized,
    M: CurveModel + 'static,
{
    debug_assert!(
        params
            .iter()
            .enumerate()
            .all(|(i, p)| params[..i].iter().all(|q| !q.shares_storage(p))),
        "live parameters must not alias"
    );

    for (index, param) in params.iter().enumerate() {
        let tracked: Vec<LiveParameter> = params.to_vec();
        let canvas = Rc::clone(canvas);
        let model = Rc::clone(model);
        let recomputes = Rc::clone(recomputes);

        controls.on_change(
            param.slider(),
            Box::new(move |controls: &dyn Controls, value: f64| {
                let changed = &tracked[index];
                changed.store(value);
                changed.report_clamp(value);
                for (i, other) in tracked.iter().enumerate() {
                    if i != index {
                        other.store(controls.current_value(other.slider()));
                    }
                }
                let values: Vec<f64> = tracked.iter().map(LiveParameter::value).collect();

                model.borrow_mut().recompute(&values);
                {
                    let model = model.borrow();
                    let mut canvas = canvas.borrow_mut();
                    model.for_each_series(&mut |handle, y| canvas.update_series_y(handle, y));
                }
                // Model released: a synchronous redraw may read the binding.
                canvas.borrow_mut().request_redraw();

                recomputes.set(recomputes.get() + 1);
                debug!("{} -> {value}: recomputed with {values:?}", changed.label());
            }),
        );
    }
}

/// Fail with [`ConfigError::Overflow`] unless every sample is finite.
pub fn ensure_finite(label: &str, bound: f64, ys: &[f64]) -> Result<()> {
    if ys.iter().all(|y| y.is_finite()) {
        Ok(())
    } else {
        Err(ConfigError::Overflow { label: label.to_owned(), bound })
    }
}

//! In-memory canvas and sliders.
//!
//! Used by tests, the demo and the SVG snapshot; they behave like the real
//! widgets do from a binding's point of view.

use log::warn;

use crate::binding::{Canvas, Controls, OnChange, SeriesHandle, SeriesStyle, SliderHandle};
use crate::producers::ParamRange;

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub style: SeriesStyle,
    pub updates: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferenceLine {
    pub x: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Keeps every series and counts redraw requests.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    series: Vec<RecordedSeries>,
    reference_lines: Vec<ReferenceLine>,
    redraws: usize,
}

impl RecordingCanvas {
    pub fn new() -> RecordingCanvas {
        RecordingCanvas::default()
    }

    pub fn series(&self) -> &[RecordedSeries] {
        &self.series
    }

    pub fn get(&self, handle: SeriesHandle) -> Option<&RecordedSeries> {
        self.series.get(handle.0)
    }

    /// Series whose legend label is `label`.
    pub fn find(&self, label: &str) -> Option<&RecordedSeries> {
        self.series.iter().find(|s| s.style.label == label)
    }

    pub fn reference_lines(&self) -> &[ReferenceLine] {
        &self.reference_lines
    }

    pub fn redraws(&self) -> usize {
        self.redraws
    }
}

impl Canvas for RecordingCanvas {
    fn create_series(&mut self, x: &[f64], y: &[f64], style: &SeriesStyle) -> SeriesHandle {
        self.series.push(RecordedSeries {
            x: x.to_vec(),
            y: y.to_vec(),
            style: style.clone(),
            updates: 0,
        });
        SeriesHandle(self.series.len() - 1)
    }

    fn update_series_y(&mut self, handle: SeriesHandle, y: &[f64]) {
        match self.series.get_mut(handle.0) {
            Some(s) if s.y.len() == y.len() => {
                s.y.copy_from_slice(y);
                s.updates += 1;
            }
            Some(s) => warn!("series '{}': {} y-values for {} points, ignored", s.style.label, y.len(), s.y.len()),
            None => warn!("unknown series {handle:?}"),
        }
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }

    fn add_reference_line(&mut self, x: f64, y_min: f64, y_max: f64) {
        self.reference_lines.push(ReferenceLine { x, y_min, y_max });
    }
}

struct Slider {
    label: String,
    range: ParamRange,
    value: f64,
    callbacks: Vec<OnChange>,
}

/// Sliders that clamp to their range and fire callbacks in registration
/// order, synchronously.
#[derive(Default)]
pub struct SliderBoard {
    sliders: Vec<Slider>,
}

impl SliderBoard {
    pub fn new() -> SliderBoard {
        SliderBoard::default()
    }

    pub fn len(&self) -> usize {
        self.sliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sliders.is_empty()
    }

    pub fn find(&self, label: &str) -> Option<SliderHandle> {
        self.sliders.iter().position(|s| s.label == label).map(SliderHandle)
    }

    pub fn label(&self, handle: SliderHandle) -> Option<&str> {
        self.sliders.get(handle.0).map(|s| s.label.as_str())
    }

    pub fn range(&self, handle: SliderHandle) -> Option<ParamRange> {
        self.sliders.get(handle.0).map(|s| s.range)
    }

    /// Drag to `value`, clamped to the slider's range. Returns the value that
    /// was delivered, or `None` for an unknown handle.
    pub fn set_value(&mut self, handle: SliderHandle, value: f64) -> Option<f64> {
        let range = self.sliders.get(handle.0)?.range;
        self.deliver(handle, range.clamp(value))
    }

    /// Deliver `value` as is, skipping the widget's own clamp.
    pub fn set_value_unchecked(&mut self, handle: SliderHandle, value: f64) -> Option<f64> {
        self.deliver(handle, value)
    }

    /// Move the slider without firing callbacks, like a programmatic reset.
    /// The next notification from any sibling slider picks the value up.
    pub fn set_value_silently(&mut self, handle: SliderHandle, value: f64) -> Option<f64> {
        let slider = self.sliders.get_mut(handle.0)?;
        slider.value = slider.range.clamp(value);
        Some(slider.value)
    }

    fn deliver(&mut self, handle: SliderHandle, value: f64) -> Option<f64> {
        let slider = self.sliders.get_mut(handle.0)?;
        slider.value = value;
        let mut callbacks = std::mem::take(&mut slider.callbacks);
        {
            let board: &dyn Controls = &*self;
            for callback in callbacks.iter_mut() {
                callback(board, value);
            }
        }
        self.sliders[handle.0].callbacks = callbacks;
        Some(value)
    }
}

impl Controls for SliderBoard {
    fn create_slider(&mut self, label: &str, range: ParamRange, init: f64) -> SliderHandle {
        self.sliders.push(Slider { label: label.to_owned(), range, value: init, callbacks: Vec::new() });
        SliderHandle(self.sliders.len() - 1)
    }

    fn on_change(&mut self, handle: SliderHandle, callback: OnChange) {
        match self.sliders.get_mut(handle.0) {
            Some(s) => s.callbacks.push(callback),
            None => warn!("callback for unknown slider {handle:?} dropped"),
        }
    }

    fn current_value(&self, handle: SliderHandle) -> f64 {
        self.sliders.get(handle.0).map_or(f64::NAN, |s| s.value)
    }
}

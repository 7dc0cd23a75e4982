// tests/binding.rs
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use idle_curves::binding::*;
use idle_curves::curves::{MultiplierTable, cumulative_cost_over, production_over, unit_cost_over};
use idle_curves::headless::{RecordingCanvas, SliderBoard};
use idle_curves::producers::{GROWTH_FLOOR, LiveParameterSpec, ParamRange};
use idle_curves::{ConfigError, DomainRange};

fn canvas() -> Shared<RecordingCanvas> {
    Rc::new(RefCell::new(RecordingCanvas::new()))
}

fn interns_cost_params() -> CostParams {
    CostParams {
        growth: LiveParameterSpec::new("interns cost growth", ParamRange { min: 1.0, max: 1.2 }, 1.015),
        initial_cost: LiveParameterSpec::new("interns initial cost", ParamRange::around(20.0), 20.0),
    }
}

fn style(label: &str) -> SeriesStyle {
    SeriesStyle::new(Rgb(0x95, 0xd0, 0xfc), Marker::Circle, label)
}

fn assert_close(got: &[f64], want: &[f64]) {
    assert_eq!(got.len(), want.len());
    for (i, (g, w)) in got.iter().zip(want).enumerate() {
        assert!((g - w).abs() <= 1e-12 * w.abs().max(1.0), "[{i}] {g} vs {w}");
    }
}

/* ──────────────────────────────────────────────────────────────────────────
1) Cost binding
────────────────────────────────────────────────────────────────────────── */

#[test]
fn growth_change_recomputes_with_one_redraw() {
    let canvas = canvas();
    let mut board = SliderBoard::new();
    let domain = DomainRange::default();
    let binding =
        CostBinding::new(&canvas, &mut board, &domain, style("interns cost"), interns_cost_params()).unwrap();

    assert_eq!(canvas.borrow().redraws(), 0);
    assert_close(&binding.unit_cost(), &unit_cost_over(20.0, 1.015, domain.counts()));

    board.set_value(binding.growth().slider(), 1.05).unwrap();

    assert_close(&binding.unit_cost(), &unit_cost_over(20.0, 1.05, domain.counts()));
    assert_close(&binding.cumulative_cost(), &cumulative_cost_over(20.0, 1.05, domain.counts()));
    assert_eq!(canvas.borrow().redraws(), 1);
    assert_eq!(binding.recompute_count(), 1);

    // The canvas saw the same values the binding holds.
    let (unit, sum) = binding.series();
    let c = canvas.borrow();
    assert_close(&c.get(unit).unwrap().y, &binding.unit_cost());
    assert_close(&c.get(sum).unwrap().y, &binding.cumulative_cost());
    assert_eq!(c.get(sum).unwrap().style.label, "sum(interns cost)");
    assert_eq!(c.get(sum).unwrap().style.marker, Marker::Plus);
}

#[test]
fn either_slider_uses_both_current_values() {
    let canvas = canvas();
    let mut board = SliderBoard::new();
    let domain = DomainRange::default();
    let binding =
        CostBinding::new(&canvas, &mut board, &domain, style("interns cost"), interns_cost_params()).unwrap();

    board.set_value(binding.initial_cost().slider(), 50.0).unwrap();
    assert_close(&binding.unit_cost(), &unit_cost_over(50.0, 1.015, domain.counts()));

    board.set_value(binding.growth().slider(), 1.1).unwrap();
    assert_close(&binding.unit_cost(), &unit_cost_over(50.0, 1.1, domain.counts()));
    assert_close(&binding.cumulative_cost(), &cumulative_cost_over(50.0, 1.1, domain.counts()));

    assert_eq!(canvas.borrow().redraws(), 2);
    assert_eq!(binding.recompute_count(), 2);
}

#[test]
fn sibling_moved_without_callbacks_is_read_on_next_change() {
    let canvas = canvas();
    let mut board = SliderBoard::new();
    let domain = DomainRange::default();
    let binding =
        CostBinding::new(&canvas, &mut board, &domain, style("interns cost"), interns_cost_params()).unwrap();

    board.set_value_silently(binding.initial_cost().slider(), 50.0).unwrap();
    assert_eq!(binding.recompute_count(), 0);

    board.set_value(binding.growth().slider(), 1.05).unwrap();
    assert_close(&binding.unit_cost(), &unit_cost_over(50.0, 1.05, domain.counts()));
    assert_close(&binding.cumulative_cost(), &cumulative_cost_over(50.0, 1.05, domain.counts()));
    assert_eq!(binding.initial_cost().raw(), 50.0);
    assert_eq!(canvas.borrow().redraws(), 1);
}

/// Canvas that runs a hook from inside `request_redraw`.
#[derive(Default)]
struct EagerCanvas {
    inner: RecordingCanvas,
    on_redraw: Option<Box<dyn FnMut()>>,
}

impl Canvas for EagerCanvas {
    fn create_series(&mut self, x: &[f64], y: &[f64], style: &SeriesStyle) -> SeriesHandle {
        self.inner.create_series(x, y, style)
    }

    fn update_series_y(&mut self, handle: SeriesHandle, y: &[f64]) {
        self.inner.update_series_y(handle, y)
    }

    fn request_redraw(&mut self) {
        self.inner.request_redraw();
        if let Some(hook) = self.on_redraw.as_mut() {
            hook();
        }
    }

    fn add_reference_line(&mut self, x: f64, y_min: f64, y_max: f64) {
        self.inner.add_reference_line(x, y_min, y_max)
    }
}

#[test]
fn synchronous_redraw_can_read_the_binding() {
    let canvas: Shared<EagerCanvas> = Rc::new(RefCell::new(EagerCanvas::default()));
    let mut board = SliderBoard::new();
    let domain = DomainRange::default();
    let binding = Rc::new(
        CostBinding::new(&canvas, &mut board, &domain, style("interns cost"), interns_cost_params()).unwrap(),
    );

    let seen = Rc::new(Cell::new(0.0));
    {
        let (binding, seen) = (Rc::clone(&binding), Rc::clone(&seen));
        canvas.borrow_mut().on_redraw = Some(Box::new(move || seen.set(binding.unit_cost()[0])));
    }

    board.set_value(binding.growth().slider(), 1.05).unwrap();
    assert_eq!(seen.get(), unit_cost_over(20.0, 1.05, &domain.counts()[..1])[0]);
    assert_eq!(canvas.borrow().inner.redraws(), 1);
}

#[test]
fn growth_of_one_is_floored_not_divided_by_zero() {
    let canvas = canvas();
    let mut board = SliderBoard::new();
    let domain = DomainRange::default();
    let binding =
        CostBinding::new(&canvas, &mut board, &domain, style("interns cost"), interns_cost_params()).unwrap();

    // Slider minimum is 1.0; the binding evaluates at the floor instead.
    board.set_value(binding.growth().slider(), 0.5).unwrap();
    assert_eq!(binding.growth().raw(), 1.0);
    assert_eq!(binding.growth().value(), GROWTH_FLOOR);
    assert!(binding.cumulative_cost().iter().all(|y| y.is_finite() && *y > 0.0));
    assert_close(&binding.cumulative_cost(), &cumulative_cost_over(20.0, GROWTH_FLOOR, domain.counts()));
}

#[test]
fn unclamped_notifications_are_clamped_by_the_binding() {
    let canvas = canvas();
    let mut board = SliderBoard::new();
    let domain = DomainRange::default();
    let binding =
        CostBinding::new(&canvas, &mut board, &domain, style("interns cost"), interns_cost_params()).unwrap();

    board.set_value_unchecked(binding.growth().slider(), 50.0).unwrap();
    assert_close(&binding.unit_cost(), &unit_cost_over(20.0, 1.2, domain.counts()));

    board.set_value_unchecked(binding.initial_cost().slider(), f64::NAN).unwrap();
    assert_close(&binding.unit_cost(), &unit_cost_over(2.0, 1.2, domain.counts()));
    assert!(canvas.borrow().series().iter().all(|s| s.y.iter().all(|y| y.is_finite())));
}

#[test]
fn bindings_do_not_share_state() {
    let canvas = canvas();
    let mut board = SliderBoard::new();
    let domain = DomainRange::default();
    let a = CostBinding::new(&canvas, &mut board, &domain, style("a"), interns_cost_params()).unwrap();
    let b = CostBinding::new(&canvas, &mut board, &domain, style("b"), interns_cost_params()).unwrap();

    board.set_value(a.growth().slider(), 1.1).unwrap();
    assert_eq!(a.recompute_count(), 1);
    assert_eq!(b.recompute_count(), 0);
    assert_close(&b.unit_cost(), &unit_cost_over(20.0, 1.015, domain.counts()));
    assert_eq!(b.growth().raw(), 1.015);
}

#[test]
fn overflowing_range_is_a_config_error() {
    let canvas = canvas();
    let mut board = SliderBoard::new();
    let domain = DomainRange::logspace(1.0, 4.0, 50).unwrap();
    let params = CostParams {
        growth: LiveParameterSpec::new("g", ParamRange { min: 1.0, max: 2.0 }, 1.1),
        initial_cost: LiveParameterSpec::new("c", ParamRange::around(20.0), 20.0),
    };
    let err = CostBinding::new(&canvas, &mut board, &domain, style("x"), params).err().unwrap();
    assert!(matches!(err, ConfigError::Overflow { .. }), "{err}");
}

#[test]
fn init_outside_range_is_rejected() {
    let canvas = canvas();
    let mut board = SliderBoard::new();
    let params = CostParams {
        growth: LiveParameterSpec::new("g", ParamRange { min: 1.0, max: 1.2 }, 1.5),
        initial_cost: LiveParameterSpec::new("c", ParamRange::around(20.0), 20.0),
    };
    let res = CostBinding::new(&canvas, &mut board, &DomainRange::default(), style("x"), params);
    assert!(matches!(res, Err(ConfigError::InitialValue { .. })));
}

/* ──────────────────────────────────────────────────────────────────────────
2) Production binding
────────────────────────────────────────────────────────────────────────── */

fn table() -> MultiplierTable {
    MultiplierTable::from_columns(
        &[0.0, 99.0, 100.0, 199.0, 200.0, 399.0, 400.0],
        &[1.0, 1.0, 8.0, 8.0, 32.0, 32.0, 512.0],
    )
    .unwrap()
}

#[test]
fn production_follows_base_production() {
    let canvas = canvas();
    let mut board = SliderBoard::new();
    let domain = DomainRange::default();
    let binding = ProductionBinding::new(
        &canvas,
        &mut board,
        &domain,
        table(),
        style("junior devs production"),
        LiveParameterSpec::new("junior devs production", ParamRange::around(40.0), 40.0),
    )
    .unwrap();

    assert_close(&binding.values(), &production_over(domain.counts(), &table(), 40.0));

    board.set_value(binding.base_production().slider(), 100.0).unwrap();
    assert_close(&binding.values(), &production_over(domain.counts(), &table(), 100.0));
    assert_eq!(binding.recompute_count(), 1);
    assert_eq!(canvas.borrow().redraws(), 1);
    assert_eq!(canvas.borrow().get(binding.series()).unwrap().updates, 1);
}

#[test]
fn production_tracks_a_single_parameter() {
    let canvas = canvas();
    let mut board = SliderBoard::new();
    let binding = ProductionBinding::new(
        &canvas,
        &mut board,
        &DomainRange::default(),
        table(),
        style("p"),
        LiveParameterSpec::new("p", ParamRange::around(1.0), 1.0),
    )
    .unwrap();
    assert_eq!(binding.live_parameters().len(), 1);
    assert_eq!(board.len(), 1);
    assert_eq!(board.label(binding.base_production().slider()), Some("p"));
}

#[test]
fn production_clamps_unchecked_notifications() {
    let canvas = canvas();
    let mut board = SliderBoard::new();
    let domain = DomainRange::default();
    let binding = ProductionBinding::new(
        &canvas,
        &mut board,
        &domain,
        table(),
        style("p"),
        LiveParameterSpec::new("p", ParamRange::around(40.0), 40.0),
    )
    .unwrap();

    board.set_value_unchecked(binding.base_production().slider(), 1e6).unwrap();
    assert_close(&binding.values(), &production_over(domain.counts(), &table(), 400.0));

    board.set_value_unchecked(binding.base_production().slider(), f64::NAN).unwrap();
    assert_close(&binding.values(), &production_over(domain.counts(), &table(), 4.0));

    board.set_value_unchecked(binding.base_production().slider(), -3.0).unwrap();
    assert_close(&binding.values(), &production_over(domain.counts(), &table(), 4.0));
    assert!(binding.values().iter().all(|y| y.is_finite()));
    assert_eq!(binding.recompute_count(), 3);
}

#[test]
fn overflowing_production_range_is_a_config_error() {
    let canvas = canvas();
    let mut board = SliderBoard::new();
    let res = ProductionBinding::new(
        &canvas,
        &mut board,
        &DomainRange::default(),
        table(),
        style("p"),
        LiveParameterSpec::new("p", ParamRange { min: 1.0, max: f64::MAX }, 1.0),
    );
    assert!(matches!(res, Err(ConfigError::Overflow { .. })));
    assert!(canvas.borrow().series().is_empty());
}

/* ──────────────────────────────────────────────────────────────────────────
3) Ordering — notifications are handled one at a time, in order
────────────────────────────────────────────────────────────────────────── */

#[test]
fn every_notification_recomputes_and_redraws_once() {
    let canvas = canvas();
    let mut board = SliderBoard::new();
    let domain = DomainRange::default();
    let binding =
        CostBinding::new(&canvas, &mut board, &domain, style("interns cost"), interns_cost_params()).unwrap();

    let drags = [1.02, 1.03, 1.04, 1.19, 1.015];
    for g in drags {
        board.set_value(binding.growth().slider(), g).unwrap();
    }
    assert_eq!(binding.recompute_count(), drags.len());
    assert_eq!(canvas.borrow().redraws(), drags.len());
    // Last drag wins.
    assert_close(&binding.unit_cost(), &unit_cost_over(20.0, 1.015, domain.counts()));
}

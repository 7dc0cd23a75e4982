// demos/explore.rs
// Run with:
//   RUST_LOG=debug cargo run --example explore
//   cargo run --example explore --features render-svg -- curves.svg
//   cargo run --example explore -- curves.svg registry.json

use std::cell::RefCell;
use std::rc::Rc;

use idle_curves::curves::{affordable_units, time_to_next_unit};
use idle_curves::headless::{RecordingCanvas, SliderBoard};
use idle_curves::{DomainRange, ProducerRegistry, ProducerTier, Scene};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let svg_path = args.next();
    let registry = match args.next() {
        Some(path) => ProducerRegistry::from_path(path)?,
        None => ProducerRegistry::defaults()?,
    };

    let canvas = Rc::new(RefCell::new(RecordingCanvas::new()));
    let mut board = SliderBoard::new();
    let scene = Scene::assemble(&canvas, &mut board, &registry, DomainRange::default())?;

    // A designer's session: steepen interns, cheapen juniors, boost seniors.
    let drags = [
        ("interns cost growth", 1.03),
        ("junior devs initial cost", 600.0),
        ("senior devs production", 2500.0),
        ("interns cost growth", 1.02),
    ];
    for (label, value) in drags {
        let Some(slider) = board.find(label) else {
            log::warn!("no slider labelled '{label}'");
            continue;
        };
        board.set_value(slider, value);
    }

    println!("== After {} drags, {} redraws ==", drags.len(), canvas.borrow().redraws());
    let counts = scene.domain().counts();
    let at = counts.partition_point(|&n| n < 100.0).min(counts.len() - 1);
    for tier in ProducerTier::ALL {
        let (Some(cost), Some(prod)) = (scene.cost(tier), scene.production(tier)) else {
            continue;
        };
        let (unit, sum, rate) = (cost.unit_cost()[at], cost.cumulative_cost()[at], prod.values()[at]);
        let ttu = time_to_next_unit(unit, rate);
        let owned = affordable_units(
            cost.initial_cost().value(),
            cost.growth().value(),
            sum * 2.0,
        );
        println!(
            "{tier:>12} @ {:>6.1}: next {unit:>12.1}  spent {sum:>14.1}  prod {rate:>10.1}/s  \
             ttu {ttu:>8.2}s  2x budget buys {owned:>6.1}",
            counts[at]
        );
    }

    if let Some(path) = svg_path {
        write_svg(&canvas.borrow(), &path)?;
    }
    Ok(())
}

#[cfg(feature = "render-svg")]
fn write_svg(canvas: &RecordingCanvas, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    idle_curves::svg::render(canvas, std::path::Path::new(path), (1200, 800))?;
    println!("wrote {path}");
    Ok(())
}

#[cfg(not(feature = "render-svg"))]
fn write_svg(_canvas: &RecordingCanvas, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    log::warn!("built without `render-svg`; skipping {path}");
    Ok(())
}

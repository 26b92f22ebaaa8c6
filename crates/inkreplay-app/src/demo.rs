//! Generated sample drawing, so there is something to replay without a tablet.

use inkreplay_core::time::{Duration, Instant};
use inkreplay_core::{Drawing, Ink, InkKind, Stroke, StrokeBuilder};
use kurbo::{Point, Size};
use peniko::Color;
use std::f64::consts::TAU;

/// Sample rate of the synthetic pen.
const SAMPLES_PER_SECOND: f64 = 120.0;

/// Record a stroke drawn over `seconds`; `f(t)` gives location and force for t in 0..=1.
fn record(ink: Ink, seconds: f64, f: impl Fn(f64) -> (Point, f64)) -> Stroke {
    let samples = ((seconds * SAMPLES_PER_SECOND) as usize).max(2);
    let width = ink.width;
    let start = Instant::now();
    let mut builder = StrokeBuilder::new(ink);

    for i in 0..samples {
        let t = i as f64 / (samples - 1) as f64;
        let (location, force) = f(t);
        let at = start + Duration::from_secs_f64(t * seconds);
        builder.add_point(location, at, |p| {
            p.with_force(force)
                .with_size(Size::new(width * force, width * force))
        });
    }
    builder.finish()
}

/// A spiral, a wave underline and a dot.
pub fn demo_drawing() -> Drawing {
    let spiral = record(
        Ink::new(InkKind::Pen, Color::from_rgba8(0, 122, 255, 255), 6.0),
        1.5,
        |t| {
            let angle = t * 3.0 * TAU;
            let radius = 10.0 + 90.0 * t;
            (
                Point::new(200.0 + radius * angle.cos(), 150.0 + radius * angle.sin()),
                0.5 + 0.5 * t,
            )
        },
    );
    let wave = record(
        Ink::new(InkKind::Marker, Color::from_rgba8(255, 59, 48, 255), 10.0),
        0.8,
        |t| {
            let x = 60.0 + 280.0 * t;
            (Point::new(x, 290.0 + 12.0 * (t * 4.0 * TAU).sin()), 1.0)
        },
    );
    let dot = record(Ink::new(InkKind::Pencil, Color::from_rgba8(0, 0, 0, 255), 4.0), 0.05, |_| {
        (Point::new(350.0, 60.0), 0.8)
    });

    Drawing::from_strokes(vec![spiral, wave, dot])
}

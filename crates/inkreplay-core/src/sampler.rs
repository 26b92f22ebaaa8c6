//! Time-based sampling along a stroke.
//!
//! A position along a stroke is a parametric value: the integer part indexes
//! a point, the fractional part is the progress towards the next one.

use crate::stroke::{Stroke, StrokePoint};
use kurbo::Point;

/// Read-only view over the samples of a stroke.
#[derive(Debug, Clone, Copy)]
pub struct PathSampler<'a> {
    points: &'a [StrokePoint],
}

impl<'a> PathSampler<'a> {
    pub fn new(stroke: &'a Stroke) -> Self {
        Self {
            points: &stroke.points,
        }
    }

    pub fn from_points(points: &'a [StrokePoint]) -> Self {
        Self { points }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Parametric value of the last point, `None` for an empty path.
    pub fn end(&self) -> Option<f64> {
        self.points.len().checked_sub(1).map(|last| last as f64)
    }

    /// Recorded duration in seconds.
    pub fn duration(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.time_offset)
    }

    /// Recorded time offset at a parametric value, clamped to the path.
    pub fn time_at(&self, value: f64) -> f64 {
        self.lerp_at(value, |p| p.time_offset).unwrap_or(0.0)
    }

    /// Interpolated location at a parametric value, clamped to the path.
    pub fn location_at(&self, value: f64) -> Option<Point> {
        let x = self.lerp_at(value, |p| p.location.x)?;
        let y = self.lerp_at(value, |p| p.location.y)?;
        Some(Point::new(x, y))
    }

    fn lerp_at(&self, value: f64, field: impl Fn(&StrokePoint) -> f64) -> Option<f64> {
        let last = self.points.len().checked_sub(1)?;
        if value <= 0.0 || last == 0 {
            return Some(field(&self.points[0]));
        }
        if value >= last as f64 {
            return Some(field(&self.points[last]));
        }
        let index = value.floor() as usize;
        let t = value - index as f64;
        let a = field(&self.points[index]);
        let b = field(&self.points[index + 1]);
        Some(a + (b - a) * t)
    }

    /// Move `current` forward by `elapsed` seconds of recorded time.
    ///
    /// The result advances at the speed the stroke was drawn at, not one
    /// point per step. It never goes backwards, saturates at the last point,
    /// and a value already past the last point is returned unchanged.
    pub fn advance(&self, current: f64, elapsed: f64) -> f64 {
        let Some(end) = self.end() else {
            return current;
        };
        if current > end {
            return current;
        }

        let target = self.time_at(current) + elapsed.max(0.0);
        let first = current.max(0.0).floor() as usize;

        for (offset, pair) in self.points[first..].windows(2).enumerate() {
            let (t0, t1) = (pair[0].time_offset, pair[1].time_offset);
            // Zero-length segments fall through to the next pair.
            if t1 > target {
                let index = (first + offset) as f64;
                let span = t1 - t0;
                let value = if span > 0.0 {
                    index + ((target - t0) / span).clamp(0.0, 1.0)
                } else {
                    index
                };
                return value.max(current);
            }
        }

        end
    }
}

/// Advance `current` along `stroke` by `elapsed` seconds of recorded time.
pub fn advance(current: f64, elapsed: f64, stroke: &Stroke) -> f64 {
    PathSampler::new(stroke).advance(current, elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::Ink;

    fn stroke_with_times(times: &[f64]) -> Stroke {
        let points = times
            .iter()
            .enumerate()
            .map(|(i, &t)| StrokePoint::new(Point::new(i as f64 * 10.0, 0.0), t))
            .collect();
        Stroke::new(Ink::default(), points, 0.0)
    }

    fn uniform(count: usize, step: f64) -> Stroke {
        let times: Vec<f64> = (0..count).map(|i| i as f64 * step).collect();
        stroke_with_times(&times)
    }

    #[test]
    fn test_advance_uniform_timing() {
        let stroke = uniform(10, 0.1);
        let value = advance(0.0, 0.25, &stroke);
        assert!((value - 2.5).abs() < 1e-9);

        let value = advance(value, 0.05, &stroke);
        assert!((value - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_advance_follows_recorded_speed() {
        // Slow second segment: 0.1s then 0.4s.
        let stroke = stroke_with_times(&[0.0, 0.1, 0.5]);
        let value = advance(0.0, 0.3, &stroke);
        assert!((value - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_advance_saturates_at_end() {
        let stroke = uniform(5, 0.1);
        assert_eq!(advance(0.0, 10.0, &stroke), 4.0);
        assert_eq!(advance(3.9, 0.5, &stroke), 4.0);
    }

    #[test]
    fn test_advance_past_end_is_unchanged() {
        let stroke = uniform(5, 0.1);
        assert_eq!(advance(12.0, 1.0, &stroke), 12.0);
    }

    #[test]
    fn test_advance_zero_elapsed_is_stable() {
        let stroke = uniform(10, 0.1);
        let value = advance(0.0, 0.0, &stroke);
        assert_eq!(value, 0.0);
        let held = advance(3.7, 0.0, &stroke);
        assert!(held >= 3.7 && held - 3.7 < 1e-9);
    }

    #[test]
    fn test_advance_skips_zero_length_segments() {
        let stroke = stroke_with_times(&[0.0, 0.0, 0.1]);
        let value = advance(0.0, 0.05, &stroke);
        assert!((value - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_untimed_stroke_completes_at_once() {
        let stroke = stroke_with_times(&[0.0, 0.0, 0.0]);
        assert_eq!(advance(0.0, 0.016, &stroke), 2.0);
    }

    #[test]
    fn test_single_point_and_empty() {
        let single = stroke_with_times(&[0.0]);
        assert_eq!(advance(0.0, 1.0, &single), 0.0);

        let empty = stroke_with_times(&[]);
        assert_eq!(advance(0.0, 1.0, &empty), 0.0);
        assert!(PathSampler::new(&empty).end().is_none());
    }

    #[test]
    fn test_advance_is_monotonic() {
        let stroke = stroke_with_times(&[0.0, 0.2, 0.15, 0.4]);
        let mut value = 0.0;
        for _ in 0..20 {
            let next = advance(value, 0.03, &stroke);
            assert!(next >= value);
            value = next;
        }
        assert_eq!(value, 3.0);
    }

    #[test]
    fn test_time_and_location_at() {
        let stroke = uniform(3, 0.2);
        let sampler = PathSampler::new(&stroke);
        assert!((sampler.time_at(1.5) - 0.3).abs() < 1e-12);
        assert_eq!(sampler.time_at(-1.0), 0.0);
        assert!((sampler.time_at(9.0) - 0.4).abs() < 1e-12);
        assert_eq!(sampler.location_at(0.5), Some(Point::new(5.0, 0.0)));
        assert!((sampler.duration() - 0.4).abs() < 1e-12);
    }
}

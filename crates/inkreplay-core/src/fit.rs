//! Fitting a drawing's bounds into a target box.

use crate::drawing::Drawing;
use kurbo::{Affine, Point, Rect, Size, Vec2};
use thiserror::Error;

/// Fit errors.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FitError {
    #[error("Invalid geometry: source box is {width}x{height}")]
    InvalidGeometry { width: f64, height: f64 },
}

fn check_source(source: Rect) -> Result<Rect, FitError> {
    let source = source.abs();
    if source.width() > 0.0 && source.height() > 0.0 {
        Ok(source)
    } else {
        Err(FitError::InvalidGeometry {
            width: source.width(),
            height: source.height(),
        })
    }
}

/// Scale `source` by `(scale_x, scale_y)` and place it in `target`,
/// top-left aligned with any leftover space split evenly on both sides.
fn place(source: Rect, scale_x: f64, scale_y: f64, target: Rect) -> Affine {
    let scaled = Size::new(source.width() * scale_x, source.height() * scale_y);
    let slack = Vec2::new(
        (target.width() - scaled.width) / 2.0,
        (target.height() - scaled.height) / 2.0,
    );
    let offset = Vec2::new(
        target.x0 - source.x0 * scale_x + slack.x,
        target.y0 - source.y0 * scale_y + slack.y,
    );
    Affine::translate(offset) * Affine::scale_non_uniform(scale_x, scale_y)
}

/// Transform mapping `source` onto a box at `target_origin` with height
/// `target_height`.
///
/// The width is matched too when `target_width` is given; otherwise the
/// aspect ratio of `source` is kept.
pub fn fit(
    source: Rect,
    target_origin: Point,
    target_height: f64,
    target_width: Option<f64>,
) -> Result<Affine, FitError> {
    let source = check_source(source)?;
    let scale_y = target_height / source.height();
    let scale_x = match target_width {
        Some(width) => width / source.width(),
        None => scale_y,
    };
    let target = Rect::from_origin_size(
        target_origin,
        Size::new(
            target_width.unwrap_or(source.width() * scale_x),
            target_height,
        ),
    );
    Ok(place(source, scale_x, scale_y, target))
}

/// Transform shrinking or growing `source` to fit inside `target`, keeping its
/// aspect ratio and centering it along the axis with room to spare.
pub fn fit_contain(source: Rect, target: Rect) -> Result<Affine, FitError> {
    let source = check_source(source)?;
    let target = target.abs();
    let scale = (target.width() / source.width()).min(target.height() / source.height());
    Ok(place(source, scale, scale, target))
}

/// New drawing with `transform` applied to every point.
pub fn apply(transform: Affine, drawing: &Drawing) -> Drawing {
    drawing.transformed(transform)
}

/// Fit a whole drawing at `target_origin`; see [`fit`].
pub fn fit_drawing(
    drawing: &Drawing,
    target_origin: Point,
    target_height: f64,
    target_width: Option<f64>,
) -> Result<Drawing, FitError> {
    let bounds = drawing.bounds().unwrap_or(Rect::ZERO);
    let transform = fit(bounds, target_origin, target_height, target_width)?;
    log::debug!(
        "Fitting drawing {:?} into origin {:?}, height {}, width {:?}",
        bounds,
        target_origin,
        target_height,
        target_width
    );
    Ok(apply(transform, drawing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{Ink, Stroke, StrokePoint};

    fn assert_point(actual: Point, x: f64, y: f64) {
        assert!((actual.x - x).abs() < 1e-10, "x: {} != {}", actual.x, x);
        assert!((actual.y - y).abs() < 1e-10, "y: {} != {}", actual.y, y);
    }

    fn drawing_spanning(rect: Rect) -> Drawing {
        Drawing::from_strokes(vec![Stroke::new(
            Ink::default(),
            vec![
                StrokePoint::new(Point::new(rect.x0, rect.y0), 0.0),
                StrokePoint::new(Point::new(rect.x1, rect.y1), 0.25),
            ],
            42.0,
        )])
    }

    #[test]
    fn test_fit_height_keeps_aspect() {
        let source = Rect::new(0.0, 0.0, 200.0, 100.0);
        let transform = fit(source, Point::new(100.0, 300.0), 100.0, None).unwrap();

        let coeffs = transform.as_coeffs();
        assert!((coeffs[0] - 1.0).abs() < 1e-12);
        assert!((coeffs[3] - 1.0).abs() < 1e-12);

        let fitted = apply(transform, &drawing_spanning(source)).bounds().unwrap();
        assert_point(fitted.origin(), 100.0, 300.0);
        assert!((fitted.width() - 200.0).abs() < 1e-10);
        assert!((fitted.height() - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_fit_scales_offset_source() {
        let source = Rect::new(50.0, 50.0, 150.0, 100.0);
        let transform = fit(source, Point::ZERO, 100.0, None).unwrap();
        assert_point(transform * Point::new(50.0, 50.0), 0.0, 0.0);
        assert_point(transform * Point::new(150.0, 100.0), 200.0, 100.0);
    }

    #[test]
    fn test_fit_matches_width() {
        let source = Rect::new(0.0, 0.0, 200.0, 100.0);
        let transform = fit(source, Point::new(10.0, 10.0), 50.0, Some(40.0)).unwrap();
        assert_point(transform * Point::new(0.0, 0.0), 10.0, 10.0);
        assert_point(transform * Point::new(200.0, 100.0), 50.0, 60.0);
    }

    #[test]
    fn test_fit_zero_height_is_invalid() {
        let source = Rect::new(0.0, 10.0, 200.0, 10.0);
        let result = fit(source, Point::ZERO, 100.0, None);
        assert!(matches!(result, Err(FitError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_fit_zero_width_is_invalid() {
        let source = Rect::new(5.0, 0.0, 5.0, 100.0);
        assert!(fit(source, Point::ZERO, 100.0, Some(10.0)).is_err());
        assert!(fit_contain(source, Rect::new(0.0, 0.0, 10.0, 10.0)).is_err());
    }

    #[test]
    fn test_fit_contain_centers_slack() {
        let source = Rect::new(0.0, 0.0, 200.0, 100.0);
        let transform = fit_contain(source, Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        assert_point(transform * Point::new(0.0, 0.0), 0.0, 25.0);
        assert_point(transform * Point::new(200.0, 100.0), 100.0, 75.0);
    }

    #[test]
    fn test_apply_copies_ink_and_timing() {
        let drawing = drawing_spanning(Rect::new(0.0, 0.0, 10.0, 10.0));
        let moved = apply(Affine::translate((1.0, 2.0)), &drawing);

        assert_eq!(drawing.strokes[0].points[0].location, Point::new(0.0, 0.0));
        assert_eq!(moved.strokes[0].ink, drawing.strokes[0].ink);
        assert_eq!(moved.strokes[0].created_at, 42.0);
        assert_eq!(moved.strokes[0].points[1].time_offset, 0.25);
        assert_point(moved.strokes[0].points[1].location, 11.0, 12.0);
    }

    #[test]
    fn test_fit_empty_drawing_is_invalid() {
        let result = fit_drawing(&Drawing::new(), Point::ZERO, 100.0, None);
        assert!(matches!(result, Err(FitError::InvalidGeometry { .. })));
    }
}

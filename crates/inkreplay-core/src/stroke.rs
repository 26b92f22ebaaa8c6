//! Strokes: inks, timed sample points, and capture.

use crate::time::{Instant, SystemTime, UNIX_EPOCH};
use kurbo::{Affine, Point, Rect, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn blue() -> Self {
        Self::new(0, 122, 255, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// The drawing tool a stroke was made with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InkKind {
    #[default]
    Pen,
    Pencil,
    Marker,
    Monoline,
    FountainPen,
    Watercolor,
    Crayon,
}

/// Tool, color and nominal width of a stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ink {
    pub kind: InkKind,
    pub color: SerializableColor,
    pub width: f64,
}

impl Ink {
    pub fn new(kind: InkKind, color: impl Into<SerializableColor>, width: f64) -> Self {
        Self {
            kind,
            color: color.into(),
            width,
        }
    }

    /// Get the ink color as a peniko Color.
    pub fn color(&self) -> Color {
        self.color.into()
    }
}

impl Default for Ink {
    fn default() -> Self {
        Self {
            kind: InkKind::Pen,
            color: SerializableColor::blue(),
            width: 10.0,
        }
    }
}

/// A single sample of a stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    /// Position in drawing coordinates.
    pub location: Point,
    /// Seconds since the first sample of the stroke.
    pub time_offset: f64,
    /// Rendered size of the sample.
    pub size: Size,
    pub opacity: f64,
    pub force: f64,
    /// Radians.
    pub azimuth: f64,
    /// Radians, PI/2 is perpendicular to the surface.
    pub altitude: f64,
}

impl StrokePoint {
    /// Create a sample with neutral pen metadata.
    pub fn new(location: Point, time_offset: f64) -> Self {
        Self {
            location,
            time_offset,
            size: Size::new(1.0, 1.0),
            opacity: 1.0,
            force: 1.0,
            azimuth: 0.0,
            altitude: std::f64::consts::FRAC_PI_2,
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_force(mut self, force: f64) -> Self {
        self.force = force;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_angles(mut self, azimuth: f64, altitude: f64) -> Self {
        self.azimuth = azimuth;
        self.altitude = altitude;
        self
    }

    /// Apply an affine transform to the location. The size follows the
    /// transform's axis scales; timing and pen metadata are kept.
    pub fn transformed(&self, affine: Affine) -> Self {
        let [a, b, c, d, _, _] = affine.as_coeffs();
        let scale_x = a.hypot(b);
        let scale_y = c.hypot(d);
        Self {
            location: affine * self.location,
            size: Size::new(self.size.width * scale_x, self.size.height * scale_y),
            ..self.clone()
        }
    }

    /// Blend two samples; `t = 0` gives `a`, `t = 1` gives `b`.
    ///
    /// Azimuth turns the short way round the circle.
    pub fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let mix = |x: f64, y: f64| x + (y - x) * t;
        let turn = (b.azimuth - a.azimuth + PI).rem_euclid(TAU) - PI;
        Self {
            location: a.location.lerp(b.location, t),
            time_offset: mix(a.time_offset, b.time_offset),
            size: Size::new(mix(a.size.width, b.size.width), mix(a.size.height, b.size.height)),
            opacity: mix(a.opacity, b.opacity),
            force: mix(a.force, b.force),
            azimuth: a.azimuth + turn * t,
            altitude: mix(a.altitude, b.altitude),
        }
    }
}

/// One continuous pen drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub ink: Ink,
    /// Samples in capture order.
    pub points: Vec<StrokePoint>,
    /// Seconds since the Unix epoch.
    pub created_at: f64,
}

impl Stroke {
    pub fn new(ink: Ink, points: Vec<StrokePoint>, created_at: f64) -> Self {
        Self {
            ink,
            points,
            created_at,
        }
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Recorded duration in seconds (offset of the last sample).
    pub fn duration(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.time_offset)
    }

    /// Bounding box of the sample locations, `None` for an empty stroke.
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.points.first()?.location;
        let mut min_x = first.x;
        let mut min_y = first.y;
        let mut max_x = first.x;
        let mut max_y = first.y;

        for point in &self.points[1..] {
            min_x = min_x.min(point.location.x);
            min_y = min_y.min(point.location.y);
            max_x = max_x.max(point.location.x);
            max_y = max_y.max(point.location.y);
        }

        Some(Rect::new(min_x, min_y, max_x, max_y))
    }

    /// Copy of this stroke holding only the first `count` points.
    pub fn truncated(&self, count: usize) -> Self {
        let count = count.min(self.points.len());
        Self {
            ink: self.ink.clone(),
            points: self.points[..count].to_vec(),
            created_at: self.created_at,
        }
    }

    /// Copy of this stroke with every point transformed.
    pub fn transformed(&self, affine: Affine) -> Self {
        Self {
            ink: self.ink.clone(),
            points: self.points.iter().map(|p| p.transformed(affine)).collect(),
            created_at: self.created_at,
        }
    }
}

/// Records live samples into a [`Stroke`].
///
/// Time offsets are measured from the first sample, so the replay speed of
/// the result matches the speed it was drawn at.
#[derive(Debug, Clone)]
pub struct StrokeBuilder {
    ink: Ink,
    created_at: f64,
    started: Option<Instant>,
    points: Vec<StrokePoint>,
}

impl StrokeBuilder {
    pub fn new(ink: Ink) -> Self {
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        Self {
            ink,
            created_at,
            started: None,
            points: Vec::new(),
        }
    }

    /// Record a sample taken at `at`, with neutral pen metadata.
    pub fn add_sample(&mut self, location: Point, at: Instant) {
        let size = Size::new(self.ink.width, self.ink.width);
        self.add_point(location, at, |p| p.with_size(size));
    }

    /// Record a sample, letting `decorate` fill in pen metadata.
    pub fn add_point(
        &mut self,
        location: Point,
        at: Instant,
        decorate: impl FnOnce(StrokePoint) -> StrokePoint,
    ) {
        let started = *self.started.get_or_insert(at);
        let offset = at.saturating_duration_since(started).as_secs_f64();
        self.points.push(decorate(StrokePoint::new(location, offset)));
    }

    /// Get the number of recorded points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn finish(self) -> Stroke {
        Stroke::new(self.ink, self.points, self.created_at)
    }
}

//! Stroke replay animation.
//!
//! [`ReplayAnimator`] redraws a captured drawing one stroke at a time at the
//! pace it was recorded. It owns no timer: whatever schedules frames calls
//! [`ReplayAnimator::tick`] with the current time and renders the result.

use crate::drawing::Drawing;
use crate::sampler::PathSampler;
use crate::stroke::{Stroke, StrokePoint};
use crate::time::Instant;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Default playback speed (recorded pace).
pub const DEFAULT_SPEED: f64 = 1.0;

/// Replay errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReplayError {
    #[error("Nothing to replay: drawing has no strokes")]
    EmptyDrawing,
    #[error("Stroke {index} has no points")]
    DegenerateStroke { index: usize },
    #[error("Replay speed must be finite and positive, got {speed}")]
    InvalidSpeed { speed: f64 },
}

/// Playback settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Multiplier on elapsed time; 2.0 replays twice as fast as drawn.
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Append an interpolated point at the exact playhead position instead of
    /// stopping at the last whole sample.
    #[serde(default)]
    pub interpolate_tail: bool,
}

fn default_speed() -> f64 {
    DEFAULT_SPEED
}

impl ReplayConfig {
    /// Reject settings under which a replay could never finish.
    pub fn validate(&self) -> Result<(), ReplayError> {
        if self.speed.is_finite() && self.speed > 0.0 {
            Ok(())
        } else {
            Err(ReplayError::InvalidSpeed { speed: self.speed })
        }
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            interpolate_tail: false,
        }
    }
}

/// Where the replay is within the source drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationCursor {
    pub stroke_index: usize,
    /// Parametric position within the current stroke.
    pub value: f64,
    pub last_tick: Instant,
}

impl AnimationCursor {
    fn new(now: Instant) -> Self {
        Self {
            stroke_index: 0,
            value: 0.0,
            last_tick: now,
        }
    }
}

/// Lifecycle of a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayState {
    Idle,
    Running,
    Finished,
}

/// Destination the animator writes strokes into.
pub trait ReplaySink {
    /// Remove everything, ready for a new run.
    fn reset(&mut self);

    /// Replace the stroke at `index`, or append it when `index` is the next
    /// unseen one.
    fn put_stroke(&mut self, index: usize, stroke: Stroke);
}

impl ReplaySink for Drawing {
    fn reset(&mut self) {
        self.clear();
    }

    fn put_stroke(&mut self, index: usize, stroke: Stroke) {
        self.set_stroke(index, stroke);
    }
}

/// Copy-on-write: a renderer holding an earlier snapshot keeps it intact.
impl ReplaySink for Arc<Drawing> {
    fn reset(&mut self) {
        *self = Arc::new(Drawing::new());
    }

    fn put_stroke(&mut self, index: usize, stroke: Stroke) {
        Arc::make_mut(self).set_stroke(index, stroke);
    }
}

/// Replays a source drawing into a sink, stroke by stroke.
#[derive(Debug)]
pub struct ReplayAnimator<S = Arc<Drawing>> {
    source: Vec<Stroke>,
    cursor: Option<AnimationCursor>,
    sink: S,
    config: ReplayConfig,
}

impl Default for ReplayAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayAnimator {
    /// Create an animator rendering into a shared snapshot.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(Drawing::new()))
    }

    /// Cheap handle to the current visible drawing.
    pub fn snapshot(&self) -> Arc<Drawing> {
        Arc::clone(&self.sink)
    }
}

impl<S: ReplaySink> ReplayAnimator<S> {
    pub fn with_sink(sink: S) -> Self {
        Self {
            source: Vec::new(),
            cursor: None,
            sink,
            config: ReplayConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReplayConfig) -> Result<Self, ReplayError> {
        self.set_config(config)?;
        Ok(self)
    }

    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Replace the playback settings. Invalid settings leave the current ones in place.
    pub fn set_config(&mut self, config: ReplayConfig) -> Result<(), ReplayError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// The drawing being built up.
    pub fn visible(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn cursor(&self) -> Option<&AnimationCursor> {
        self.cursor.as_ref()
    }

    pub fn stroke_count(&self) -> usize {
        self.source.len()
    }

    pub fn state(&self) -> ReplayState {
        match &self.cursor {
            None => ReplayState::Idle,
            Some(c) if c.stroke_index >= self.source.len() => ReplayState::Finished,
            Some(_) => ReplayState::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == ReplayState::Running
    }

    /// Fraction of strokes completed, 0.0 when idle.
    pub fn progress(&self) -> f64 {
        match (&self.cursor, self.source.len()) {
            (Some(c), total) if total > 0 => c.stroke_index as f64 / total as f64,
            _ => 0.0,
        }
    }

    /// Begin replaying `drawing` from its first stroke.
    ///
    /// Any run in progress is dropped and the sink is cleared. An empty
    /// drawing changes nothing.
    pub fn start(&mut self, drawing: Drawing, now: Instant) -> Result<(), ReplayError> {
        if drawing.is_empty() {
            log::debug!("Replay not started: {}", ReplayError::EmptyDrawing);
            return Err(ReplayError::EmptyDrawing);
        }

        if self.is_running() {
            log::debug!("Restarting replay, dropping previous run");
        }
        self.source = drawing.strokes;
        self.sink.reset();
        self.cursor = Some(AnimationCursor::new(now));
        log::debug!("Replay started: {} strokes", self.source.len());
        Ok(())
    }

    /// Advance the replay to `now` and write the current stroke into the sink.
    ///
    /// Returns the state after the tick. Does nothing unless running.
    pub fn tick(&mut self, now: Instant) -> ReplayState {
        let total = self.source.len();
        let Some(cursor) = self.cursor.as_mut() else {
            return ReplayState::Idle;
        };
        if cursor.stroke_index >= total {
            return ReplayState::Finished;
        }

        let elapsed = now.saturating_duration_since(cursor.last_tick).as_secs_f64();
        cursor.last_tick = now;

        let index = cursor.stroke_index;
        let stroke = &self.source[index];
        let sampler = PathSampler::new(stroke);

        let complete = match sampler.end() {
            None => {
                log::warn!("{}, skipping", ReplayError::DegenerateStroke { index });
                self.sink.put_stroke(index, stroke.clone());
                true
            }
            Some(end) => {
                let value = sampler.advance(cursor.value, elapsed * self.config.speed);
                cursor.value = value;
                if value >= end {
                    self.sink.put_stroke(index, stroke.clone());
                    true
                } else {
                    let partial = partial_stroke(stroke, value, self.config.interpolate_tail);
                    self.sink.put_stroke(index, partial);
                    false
                }
            }
        };

        if complete {
            cursor.value = 0.0;
            cursor.stroke_index += 1;
            log::debug!("Stroke {}/{} replayed", cursor.stroke_index, total);
            if cursor.stroke_index == total {
                log::debug!("Replay finished");
                return ReplayState::Finished;
            }
        }
        ReplayState::Running
    }

    /// Abandon the replay. The sink keeps whatever was drawn so far.
    pub fn stop(&mut self) {
        if self.cursor.take().is_some() {
            log::debug!("Replay stopped");
        }
    }
}

/// The part of `stroke` drawn by parametric position `value`: every whole
/// sample before it, plus the playhead when `interpolate` is set.
///
/// The playhead point blends every field of the two samples around it
/// (location, timing, size and pen metadata) by the fractional part of `value`.
fn partial_stroke(stroke: &Stroke, value: f64, interpolate: bool) -> Stroke {
    let whole = value.floor() as usize;
    let mut partial = stroke.truncated(whole);

    let t = value - whole as f64;
    if interpolate && t > 0.0 {
        if let [a, b, ..] = &stroke.points[whole.min(stroke.len())..] {
            partial.points.push(StrokePoint::lerp(a, b, t));
        }
    }
    partial
}

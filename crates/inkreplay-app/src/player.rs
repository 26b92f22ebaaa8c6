//! Fixed-cadence driver for a [`ReplayAnimator`].

use inkreplay_core::time::{Duration, Instant};
use inkreplay_core::{Drawing, ReplayAnimator, ReplayState};
use std::ops::ControlFlow;
use std::sync::Arc;

/// Nominal frame interval (60 Hz).
pub const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Calls `tick` once per frame and hands each frame to a renderer.
///
/// A frame that runs late is not made up for: the animator measures elapsed
/// time from the clock, so the next tick simply covers more of the stroke.
#[derive(Debug, Clone, Copy)]
pub struct Player {
    frame_interval: Duration,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL)
    }
}

impl Player {
    pub fn new(frame_interval: Duration) -> Self {
        Self { frame_interval }
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Drive `animator` until it finishes or `render` breaks.
    ///
    /// Breaking stops the animator and leaves the partial drawing in place.
    /// Returns the number of frames rendered.
    pub fn run<F>(&self, animator: &mut ReplayAnimator, mut render: F) -> usize
    where
        F: FnMut(&Arc<Drawing>, ReplayState) -> ControlFlow<()>,
    {
        let mut deadline = Instant::now();
        let mut frames = 0;

        while animator.is_running() {
            deadline += self.frame_interval;
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            } else {
                // Fell behind; resync instead of firing a burst of ticks.
                deadline = now;
            }

            let state = animator.tick(Instant::now());
            frames += 1;
            if render(&animator.snapshot(), state).is_break() {
                log::debug!("Replay interrupted after {} frames", frames);
                animator.stop();
                break;
            }
        }
        frames
    }
}

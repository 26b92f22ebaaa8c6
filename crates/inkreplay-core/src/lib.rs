//! inkreplay core library
//!
//! Captured pen drawings, their storage, and the animator that redraws them
//! at the pace they were drawn.

pub mod drawing;
pub mod fit;
pub mod replay;
pub mod sampler;
pub mod storage;
pub mod stroke;

pub use drawing::Drawing;
pub use fit::{FitError, apply, fit, fit_contain, fit_drawing};
pub use replay::{AnimationCursor, ReplayAnimator, ReplayConfig, ReplayError, ReplaySink, ReplayState};
pub use sampler::PathSampler;
pub use storage::{MemoryStorage, Storage, StorageError, StorageResult};
pub use stroke::{Ink, InkKind, SerializableColor, Stroke, StrokeBuilder, StrokePoint};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;

/// Clock types, from `web-time` on wasm where `std::time::Instant` is unavailable.
pub mod time {
    #[cfg(not(target_arch = "wasm32"))]
    pub use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    #[cfg(target_arch = "wasm32")]
    pub use web_time::{Duration, Instant, SystemTime, UNIX_EPOCH};
}

//! Storage of drawings by name.

mod codec;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use codec::{deserialize, serialize};
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::drawing::Drawing;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Drawing not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Corrupt drawing data: {0}")]
    CorruptData(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for drawing storage backends.
///
/// Names are chosen by the caller; backends may sanitize them but must load
/// a drawing back under the same name it was saved with.
pub trait Storage {
    /// Save a drawing, replacing any drawing with the same name.
    fn save(&self, name: &str, drawing: &Drawing) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a drawing.
    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<Drawing>>;

    /// Delete a drawing. Deleting a missing name is not an error.
    fn delete(&self, name: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all saved names, sorted.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a drawing exists.
    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

#[cfg(test)]
pub(crate) mod test_util {
    /// Minimal executor: the storage futures never actually wait.
    pub fn block_on<F: std::future::Future>(f: F) -> F::Output {
        use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

        fn dummy_raw_waker() -> RawWaker {
            fn no_op(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                dummy_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
            RawWaker::new(std::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
        let mut cx = Context::from_waker(&waker);
        let mut f = std::pin::pin!(f);

        loop {
            if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
                return result;
            }
        }
    }
}

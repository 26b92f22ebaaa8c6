//! In-memory storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::drawing::Drawing;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    drawings: RwLock<BTreeMap<String, Drawing>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl Storage for MemoryStorage {
    fn save(&self, name: &str, drawing: &Drawing) -> BoxFuture<'_, StorageResult<()>> {
        let name = name.to_string();
        let drawing = drawing.clone();
        Box::pin(async move {
            let mut drawings = self.drawings.write().map_err(lock_error)?;
            drawings.insert(name, drawing);
            Ok(())
        })
    }

    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<Drawing>> {
        let name = name.to_string();
        Box::pin(async move {
            let drawings = self.drawings.read().map_err(lock_error)?;
            drawings
                .get(&name)
                .cloned()
                .ok_or(StorageError::NotFound(name))
        })
    }

    fn delete(&self, name: &str) -> BoxFuture<'_, StorageResult<()>> {
        let name = name.to_string();
        Box::pin(async move {
            let mut drawings = self.drawings.write().map_err(lock_error)?;
            drawings.remove(&name);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let drawings = self.drawings.read().map_err(lock_error)?;
            Ok(drawings.keys().cloned().collect())
        })
    }

    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let name = name.to_string();
        Box::pin(async move {
            let drawings = self.drawings.read().map_err(lock_error)?;
            Ok(drawings.contains_key(&name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_util::block_on;
    use crate::stroke::{Ink, Stroke, StrokePoint};
    use kurbo::Point;

    fn dot(x: f64) -> Drawing {
        Drawing::from_strokes(vec![Stroke::new(
            Ink::default(),
            vec![StrokePoint::new(Point::new(x, x), 0.0)],
            0.0,
        )])
    }

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let drawing = dot(1.0);

        block_on(storage.save("sketch", &drawing)).unwrap();
        let loaded = block_on(storage.load("sketch")).unwrap();

        assert_eq!(loaded, drawing);
    }

    #[test]
    fn test_save_overwrites() {
        let storage = MemoryStorage::new();
        block_on(storage.save("sketch", &dot(1.0))).unwrap();
        block_on(storage.save("sketch", &dot(2.0))).unwrap();

        assert_eq!(block_on(storage.load("sketch")).unwrap(), dot(2.0));
        assert_eq!(block_on(storage.list()).unwrap().len(), 1);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("nonexistent"));

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_delete() {
        let storage = MemoryStorage::new();

        block_on(storage.save("sketch", &dot(1.0))).unwrap();
        assert!(block_on(storage.exists("sketch")).unwrap());
        block_on(storage.delete("sketch")).unwrap();
        assert!(!block_on(storage.exists("sketch")).unwrap());
        block_on(storage.delete("sketch")).unwrap();
    }

    #[test]
    fn test_list_sorted() {
        let storage = MemoryStorage::new();

        block_on(storage.save("b", &dot(1.0))).unwrap();
        block_on(storage.save("a", &dot(2.0))).unwrap();

        assert_eq!(block_on(storage.list()).unwrap(), vec!["a".to_string(), "b".to_string()]);
    }
}

//! Byte encoding of drawings.
//!
//! Drawings are stored as JSON. Stroke order, point order and every sample
//! field survive a round trip exactly.

use super::{StorageError, StorageResult};
use crate::drawing::Drawing;

/// Encode a drawing.
pub fn serialize(drawing: &Drawing) -> StorageResult<Vec<u8>> {
    serde_json::to_vec_pretty(drawing).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Decode a drawing, failing with [`StorageError::CorruptData`] on malformed bytes.
pub fn deserialize(bytes: &[u8]) -> StorageResult<Drawing> {
    serde_json::from_slice(bytes).map_err(|e| StorageError::CorruptData(e.to_string()))
}

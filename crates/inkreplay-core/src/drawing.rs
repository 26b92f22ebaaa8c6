//! Drawing: the ordered collection of strokes on one canvas.

use crate::stroke::Stroke;
use kurbo::{Affine, Rect};
use serde::{Deserialize, Serialize};

/// A drawing, strokes back to front in capture order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub strokes: Vec<Stroke>,
}

impl Drawing {
    /// Create a new empty drawing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_strokes(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }

    /// Append a stroke on top.
    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Replace the stroke at `index`, or append when `index` is one past the end.
    pub fn set_stroke(&mut self, index: usize, stroke: Stroke) {
        if let Some(slot) = self.strokes.get_mut(index) {
            *slot = stroke;
        } else {
            debug_assert_eq!(index, self.strokes.len(), "strokes are only appended in order");
            self.strokes.push(stroke);
        }
    }

    /// Remove all strokes.
    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    /// Check if the drawing has no strokes.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Get the number of strokes.
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Total number of sample points over all strokes.
    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(Stroke::len).sum()
    }

    /// Get the bounding box of all points, `None` if there are none.
    pub fn bounds(&self) -> Option<Rect> {
        self.strokes
            .iter()
            .filter_map(Stroke::bounds)
            .reduce(|acc, b| acc.union(b))
    }

    /// New drawing with every point transformed; `self` is untouched.
    pub fn transformed(&self, affine: Affine) -> Self {
        Self {
            strokes: self.strokes.iter().map(|s| s.transformed(affine)).collect(),
        }
    }

    /// Serialize the drawing to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a drawing from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl FromIterator<Stroke> for Drawing {
    fn from_iter<I: IntoIterator<Item = Stroke>>(iter: I) -> Self {
        Self::from_strokes(iter.into_iter().collect())
    }
}

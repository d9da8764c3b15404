//! Vector index trait for nearest-neighbor lookup over embeddings.

use crate::error::Result;

/// A single nearest-neighbor hit returned by a [`VectorIndex`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Positional identifier of the matched row, aligned with corpus order
    /// at index build time.
    pub position: usize,
    /// Non-negative dissimilarity under the index's metric; lower is more
    /// similar.
    pub distance: f32,
}

/// A prebuilt nearest-neighbor index over fixed-dimension `f32` vectors.
///
/// The index is an opaque "nearest-k under metric M" black box: any exact or
/// approximate structure (flat L2, IVF, HNSW) qualifies as long as it returns
/// ranked distances and stable positional identifiers. Lookup is a pure
/// in-process computation and the seam is synchronous; the async boundary of
/// a retrieval lives at the embedding provider.
pub trait VectorIndex: Send + Sync {
    /// Return the `k` nearest neighbors of `query`, ordered by ascending
    /// distance. Ties are broken in the index's native order, which is
    /// unspecified.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::DimensionMismatch`](crate::RetrievalError::DimensionMismatch)
    /// if `query` does not match the index dimensionality.
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>>;

    /// Number of rows in the index.
    fn len(&self) -> usize;

    /// Whether the index holds no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimensionality of the indexed vectors.
    fn dimensions(&self) -> usize;
}

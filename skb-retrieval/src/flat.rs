//! Exact flat index over squared-L2 distance.
//!
//! [`FlatIndex`] is the shipped [`VectorIndex`] implementation: a brute-force
//! scan over row-major `f32` vectors. Distances are squared Euclidean, so an
//! identical vector scores exactly 0 and ranking is ascending. The on-disk
//! artifact is versioned JSON, written atomically.

use std::cmp::Ordering;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, RetrievalError};
use crate::index::{Neighbor, VectorIndex};

/// Artifact schema version accepted by [`FlatIndex::load`].
pub const FLAT_INDEX_SCHEMA_VERSION: u32 = 1;

/// An exact nearest-neighbor index using squared-L2 distance.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatIndex {
    dimensions: usize,
    rows: Vec<Vec<f32>>,
}

#[derive(Serialize, Deserialize)]
struct PersistedFlatIndex {
    schema_version: u32,
    dimensions: usize,
    rows: Vec<Vec<f32>>,
}

impl FlatIndex {
    /// Build an index from vectors in corpus order.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::IndexError`] if `rows` is empty or the first
    /// row is zero-length, and [`RetrievalError::DimensionMismatch`] if the
    /// rows are not uniform in dimensionality.
    pub fn from_vectors(rows: Vec<Vec<f32>>) -> Result<Self> {
        let dimensions = rows.first().map_or(0, Vec::len);
        if dimensions == 0 {
            return Err(RetrievalError::IndexError(
                "flat index requires at least one non-empty row".to_string(),
            ));
        }
        for row in &rows {
            if row.len() != dimensions {
                return Err(RetrievalError::DimensionMismatch {
                    expected: dimensions,
                    actual: row.len(),
                });
            }
        }
        Ok(Self { dimensions, rows })
    }

    /// Load the index artifact from disk.
    ///
    /// # Errors
    ///
    /// Fails fast on unreadable files, schema-version mismatches, and rows
    /// inconsistent with the recorded dimensionality; an index that fails
    /// here must never serve queries.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let persisted: PersistedFlatIndex = serde_json::from_slice(&bytes)?;
        if persisted.schema_version != FLAT_INDEX_SCHEMA_VERSION {
            return Err(RetrievalError::IndexError(format!(
                "unsupported flat index schema_version {} (expected {FLAT_INDEX_SCHEMA_VERSION})",
                persisted.schema_version
            )));
        }
        let index = Self::from_vectors(persisted.rows)?;
        if index.dimensions != persisted.dimensions {
            return Err(RetrievalError::DimensionMismatch {
                expected: persisted.dimensions,
                actual: index.dimensions,
            });
        }
        debug!(path = %path.display(), rows = index.len(), dimensions = index.dimensions, "loaded flat index artifact");
        Ok(index)
    }

    /// Write the index artifact to disk.
    ///
    /// The artifact is written to a temporary sibling file and renamed into
    /// place.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let persisted = PersistedFlatIndex {
            schema_version: FLAT_INDEX_SCHEMA_VERSION,
            dimensions: self.dimensions,
            rows: self.rows.clone(),
        };
        let bytes = serde_json::to_vec(&persisted)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

impl VectorIndex for FlatIndex {
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if query.len() != self.dimensions {
            return Err(RetrievalError::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }

        let mut neighbors: Vec<Neighbor> = self
            .rows
            .iter()
            .enumerate()
            .map(|(position, row)| Neighbor { position, distance: squared_l2(query, row) })
            .collect();

        // Stable sort: ties keep row order.
        neighbors.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
        neighbors.truncate(k);

        Ok(neighbors)
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_first_with_exact_match_at_zero() {
        let index = FlatIndex::from_vectors(vec![
            vec![1.0, 0.0, 0.0],
            vec![0.9, 0.1, 0.0],
            vec![0.0, 1.0, 0.0],
        ])
        .unwrap();

        let neighbors = index.search(&[1.0, 0.0, 0.0], 2).unwrap();
        assert_eq!(neighbors.len(), 2);
        assert_eq!(neighbors[0].position, 0);
        assert_eq!(neighbors[0].distance, 0.0);
        assert_eq!(neighbors[1].position, 1);
        assert!(neighbors[1].distance > 0.0);
    }

    #[test]
    fn k_larger_than_rows_returns_all_rows() {
        let index = FlatIndex::from_vectors(vec![vec![0.0, 0.0], vec![1.0, 1.0]]).unwrap();
        let neighbors = index.search(&[0.0, 0.0], 10).unwrap();
        assert_eq!(neighbors.len(), 2);
    }

    #[test]
    fn ties_keep_row_order() {
        // Both rows are equidistant from the query.
        let index = FlatIndex::from_vectors(vec![vec![1.0, 0.0], vec![-1.0, 0.0]]).unwrap();
        let neighbors = index.search(&[0.0, 0.0], 2).unwrap();
        assert_eq!(neighbors[0].position, 0);
        assert_eq!(neighbors[1].position, 1);
    }

    #[test]
    fn rejects_query_dimension_mismatch() {
        let index = FlatIndex::from_vectors(vec![vec![1.0, 0.0, 0.0]]).unwrap();
        let err = index.search(&[1.0, 0.0], 1).unwrap_err();
        assert!(matches!(
            err,
            RetrievalError::DimensionMismatch { expected: 3, actual: 2 }
        ));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = FlatIndex::from_vectors(vec![vec![1.0, 2.0], vec![1.0]]).unwrap_err();
        assert!(matches!(err, RetrievalError::DimensionMismatch { .. }));
    }

    #[test]
    fn rejects_empty_build() {
        assert!(FlatIndex::from_vectors(vec![]).is_err());
        assert!(FlatIndex::from_vectors(vec![vec![]]).is_err());
    }
}

//! Persistence of dendrograms.
//!
//! A tree is fully described by its leaf count and the `left`, `right`,
//! `height` and `order` arrays. The cutoff is not persisted.

use crate::{HacError, Result};

use super::DendroTree;

/// The arrays that describe a [`DendroTree`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TreeArrays {
    /// The number of leaves.
    pub num_leaves: usize,
    /// The left child of every node.
    pub left: Vec<Option<usize>>,
    /// The right child of every node.
    pub right: Vec<Option<usize>>,
    /// The height of every node.
    pub height: Vec<f64>,
    /// Internal node ids by ascending height.
    pub order: Vec<usize>,
}

/// Writes and reads structs to and from disk in binary format using `bincode`.
pub trait DiskIO: Sized {
    /// Encodes the struct.
    ///
    /// # Errors
    ///
    /// - If the struct cannot be encoded.
    fn to_bytes(&self) -> Result<Vec<u8>>;

    /// Decodes the struct.
    ///
    /// # Errors
    ///
    /// - If the bytes cannot be decoded into a valid struct.
    fn from_bytes(bytes: &[u8]) -> Result<Self>;

    /// Writes the struct to disk.
    ///
    /// # Errors
    ///
    /// - If the struct cannot be encoded.
    /// - If the file cannot be written.
    fn write_to<P: AsRef<std::path::Path>>(&self, path: &P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes).map_err(HacError::from)
    }

    /// Reads the struct from disk.
    ///
    /// # Errors
    ///
    /// - If the file cannot be read.
    /// - If the struct cannot be decoded.
    fn read_from<P: AsRef<std::path::Path>>(path: &P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}

impl DendroTree {
    /// The arrays that describe the tree.
    #[must_use]
    pub fn arrays(&self) -> TreeArrays {
        TreeArrays {
            num_leaves: self.num_leaves,
            left: self.left.clone(),
            right: self.right.clone(),
            height: self.height.clone(),
            order: self.order.clone(),
        }
    }

    /// Reconstructs a tree from its arrays.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if the arrays do not describe a complete tree.
    pub fn from_arrays(arrays: TreeArrays) -> Result<Self> {
        let TreeArrays {
            num_leaves: n,
            left,
            right,
            height,
            order,
        } = arrays;
        let invalid = |message: String| HacError::InvalidParameter { name: "arrays", message };

        let nodes = (2 * n).saturating_sub(1);
        if left.len() != nodes || right.len() != nodes || height.len() != nodes {
            return Err(invalid(format!("expected {nodes} nodes for {n} leaves")));
        }
        for node in 0..nodes {
            let valid = match (left[node], right[node]) {
                (None, None) => node < n,
                (Some(l), Some(r)) => node >= n && l < node && r < node && l != r,
                _ => false,
            };
            if !valid {
                return Err(invalid(format!("node {node} has invalid children")));
            }
        }

        let tree = Self::from_parts(n, left, right, height);
        if tree.order != order {
            return Err(invalid("order does not match the heights".to_string()));
        }
        Ok(tree)
    }
}

impl DiskIO for DendroTree {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(&self.arrays())?)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let arrays: TreeArrays = bincode::deserialize(bytes)?;
        Self::from_arrays(arrays)
    }
}

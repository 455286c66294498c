//! CPU-side mesh representation used by loaders.

use crate::error::{AssetError, AssetResult};

/// Loaded mesh geometry: one shared position buffer with separate quad and
/// triangle index batches. Positions are in object space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshAsset {
    pub positions: Vec<[f32; 3]>,
    /// Four indices per face, in file order.
    pub quad_indices: Vec<u32>,
    /// Three indices per face.
    pub triangle_indices: Vec<u32>,
}

impl MeshAsset {
    pub fn new(positions: Vec<[f32; 3]>, quad_indices: Vec<u32>, triangle_indices: Vec<u32>) -> Self {
        Self {
            positions,
            quad_indices,
            triangle_indices,
        }
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.quad_indices.len() / 4
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangle_indices.len() / 3
    }

    /// Returns `true` if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.quad_indices.is_empty() && self.triangle_indices.is_empty()
    }

    /// Check batch lengths and that every index points into `positions`.
    pub fn validate(&self) -> AssetResult<()> {
        if self.quad_indices.len() % 4 != 0 {
            return Err(AssetError::InvalidMesh(format!(
                "quad index count {} is not a multiple of 4",
                self.quad_indices.len()
            )));
        }
        if self.triangle_indices.len() % 3 != 0 {
            return Err(AssetError::InvalidMesh(format!(
                "triangle index count {} is not a multiple of 3",
                self.triangle_indices.len()
            )));
        }
        let len = self.positions.len();
        if let Some(bad) = self
            .quad_indices
            .iter()
            .chain(&self.triangle_indices)
            .find(|&&i| i as usize >= len)
        {
            return Err(AssetError::InvalidMesh(format!(
                "index {bad} out of range for {len} positions"
            )));
        }
        Ok(())
    }

    /// Split every quad `v0,v1,v2,v3` along the `v0-v2` diagonal into
    /// `(v0,v1,v2)` and `(v0,v2,v3)` for triangle-only pipelines.
    pub fn triangulated_quads(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.quad_count() * 6);
        for q in self.quad_indices.chunks_exact(4) {
            out.extend_from_slice(&[q[0], q[1], q[2], q[0], q[2], q[3]]);
        }
        out
    }

    /// Line-list outline of every quad (no diagonal).
    pub fn quad_edges(&self) -> Vec<u32> {
        polygon_edges(&self.quad_indices, 4)
    }

    /// Line-list outline of every triangle.
    pub fn triangle_edges(&self) -> Vec<u32> {
        polygon_edges(&self.triangle_indices, 3)
    }
}

fn polygon_edges(indices: &[u32], arity: usize) -> Vec<u32> {
    let mut out = Vec::with_capacity(indices.len() * 2);
    for face in indices.chunks_exact(arity) {
        for (i, &a) in face.iter().enumerate() {
            out.push(a);
            out.push(face[(i + 1) % arity]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> MeshAsset {
        MeshAsset::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
            vec![0, 1, 2, 3],
            vec![],
        )
    }

    #[test]
    fn quad_splits_along_first_diagonal() {
        assert_eq!(unit_quad().triangulated_quads(), vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn quad_outline_has_four_edges() {
        assert_eq!(unit_quad().quad_edges(), vec![0, 1, 1, 2, 2, 3, 3, 0]);
    }

    #[test]
    fn triangle_outline_closes_loop() {
        let mesh = MeshAsset::new(vec![[0.0; 3]; 3], vec![], vec![0, 1, 2]);
        assert_eq!(mesh.triangle_edges(), vec![0, 1, 1, 2, 2, 0]);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.quad_count(), 0);
    }

    #[test]
    fn validate_rejects_dangling_index() {
        let mut mesh = unit_quad();
        assert!(mesh.validate().is_ok());
        mesh.triangle_indices = vec![0, 1, 4];
        assert!(matches!(mesh.validate(), Err(AssetError::InvalidMesh(_))));
    }

    #[test]
    fn validate_rejects_partial_quad() {
        let mut mesh = unit_quad();
        mesh.quad_indices.push(0);
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn empty_mesh() {
        assert!(MeshAsset::default().is_empty());
        assert!(!unit_quad().is_empty());
    }
}

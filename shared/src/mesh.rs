//! Per-frame polygon mesh
//!
//! A [`Mesh`] is one animation frame: vertex positions, a flat list of face
//! vertex indices and the vertex count of every face. Frames never share
//! topology with each other.

use crate::validation::{index_in_range, MAX_FACE_SIZE};

/// Mesh construction error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    /// Face counts do not add up to the number of indices
    #[error("face counts sum to {expected} but {actual} indices were given")]
    FaceCountMismatch { expected: u64, actual: usize },

    /// Face vertex count outside 0-255
    #[error("invalid face size {0} (must be 0-{max})", max = MAX_FACE_SIZE)]
    InvalidFaceSize(i32),

    /// Index does not reference a vertex of this mesh
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: i32, vertex_count: usize },
}

/// One animation frame.
///
/// Invariants (checked by [`Mesh::new`], upheld by [`MeshBuilder`]):
/// - `face_counts` sum to `indices.len()`
/// - every index is in `0..vertices.len()` and fits `i32`
/// - every face count is in `0..=255`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<[f32; 3]>,
    indices: Vec<i32>,
    face_counts: Vec<i32>,
}

impl Mesh {
    /// Build a mesh from raw parts, validating every invariant.
    pub fn new(
        vertices: Vec<[f32; 3]>,
        indices: Vec<i32>,
        face_counts: Vec<i32>,
    ) -> Result<Self, MeshError> {
        let mut expected = 0u64;
        for &count in &face_counts {
            if !(0..=MAX_FACE_SIZE).contains(&count) {
                return Err(MeshError::InvalidFaceSize(count));
            }
            expected += count as u64;
        }
        if expected != indices.len() as u64 {
            return Err(MeshError::FaceCountMismatch {
                expected,
                actual: indices.len(),
            });
        }

        let vertex_count = vertices.len();
        if let Some(&index) = indices.iter().find(|&&index| {
            u64::try_from(index)
                .ok()
                .and_then(|i| index_in_range(i, vertex_count))
                .is_none()
        }) {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }

        Ok(Self {
            vertices,
            indices,
            face_counts,
        })
    }

    /// Vertex positions, in vertex index order
    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    /// Flat face vertex indices (0-based)
    pub fn indices(&self) -> &[i32] {
        &self.indices
    }

    /// Number of vertices of each face
    pub fn face_counts(&self) -> &[i32] {
        &self.face_counts
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.face_counts.len()
    }

    /// True for a frame with no vertices and no faces
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.face_counts.is_empty()
    }

    /// Take the mesh apart: (vertices, indices, face_counts)
    pub fn into_parts(self) -> (Vec<[f32; 3]>, Vec<i32>, Vec<i32>) {
        (self.vertices, self.indices, self.face_counts)
    }
}

/// Incremental mesh construction for parsers.
///
/// Faces must be validated against [`MeshBuilder::vertex_count`] before they
/// are pushed; the builder only debug-asserts the invariants.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    mesh: Mesh,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with room for `vertex_count` vertices
    pub fn with_vertex_capacity(vertex_count: usize) -> Self {
        Self {
            mesh: Mesh {
                vertices: Vec::with_capacity(vertex_count),
                ..Mesh::default()
            },
        }
    }

    /// Vertices declared so far
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.mesh.face_counts.len()
    }

    pub fn push_vertex(&mut self, position: [f32; 3]) {
        self.mesh.vertices.push(position);
    }

    /// Append one face of already validated indices
    pub fn push_face(&mut self, indices: &[i32]) {
        debug_assert!(indices.len() <= MAX_FACE_SIZE as usize);
        debug_assert!(indices
            .iter()
            .all(|&i| i >= 0 && (i as usize) < self.mesh.vertices.len()));
        self.mesh.face_counts.push(indices.len() as i32);
        self.mesh.indices.extend_from_slice(indices);
    }

    pub fn build(self) -> Mesh {
        self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_vertices() -> Vec<[f32; 3]> {
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
    }

    #[test]
    fn test_mesh_new_valid() {
        let mesh = Mesh::new(triangle_vertices(), vec![0, 1, 2], vec![3]).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.indices(), &[0, 1, 2]);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn test_mesh_empty_is_valid() {
        let mesh = Mesh::new(Vec::new(), Vec::new(), Vec::new()).unwrap();
        assert!(mesh.is_empty());
        assert_eq!(mesh, Mesh::default());
    }

    #[test]
    fn test_mesh_face_count_mismatch() {
        let err = Mesh::new(triangle_vertices(), vec![0, 1], vec![3]).unwrap_err();
        assert_eq!(
            err,
            MeshError::FaceCountMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_mesh_index_out_of_range() {
        let err = Mesh::new(triangle_vertices(), vec![0, 1, 3], vec![3]).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                index: 3,
                vertex_count: 3
            }
        );

        let err = Mesh::new(triangle_vertices(), vec![0, -1, 2], vec![3]).unwrap_err();
        assert!(matches!(err, MeshError::IndexOutOfRange { index: -1, .. }));
    }

    #[test]
    fn test_mesh_invalid_face_size() {
        let err = Mesh::new(triangle_vertices(), vec![], vec![256]).unwrap_err();
        assert_eq!(err, MeshError::InvalidFaceSize(256));
        let err = Mesh::new(triangle_vertices(), vec![], vec![-1]).unwrap_err();
        assert_eq!(err, MeshError::InvalidFaceSize(-1));
    }

    #[test]
    fn test_zero_sized_face_allowed() {
        let mesh = Mesh::new(Vec::new(), Vec::new(), vec![0, 0]).unwrap();
        assert_eq!(mesh.face_count(), 2);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn test_builder_matches_new() {
        let mut builder = MeshBuilder::new();
        for v in triangle_vertices() {
            builder.push_vertex(v);
        }
        builder.push_vertex([1.0, 1.0, 0.0]);
        builder.push_face(&[0, 1, 2]);
        builder.push_face(&[0, 1, 3, 2]);
        assert_eq!(builder.vertex_count(), 4);
        assert_eq!(builder.face_count(), 2);

        let built = builder.build();
        let (vertices, indices, faces) = built.clone().into_parts();
        assert_eq!(faces, vec![3, 4]);
        assert_eq!(Mesh::new(vertices, indices, faces).unwrap(), built);
    }
}

//! Interleaved position + color vertex data and `u16` index lists for the
//! demo shapes.

use bytemuck::{Pod, Zeroable};
use thiserror::Error;

use crate::context::VertexAttribute;

/// Interleaved vertex: position followed by RGB color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    /// Attribute 0 is the position, attribute 1 the color.
    pub const ATTRIBUTES: [VertexAttribute; 2] = [
        VertexAttribute {
            location: 0,
            components: 3,
            stride: Self::STRIDE,
            offset: 0,
        },
        VertexAttribute {
            location: 1,
            components: 3,
            stride: Self::STRIDE,
            offset: 3 * std::mem::size_of::<f32>(),
        },
    ];

    pub const fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GeometryError {
    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        position: usize,
        index: u16,
        vertex_count: usize,
    },
    #[error("index count {0} is not a multiple of 3")]
    IncompleteTriangle(usize),
    #[error("{0} vertices cannot be addressed by u16 indices")]
    TooManyVertices(usize),
}

/// Owned vertex and index data for one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
}

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];
const MAGENTA: [f32; 3] = [1.0, 0.0, 1.0];

impl Geometry {
    /// Build a geometry from arbitrary data, checking that it describes
    /// whole triangles over existing vertices.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u16>) -> Result<Self, GeometryError> {
        let geometry = Self { vertices, indices };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Square-based pyramid with its apex on +Y.
    ///
    /// The base is a red quad at y = 0; each side face has its own three
    /// vertices so it can carry a flat color.
    pub fn pyramid() -> Self {
        let apex = [0.0, 1.0, 0.0];
        let vertices = vec![
            // base
            Vertex::new([-0.5, 0.0, -0.5], RED),
            Vertex::new([-0.5, 0.0, 0.5], RED),
            Vertex::new([0.5, 0.0, -0.5], RED),
            Vertex::new([0.5, 0.0, 0.5], RED),
            // back
            Vertex::new([-0.5, 0.0, -0.5], GREEN),
            Vertex::new(apex, GREEN),
            Vertex::new([0.5, 0.0, -0.5], GREEN),
            // right
            Vertex::new([0.5, 0.0, -0.5], BLUE),
            Vertex::new(apex, BLUE),
            Vertex::new([0.5, 0.0, 0.5], BLUE),
            // front
            Vertex::new([-0.5, 0.0, 0.5], YELLOW),
            Vertex::new(apex, YELLOW),
            Vertex::new([0.5, 0.0, 0.5], YELLOW),
            // left
            Vertex::new([-0.5, 0.0, 0.5], MAGENTA),
            Vertex::new(apex, MAGENTA),
            Vertex::new([-0.5, 0.0, -0.5], MAGENTA),
        ];
        let indices = vec![
            0, 2, 1, //
            1, 2, 3, //
            4, 5, 6, //
            7, 8, 9, //
            11, 10, 12, //
            13, 14, 15,
        ];
        Self { vertices, indices }
    }

    /// Flat 2D "house": a red roof triangle above a green square body.
    ///
    /// The body shares vertex 3 and 5 between its two triangles.
    pub fn house() -> Self {
        let vertices = vec![
            // roof
            Vertex::new([-0.5, 0.0, 0.0], RED),
            Vertex::new([0.5, 0.0, 0.0], RED),
            Vertex::new([0.0, 0.5, 0.0], RED),
            // body
            Vertex::new([-0.5, 0.0, 0.0], GREEN),
            Vertex::new([-0.5, -0.5, 0.0], GREEN),
            Vertex::new([0.5, -0.5, 0.0], GREEN),
            Vertex::new([0.5, 0.0, 0.0], GREEN),
        ];
        let indices = vec![0, 1, 2, 3, 4, 5, 6, 5, 3];
        Self { vertices, indices }
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.vertices.len() > usize::from(u16::MAX) + 1 {
            return Err(GeometryError::TooManyVertices(self.vertices.len()));
        }
        if self.indices.len() % 3 != 0 {
            return Err(GeometryError::IncompleteTriangle(self.indices.len()));
        }
        let vertex_count = self.vertices.len();
        if let Some(position) = self
            .indices
            .iter()
            .position(|&i| usize::from(i) >= vertex_count)
        {
            return Err(GeometryError::IndexOutOfRange {
                position,
                index: self.indices[position],
                vertex_count,
            });
        }
        Ok(())
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Vertex data as uploaded to the array buffer.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as uploaded to the element buffer.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout() {
        assert_eq!(Vertex::STRIDE, 24);
        assert_eq!(Vertex::ATTRIBUTES[0].offset, 0);
        assert_eq!(Vertex::ATTRIBUTES[1].offset, 12);
        assert!(Vertex::ATTRIBUTES.iter().all(|a| a.stride == 24));
    }

    #[test]
    fn builtin_shapes_are_valid() {
        for geometry in [Geometry::pyramid(), Geometry::house()] {
            geometry.validate().unwrap();
            let count = geometry.vertices().len();
            assert!(geometry.indices().iter().all(|&i| usize::from(i) < count));
        }
    }

    #[test]
    fn pyramid_counts() {
        let pyramid = Geometry::pyramid();
        assert_eq!(pyramid.vertices().len(), 16);
        assert_eq!(pyramid.index_count(), 18);
        assert_eq!(pyramid.vertex_bytes().len(), 16 * 24);
        assert_eq!(pyramid.index_bytes().len(), 18 * 2);
    }

    #[test]
    fn house_counts() {
        let house = Geometry::house();
        assert_eq!(house.vertices().len(), 7);
        assert_eq!(house.indices(), &[0, 1, 2, 3, 4, 5, 6, 5, 3]);
    }

    #[test]
    fn pyramid_side_faces_meet_at_apex() {
        let pyramid = Geometry::pyramid();
        for &apex in &[5usize, 8, 11, 14] {
            assert_eq!(pyramid.vertices()[apex].position, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn interleaved_bytes_start_with_first_position() {
        let house = Geometry::house();
        let first: [f32; 6] = bytemuck::pod_read_unaligned(&house.vertex_bytes()[..24]);
        assert_eq!(first, [-0.5, 0.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn rejects_out_of_range_index() {
        let vertices = vec![Vertex::new([0.0; 3], RED); 3];
        let err = Geometry::new(vertices, vec![0, 1, 3]).unwrap_err();
        assert_eq!(
            err,
            GeometryError::IndexOutOfRange {
                position: 2,
                index: 3,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn rejects_partial_triangle() {
        let vertices = vec![Vertex::new([0.0; 3], RED); 3];
        let err = Geometry::new(vertices, vec![0, 1]).unwrap_err();
        assert_eq!(err, GeometryError::IncompleteTriangle(2));
    }
}

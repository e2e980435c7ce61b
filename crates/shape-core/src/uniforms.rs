//! std140 serializers for the demos' uniform blocks.
//!
//! Each block has a small offset table and is written field by field into a
//! zeroed fixed-size buffer, so the bytes never depend on how the compiler
//! lays out a Rust struct. The tables match these shader declarations:
//!
//! ```glsl
//! layout(std140, binding = 0) uniform Modifiers {
//!     float light_intensity;   // 0
//!     vec3  light_color;       // 16
//! };
//!
//! layout(std140, binding = 1) uniform Transformations {
//!     mat4 PVM;                // 0, 16, 32, 48
//! };
//!
//! layout(std140, binding = 1) uniform Transformations {
//!     vec2 scale;              // 0
//!     vec2 translation;        // 8
//!     mat2 rotation;           // 16, 32
//! };
//! ```

use glam::{Mat2, Mat4, Vec2, Vec3};
use thiserror::Error;

const F32: usize = std::mem::size_of::<f32>();

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PackError {
    #[error("{field} expects {expected} floats, got {actual}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Byte offsets of the material block.
pub mod material {
    pub const STRENGTH: usize = 0;
    pub const COLOR: usize = 16;
    pub const SIZE: usize = 32;
    pub const BINDING: u32 = 0;
}

/// Byte offsets of the 4x4 transform block.
pub mod transform_3d {
    /// Offset of each matrix column.
    pub const COLUMNS: [usize; 4] = [0, 16, 32, 48];
    pub const SIZE: usize = 64;
    pub const BINDING: u32 = 1;
}

/// Byte offsets of the 2D scale/translation/rotation block.
pub mod transform_2d {
    pub const SCALE: usize = 0;
    pub const TRANSLATION: usize = 8;
    /// Offset of each rotation column; every `mat2` column occupies a full
    /// 16-byte slot.
    pub const ROTATION: [usize; 2] = [16, 32];
    pub const SIZE: usize = 48;
    pub const BINDING: u32 = 1;
}

/// Zero-initialised block that floats are written into at fixed offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Std140Writer<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> Default for Std140Writer<N> {
    fn default() -> Self {
        Self { bytes: [0; N] }
    }
}

impl<const N: usize> Std140Writer<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `values` starting at byte `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the values do not fit inside the block. Offsets come from the
    /// constant tables above, so this only fires on a broken table.
    pub fn put(&mut self, offset: usize, values: &[f32]) -> &mut Self {
        let end = offset + values.len() * F32;
        assert!(end <= N, "write of {offset}..{end} overflows {N}-byte block");
        self.bytes[offset..end].copy_from_slice(bytemuck::cast_slice(values));
        self
    }

    pub fn finish(&self) -> [u8; N] {
        self.bytes
    }
}

/// Material block: strength at 0, color at 16.
pub fn pack_material(strength: f32, color: Vec3) -> [u8; material::SIZE] {
    Std140Writer::new()
        .put(material::STRENGTH, &[strength])
        .put(material::COLOR, &color.to_array())
        .finish()
}

/// Column-major 4x4 matrix, one column per 16 bytes.
pub fn pack_transform_3d(pvm: &Mat4) -> [u8; transform_3d::SIZE] {
    let mut writer = Std140Writer::new();
    for (i, offset) in transform_3d::COLUMNS.into_iter().enumerate() {
        writer.put(offset, &pvm.col(i).to_array());
    }
    writer.finish()
}

pub fn pack_transform_2d(
    scale: Vec2,
    translation: Vec2,
    rotation: &Mat2,
) -> [u8; transform_2d::SIZE] {
    let mut writer = Std140Writer::new();
    writer
        .put(transform_2d::SCALE, &scale.to_array())
        .put(transform_2d::TRANSLATION, &translation.to_array());
    for (i, offset) in transform_2d::ROTATION.into_iter().enumerate() {
        writer.put(offset, &rotation.col(i).to_array());
    }
    writer.finish()
}

fn expect_len(field: &'static str, values: &[f32], expected: usize) -> Result<(), PackError> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(PackError::LengthMismatch {
            field,
            expected,
            actual: values.len(),
        })
    }
}

/// [`pack_material`] for untyped input.
pub fn pack_material_slice(strength: f32, color: &[f32]) -> Result<[u8; material::SIZE], PackError> {
    expect_len("color", color, 3)?;
    Ok(pack_material(strength, Vec3::from_slice(color)))
}

/// [`pack_transform_3d`] for 16 column-major floats.
pub fn pack_transform_3d_slice(pvm: &[f32]) -> Result<[u8; transform_3d::SIZE], PackError> {
    expect_len("pvm", pvm, 16)?;
    Ok(pack_transform_3d(&Mat4::from_cols_slice(pvm)))
}

/// [`pack_transform_2d`] for untyped input; `rotation` is column-major.
pub fn pack_transform_2d_slice(
    scale: &[f32],
    translation: &[f32],
    rotation: &[f32],
) -> Result<[u8; transform_2d::SIZE], PackError> {
    expect_len("scale", scale, 2)?;
    expect_len("translation", translation, 2)?;
    expect_len("rotation", rotation, 4)?;
    Ok(pack_transform_2d(
        Vec2::from_slice(scale),
        Vec2::from_slice(translation),
        &Mat2::from_cols_slice(rotation),
    ))
}

/// A value that serializes to a std140 uniform block.
pub trait UniformBlock {
    /// Block size in bytes.
    const SIZE: usize;
    /// Uniform binding point the shader declares for this block.
    const BINDING: u32;

    fn to_std140(&self) -> Vec<u8>;
}

/// Light strength and color read by the fragment shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialUniform {
    pub strength: f32,
    pub color: Vec3,
}

impl MaterialUniform {
    pub fn new(strength: f32, color: Vec3) -> Self {
        Self { strength, color }
    }

    pub fn from_slice(strength: f32, color: &[f32]) -> Result<Self, PackError> {
        expect_len("color", color, 3)?;
        Ok(Self::new(strength, Vec3::from_slice(color)))
    }
}

impl UniformBlock for MaterialUniform {
    const SIZE: usize = material::SIZE;
    const BINDING: u32 = material::BINDING;

    fn to_std140(&self) -> Vec<u8> {
        pack_material(self.strength, self.color).to_vec()
    }
}

/// Combined projection * view * model matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3d {
    pub pvm: Mat4,
}

impl UniformBlock for Transform3d {
    const SIZE: usize = transform_3d::SIZE;
    const BINDING: u32 = transform_3d::BINDING;

    fn to_std140(&self) -> Vec<u8> {
        pack_transform_3d(&self.pvm).to_vec()
    }
}

/// Planar transform applied as `rotation * (scale * p) + translation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2d {
    pub scale: Vec2,
    pub translation: Vec2,
    pub rotation: Mat2,
}

impl UniformBlock for Transform2d {
    const SIZE: usize = transform_2d::SIZE;
    const BINDING: u32 = transform_2d::BINDING;

    fn to_std140(&self) -> Vec<u8> {
        pack_transform_2d(self.scale, self.translation, &self.rotation).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floats(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    #[test]
    fn material_layout() {
        let bytes = pack_material(1.0, Vec3::new(0.9, 0.8, 0.7));
        assert_eq!(&bytes[0..4], &1.0f32.to_ne_bytes());
        assert!(bytes[4..16].iter().all(|&b| b == 0));
        assert_eq!(floats(&bytes[16..28]), vec![0.9, 0.8, 0.7]);
        assert!(bytes[28..32].iter().all(|&b| b == 0));
    }

    #[test]
    fn identity_columns() {
        let bytes = pack_transform_3d(&Mat4::IDENTITY);
        assert_eq!(floats(&bytes[0..16]), vec![1.0, 0.0, 0.0, 0.0]);
        assert_eq!(floats(&bytes[16..32]), vec![0.0, 1.0, 0.0, 0.0]);
        assert_eq!(floats(&bytes[32..48]), vec![0.0, 0.0, 1.0, 0.0]);
        assert_eq!(floats(&bytes[48..64]), vec![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn transform_3d_is_column_major() {
        let m = Mat4::from_cols_array(&std::array::from_fn(|i| i as f32));
        let bytes = pack_transform_3d(&m);
        assert_eq!(floats(&bytes), m.to_cols_array().to_vec());
        assert_eq!(floats(&bytes[16..32]), m.col(1).to_array().to_vec());
    }

    #[test]
    fn transform_2d_layout() {
        let rotation = Mat2::from_cols_array(&[1.0, 2.0, 3.0, 4.0]);
        let bytes = pack_transform_2d(Vec2::new(0.5, 0.6), Vec2::new(0.0, -0.25), &rotation);
        let f = floats(&bytes);
        assert_eq!(f.len(), 12);
        assert_eq!(&f[0..2], &[0.5, 0.6]);
        assert_eq!(&f[2..4], &[0.0, -0.25]);
        assert_eq!(&f[4..8], &[1.0, 2.0, 0.0, 0.0]);
        assert_eq!(&f[8..12], &[3.0, 4.0, 0.0, 0.0]);
    }

    #[test]
    fn packing_is_deterministic() {
        let color = Vec3::new(0.2, 0.2, 0.3);
        assert_eq!(pack_material(1.0, color), pack_material(1.0, color));
        let m = Mat4::from_rotation_z(2.0);
        assert_eq!(pack_transform_3d(&m), pack_transform_3d(&m));
    }

    #[test]
    fn slice_variants_check_lengths() {
        assert_eq!(
            pack_material_slice(1.0, &[0.1, 0.2]).unwrap_err(),
            PackError::LengthMismatch {
                field: "color",
                expected: 3,
                actual: 2
            }
        );
        assert!(pack_transform_3d_slice(&[0.0; 15]).is_err());
        assert!(pack_transform_2d_slice(&[1.0, 1.0], &[0.0, 0.0], &[1.0, 0.0, 0.0]).is_err());
    }

    #[test]
    fn slice_variants_match_typed() {
        let color = [0.9, 0.8, 0.7];
        assert_eq!(
            pack_material_slice(1.0, &color).unwrap(),
            pack_material(1.0, Vec3::from(color))
        );
        let m = Mat4::from_rotation_x(0.3);
        assert_eq!(
            pack_transform_3d_slice(&m.to_cols_array()).unwrap(),
            pack_transform_3d(&m)
        );
    }

    #[test]
    #[should_panic(expected = "overflows")]
    fn writer_rejects_overflow() {
        Std140Writer::<8>::new().put(4, &[1.0, 2.0]);
    }

    #[test]
    fn block_sizes_match_tables() {
        let material = MaterialUniform::new(1.0, Vec3::ONE);
        assert_eq!(material.to_std140().len(), MaterialUniform::SIZE);
        let t3 = Transform3d { pvm: Mat4::IDENTITY };
        assert_eq!(t3.to_std140().len(), Transform3d::SIZE);
        let t2 = Transform2d {
            scale: Vec2::ONE,
            translation: Vec2::ZERO,
            rotation: Mat2::IDENTITY,
        };
        assert_eq!(t2.to_std140().len(), Transform2d::SIZE);
    }
}

//! Vertex data packing utilities
//!
//! Provides functions to convert f32 vertex data to the packed alias model formats:
//! - position f32x3 → u8x3 against a per-model affine scale/translate
//! - normal f32x3 → u8 codebook index
//! - uv f32x2 → u32x2 skin pixel coordinates

use glam::Vec3;

use crate::formats::{TexCoord, TriVertex};
use crate::normals::quantize_normal;

/// Largest per-axis position code.
pub const MAX_CODE: f32 = 255.0;

/// Code the loader treats as the coordinate origin on every axis.
pub const ORIGIN_CODE: f32 = 128.0;

// ============================================================================
// Position Packing
// ============================================================================

/// Axis-aligned bounds of a position set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl PositionBounds {
    /// Per-axis min/max over all positions. Returns `None` for an empty set.
    pub fn from_positions<I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    #[inline]
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// True when every axis has zero extent (a single point).
    pub fn is_degenerate(&self) -> bool {
        self.extent() == Vec3::ZERO
    }

    /// Derive the quantizer for these bounds.
    ///
    /// `translate` is the per-axis minimum and `scale` is `(max - min) / 255`.
    /// An axis with `max == min` gets scale 1.0 so all its codes are 0.
    pub fn quantizer(&self) -> VertexQuantizer {
        let extent = self.extent();
        let scale = Vec3::select(extent.cmpeq(Vec3::ZERO), Vec3::ONE, extent / MAX_CODE);
        VertexQuantizer {
            scale,
            translate: self.min,
        }
    }
}

/// Per-model affine mapping between float positions and 8-bit codes.
///
/// Every frame of a model shares one quantizer, derived once from the full
/// position set before any vertex is compressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexQuantizer {
    pub scale: Vec3,
    pub translate: Vec3,
}

impl VertexQuantizer {
    /// Derive scale/translate from a position set; see [`PositionBounds::quantizer`].
    pub fn from_positions<I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        PositionBounds::from_positions(positions).map(|b| b.quantizer())
    }

    /// Compress a position into per-axis codes.
    ///
    /// `code = clamp(round((pos - translate) / scale), 0, 255)`
    #[inline]
    pub fn compress(&self, position: Vec3) -> [u8; 3] {
        let scaled = ((position - self.translate) / self.scale).round();
        let clamped = scaled.clamp(Vec3::ZERO, Vec3::splat(MAX_CODE));
        [clamped.x as u8, clamped.y as u8, clamped.z as u8]
    }

    /// Reconstruct the position the loader will place a code at.
    ///
    /// `pos = (code - 128) * scale + translate`
    #[inline]
    pub fn reconstruct(&self, code: [u8; 3]) -> Vec3 {
        let code = Vec3::new(code[0] as f32, code[1] as f32, code[2] as f32);
        (code - Vec3::splat(ORIGIN_CODE)) * self.scale + self.translate
    }
}

/// Pack a position and normal into a frame vertex.
#[inline]
pub fn pack_vertex(quantizer: &VertexQuantizer, position: Vec3, normal: Vec3) -> TriVertex {
    TriVertex::new(quantizer.compress(position), quantize_normal(normal))
}

// ============================================================================
// UV Packing
// ============================================================================

/// Pack a UV coordinate into skin pixel space.
///
/// `s = floor(u * width)`, `t = floor(v * height)`. Negative results clamp to 0.
#[inline]
pub fn pack_texcoord(uv: [f32; 2], skin_width: u32, skin_height: u32) -> TexCoord {
    let s = (uv[0] * skin_width as f32).floor().max(0.0);
    let t = (uv[1] * skin_height as f32).floor().max(0.0);
    TexCoord::new(s as u32, t as u32)
}

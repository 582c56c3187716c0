//! Complete alias model and its serializer
//!
//! # Layout
//! ```text
//! header     (84 bytes, see MdlHeader)
//! skins      num_skins × (4 + skin_width × skin_height)
//! texcoords  num_verts × 12
//! triangles  num_tris × 16
//! frames     num_frames × (28 + num_verts × 4)
//! ```

use std::io::{self, Write};

use glam::Vec3;

use super::{Frame, MdlHeader, Skin, TexCoord, Triangle};
use crate::packing::VertexQuantizer;

/// Default eye position stored in the header.
pub const DEFAULT_EYE_POSITION: Vec3 = Vec3::new(0.0, 0.0, 24.0);

/// A fully assembled model, ready to serialize.
///
/// All frames share `scale`/`translate`. The model is never mutated while it
/// is being written.
#[derive(Debug, Clone, PartialEq)]
pub struct MdlModel {
    pub scale: Vec3,
    pub translate: Vec3,
    pub bounding_radius: f32,
    pub eye_position: Vec3,
    pub skins: Vec<Skin>,
    pub texcoords: Vec<TexCoord>,
    pub triangles: Vec<Triangle>,
    pub frames: Vec<Frame>,
}

impl MdlModel {
    /// Quantizer shared by every frame.
    pub fn quantizer(&self) -> VertexQuantizer {
        VertexQuantizer {
            scale: self.scale,
            translate: self.translate,
        }
    }

    /// Skin dimensions from the first skin (0×0 without skins).
    pub fn skin_size(&self) -> (u32, u32) {
        self.skins
            .first()
            .map(|s| (s.width, s.height))
            .unwrap_or((0, 0))
    }

    /// Vertex count per frame (equal to the texcoord count).
    pub fn vertex_count(&self) -> usize {
        self.texcoords.len()
    }

    /// Largest distance from the origin over all reconstructed frame vertices.
    ///
    /// Uses the loader's reconstruction, not the source float positions.
    pub fn reconstructed_radius(&self) -> f32 {
        let quantizer = self.quantizer();
        self.frames
            .iter()
            .flat_map(|f| f.vertices.iter())
            .map(|v| quantizer.reconstruct(v.v).length())
            .fold(0.0, f32::max)
    }

    /// Build the file header for this model.
    pub fn header(&self) -> MdlHeader {
        let (skin_width, skin_height) = self.skin_size();
        MdlHeader {
            scale: self.scale.to_array(),
            translate: self.translate.to_array(),
            bounding_radius: self.bounding_radius,
            eye_position: self.eye_position.to_array(),
            num_skins: self.skins.len() as u32,
            skin_width,
            skin_height,
            num_verts: self.texcoords.len() as u32,
            num_tris: self.triangles.len() as u32,
            num_frames: self.frames.len() as u32,
            ..Default::default()
        }
    }

    /// Exact size of the serialized model in bytes.
    pub fn encoded_len(&self) -> usize {
        MdlHeader::SIZE
            + self.skins.iter().map(Skin::encoded_len).sum::<usize>()
            + self.texcoords.len() * TexCoord::SIZE
            + self.triangles.len() * Triangle::SIZE
            + self.frames.iter().map(Frame::encoded_len).sum::<usize>()
    }

    /// Write the complete model: header, skins, texcoords, triangles, frames.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.header().to_bytes())?;
        for skin in &self.skins {
            skin.write_to(w)?;
        }
        for tc in &self.texcoords {
            w.write_all(&tc.to_bytes())?;
        }
        for tri in &self.triangles {
            w.write_all(&tri.to_bytes())?;
        }
        for frame in &self.frames {
            frame.write_to(w)?;
        }
        Ok(())
    }

    /// Serialize to an in-memory buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::TriVertex;

    fn sample_model() -> MdlModel {
        MdlModel {
            scale: Vec3::new(0.5, 0.5, 1.0),
            translate: Vec3::new(-1.0, -1.0, 0.0),
            bounding_radius: 0.0,
            eye_position: DEFAULT_EYE_POSITION,
            skins: vec![Skin::new(2, 2, vec![0, 1, 2, 3])],
            texcoords: vec![
                TexCoord::new(0, 0),
                TexCoord::new(1, 0),
                TexCoord::new(0, 1),
            ],
            triangles: vec![Triangle::new([0, 1, 2])],
            frames: vec![Frame::build(
                "idle",
                vec![
                    TriVertex::new([128, 128, 128], 5),
                    TriVertex::new([132, 128, 128], 5),
                    TriVertex::new([128, 134, 128], 5),
                ],
            )],
        }
    }

    #[test]
    fn test_header_counts() {
        let header = sample_model().header();
        assert_eq!(header.num_skins, 1);
        assert_eq!(header.skin_width, 2);
        assert_eq!(header.skin_height, 2);
        assert_eq!(header.num_verts, 3);
        assert_eq!(header.num_tris, 1);
        assert_eq!(header.num_frames, 1);
        assert_eq!(header.sync_type, 0);
        assert_eq!(header.flags, 0);
        assert_eq!(header.size, 1.0);
        assert_eq!(header.eye_position, [0.0, 0.0, 24.0]);
    }

    #[test]
    fn test_encoded_len_matches_output() {
        let model = sample_model();
        let bytes = model.to_bytes();
        assert_eq!(bytes.len(), model.encoded_len());
        assert_eq!(bytes.len(), 84 + (4 + 4) + 3 * 12 + 16 + (28 + 3 * 4));
    }

    #[test]
    fn test_section_order() {
        let bytes = sample_model().to_bytes();
        let skin_at = MdlHeader::SIZE;
        assert_eq!(&bytes[skin_at..skin_at + 8], &[0, 0, 0, 0, 0, 1, 2, 3]);

        let tri_at = skin_at + 8 + 3 * TexCoord::SIZE;
        assert_eq!(&bytes[tri_at..tri_at + 4], &[1, 0, 0, 0]);

        let frame_at = tri_at + Triangle::SIZE;
        assert_eq!(&bytes[frame_at + 12..frame_at + 16], b"idle");
    }

    #[test]
    fn test_reconstructed_radius() {
        let model = sample_model();
        // (132 - 128) * 0.5 - 1 = 1 on x, the furthest vertex is (−1, 2, 0)
        let expected = Vec3::new(-1.0, 2.0, 0.0).length();
        assert!((model.reconstructed_radius() - expected).abs() < 1e-6);
    }
}

//! Animation frame section
//!
//! # Layout
//! ```text
//! 0x00: type u32 (0 = single frame)
//! 0x04: bbox_min TriVertex (4 bytes)
//! 0x08: bbox_max TriVertex (4 bytes)
//! 0x0C: name [u8; 16] (NUL padded)
//! 0x1C: vertices (num_verts × 4 bytes)
//! ```

use std::io::{self, Write};

use bytemuck::{Pod, Zeroable};
use mdlforge_shared::MDL_FORMAT;

/// Frame group type for a single (non-grouped) frame.
pub const FRAME_SINGLE: u32 = 0;

/// Fixed width of the frame name field.
pub const FRAME_NAME_LEN: usize = MDL_FORMAT.frame_name_len;

/// Compressed frame vertex (4 bytes): position codes + normal codebook index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct TriVertex {
    pub v: [u8; 3],
    pub normal_index: u8,
}

const _: () = assert!(std::mem::size_of::<TriVertex>() == 4);

impl TriVertex {
    pub const SIZE: usize = 4;

    pub const fn new(v: [u8; 3], normal_index: u8) -> Self {
        Self { v, normal_index }
    }

    /// Write vertex to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        [self.v[0], self.v[1], self.v[2], self.normal_index]
    }

    /// Read vertex from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self::new([bytes[0], bytes[1], bytes[2]], bytes[3]))
    }
}

/// Encode a frame name into the fixed-width field.
///
/// Characters outside printable ASCII become `_` first, so truncation never
/// splits a multi-byte sequence. The result is cut to 16 bytes and NUL padded.
pub fn encode_frame_name(name: &str) -> [u8; FRAME_NAME_LEN] {
    let mut out = [0u8; FRAME_NAME_LEN];
    let ascii = name.chars().map(|c| {
        if c.is_ascii() && !c.is_ascii_control() {
            c as u8
        } else {
            b'_'
        }
    });
    for (slot, byte) in out.iter_mut().zip(ascii) {
        *slot = byte;
    }
    out
}

/// One static pose of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub name: [u8; FRAME_NAME_LEN],
    pub bbox_min: TriVertex,
    pub bbox_max: TriVertex,
    pub vertices: Vec<TriVertex>,
}

impl Frame {
    /// Bytes before the vertex array: type, bbox_min, bbox_max, name.
    pub const HEADER_SIZE: usize = 4 + TriVertex::SIZE * 2 + FRAME_NAME_LEN;

    /// Build a frame, deriving its bounding box from the vertex codes.
    ///
    /// Each bbox axis is the min/max code minus 128 (the loader's origin code),
    /// stored modulo 256. The bbox normal byte is always 0.
    pub fn build(name: &str, vertices: Vec<TriVertex>) -> Self {
        let mut min = [u8::MAX; 3];
        let mut max = [u8::MIN; 3];
        for vertex in &vertices {
            for axis in 0..3 {
                min[axis] = min[axis].min(vertex.v[axis]);
                max[axis] = max[axis].max(vertex.v[axis]);
            }
        }
        if vertices.is_empty() {
            min = [0; 3];
        }

        let offset = |codes: [u8; 3]| TriVertex::new(codes.map(|c| c.wrapping_sub(128)), 0);

        Self {
            name: encode_frame_name(name),
            bbox_min: offset(min),
            bbox_max: offset(max),
            vertices,
        }
    }

    /// Name up to the first NUL byte.
    pub fn name_str(&self) -> String {
        let end = self
            .name
            .iter()
            .position(|b| *b == 0)
            .unwrap_or(FRAME_NAME_LEN);
        String::from_utf8_lossy(&self.name[..end]).into_owned()
    }

    /// Number of bytes this frame occupies in the file.
    pub fn encoded_len(&self) -> usize {
        Self::HEADER_SIZE + self.vertices.len() * TriVertex::SIZE
    }

    /// Write frame type, bbox, name and vertices.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&FRAME_SINGLE.to_le_bytes())?;
        w.write_all(&self.bbox_min.to_bytes())?;
        w.write_all(&self.bbox_max.to_bytes())?;
        w.write_all(&self.name)?;
        w.write_all(bytemuck::cast_slice(&self.vertices))
    }
}

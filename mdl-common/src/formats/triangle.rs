//! Triangle records
//!
//! # Layout (16 bytes per triangle)
//! ```text
//! 0x00: faces_front u32 (0 or 1)
//! 0x04: vertex indices u32x3
//! ```

/// One face of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub faces_front: bool,
    pub vertices: [u32; 3],
}

impl Default for Triangle {
    fn default() -> Self {
        Self::new([0; 3])
    }
}

impl Triangle {
    pub const SIZE: usize = 16;

    /// Front-facing triangle over three vertex indices.
    pub fn new(vertices: [u32; 3]) -> Self {
        Self {
            faces_front: true,
            vertices,
        }
    }

    /// Write record to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&u32::from(self.faces_front).to_le_bytes());
        for (i, index) in self.vertices.iter().enumerate() {
            let at = 4 + i * 4;
            bytes[at..at + 4].copy_from_slice(&index.to_le_bytes());
        }
        bytes
    }

    /// Read record from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        let u32_at = |at: usize| {
            let mut word = [0u8; 4];
            word.copy_from_slice(&bytes[at..at + 4]);
            u32::from_le_bytes(word)
        };
        Some(Self {
            faces_front: u32_at(0) != 0,
            vertices: [u32_at(4), u32_at(8), u32_at(12)],
        })
    }
}

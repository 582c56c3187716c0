//! Skin texture coordinate records
//!
//! # Layout (12 bytes per vertex)
//! ```text
//! 0x00: on_seam u32 (0 or 1)
//! 0x04: s u32 (skin pixel column)
//! 0x08: t u32 (skin pixel row)
//! ```

/// Texture coordinate of one vertex, in skin pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TexCoord {
    pub on_seam: bool,
    pub s: u32,
    pub t: u32,
}

impl TexCoord {
    pub const SIZE: usize = 12;

    pub fn new(s: u32, t: u32) -> Self {
        Self {
            on_seam: false,
            s,
            t,
        }
    }

    /// Write record to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&u32::from(self.on_seam).to_le_bytes());
        bytes[4..8].copy_from_slice(&self.s.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.t.to_le_bytes());
        bytes
    }

    /// Read record from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            on_seam: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) != 0,
            s: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            t: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        })
    }
}

//! Palette-indexed skin section
//!
//! # Layout
//! ```text
//! 0x00: group u32 (0 = single skin)
//! 0x04: pixel_data (width × height bytes, palette indices, row-major)
//! ```
//!
//! Width and height are stored once in the model header and shared by every skin.

use std::io::{self, Write};

/// Skin group type for a single (non-animated) skin.
pub const SKIN_SINGLE: u32 = 0;

/// One palette-indexed skin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skin {
    pub width: u32,
    pub height: u32,
    /// One palette index per pixel
    pub pixels: Vec<u8>,
}

impl Skin {
    /// Size of the group field preceding the pixels.
    pub const GROUP_SIZE: usize = 4;

    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Pixel buffer length matches the dimensions.
    pub fn validate(&self) -> bool {
        self.pixels.len() == self.width as usize * self.height as usize
    }

    /// Number of bytes this skin occupies in the file.
    pub fn encoded_len(&self) -> usize {
        Self::GROUP_SIZE + self.pixels.len()
    }

    /// Write group type and pixels.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&SKIN_SINGLE.to_le_bytes())?;
        w.write_all(&self.pixels)
    }
}

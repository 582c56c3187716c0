//! Alias model format specification.
//!
//! This module defines the `ModelFormat` struct which serves as the single source of truth
//! for all format constants (file extension, magic bytes, version, hard capacity limits).
//!
//! # Example
//!
//! ```
//! use mdlforge_shared::MDL_FORMAT;
//!
//! assert_eq!(MDL_FORMAT.extension, "mdl");
//! assert_eq!(MDL_FORMAT.magic, b"IDPO");
//! assert_eq!(MDL_FORMAT.version, 6);
//! ```

/// Alias model format specification.
///
/// The limits are the loader's fixed table sizes. Models that exceed them are
/// rejected before serialization rather than truncated.
#[derive(Debug, Clone, Copy)]
pub struct ModelFormat {
    /// File extension without dot (e.g., "mdl")
    pub extension: &'static str,

    /// Magic bytes at start of the file (4 bytes)
    pub magic: &'static [u8; 4],

    /// Format version the loader requires
    pub version: u32,

    /// Maximum vertices per frame
    pub max_verts: usize,

    /// Maximum triangles per model
    pub max_tris: usize,

    /// Maximum frames per model
    pub max_frames: usize,

    /// Maximum skins per model
    pub max_skins: usize,

    /// Fixed width of a frame name field in bytes
    pub frame_name_len: usize,
}

impl ModelFormat {
    /// Create a new format specification.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        extension: &'static str,
        magic: &'static [u8; 4],
        version: u32,
        max_verts: usize,
        max_tris: usize,
        max_frames: usize,
        max_skins: usize,
        frame_name_len: usize,
    ) -> Self {
        Self {
            extension,
            magic,
            version,
            max_verts,
            max_tris,
            max_frames,
            max_skins,
            frame_name_len,
        }
    }

    /// Magic bytes as the little-endian u32 stored in the header.
    pub const fn magic_u32(&self) -> u32 {
        u32::from_le_bytes(*self.magic)
    }
}

/// IDPO version 6 alias model format.
///
/// - Extension: `.mdl`
/// - Magic bytes: `IDPO`
/// - Caps: 1024 vertices, 2048 triangles, 256 frames, 32 skins
pub const MDL_FORMAT: ModelFormat = ModelFormat::new("mdl", b"IDPO", 6, 1024, 2048, 256, 32, 16);

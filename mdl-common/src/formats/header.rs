//! Alias model file header (.mdl)
//!
//! # Layout
//! ```text
//! 0x00: ident u32 ("IDPO")
//! 0x04: version u32 (6)
//! 0x08: scale f32x3
//! 0x14: translate f32x3
//! 0x20: bounding_radius f32
//! 0x24: eye_position f32x3
//! 0x30: num_skins u32
//! 0x34: skin_width u32
//! 0x38: skin_height u32
//! 0x3C: num_verts u32
//! 0x40: num_tris u32
//! 0x44: num_frames u32
//! 0x48: sync_type u32
//! 0x4C: flags u32
//! 0x50: size f32
//! ```

use super::{MDL_IDENT, MDL_VERSION};

/// Alias model header (84 bytes)
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct MdlHeader {
    pub ident: u32,
    pub version: u32,
    pub scale: [f32; 3],
    pub translate: [f32; 3],
    pub bounding_radius: f32,
    pub eye_position: [f32; 3],
    pub num_skins: u32,
    pub skin_width: u32,
    pub skin_height: u32,
    pub num_verts: u32,
    pub num_tris: u32,
    pub num_frames: u32,
    pub sync_type: u32,
    pub flags: u32,
    pub size: f32,
}

impl Default for MdlHeader {
    fn default() -> Self {
        Self {
            ident: MDL_IDENT,
            version: MDL_VERSION,
            scale: [1.0; 3],
            translate: [0.0; 3],
            bounding_radius: 0.0,
            eye_position: [0.0; 3],
            num_skins: 0,
            skin_width: 0,
            skin_height: 0,
            num_verts: 0,
            num_tris: 0,
            num_frames: 0,
            sync_type: 0,
            flags: 0,
            size: 1.0,
        }
    }
}

impl MdlHeader {
    pub const SIZE: usize = 84;

    /// True when ident and version match what the loader requires.
    pub fn is_supported(&self) -> bool {
        self.ident == MDL_IDENT && self.version == MDL_VERSION
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        let mut offset = 0;
        let mut put = |chunk: [u8; 4]| {
            bytes[offset..offset + 4].copy_from_slice(&chunk);
            offset += 4;
        };

        put(self.ident.to_le_bytes());
        put(self.version.to_le_bytes());
        for f in self.scale {
            put(f.to_le_bytes());
        }
        for f in self.translate {
            put(f.to_le_bytes());
        }
        put(self.bounding_radius.to_le_bytes());
        for f in self.eye_position {
            put(f.to_le_bytes());
        }
        put(self.num_skins.to_le_bytes());
        put(self.skin_width.to_le_bytes());
        put(self.skin_height.to_le_bytes());
        put(self.num_verts.to_le_bytes());
        put(self.num_tris.to_le_bytes());
        put(self.num_frames.to_le_bytes());
        put(self.sync_type.to_le_bytes());
        put(self.flags.to_le_bytes());
        put(self.size.to_le_bytes());

        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        let u32_at = |offset: usize| {
            u32::from_le_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ])
        };
        let f32_at = |offset: usize| f32::from_bits(u32_at(offset));
        let vec3_at = |offset: usize| [f32_at(offset), f32_at(offset + 4), f32_at(offset + 8)];

        Some(Self {
            ident: u32_at(0x00),
            version: u32_at(0x04),
            scale: vec3_at(0x08),
            translate: vec3_at(0x14),
            bounding_radius: f32_at(0x20),
            eye_position: vec3_at(0x24),
            num_skins: u32_at(0x30),
            skin_width: u32_at(0x34),
            skin_height: u32_at(0x38),
            num_verts: u32_at(0x3C),
            num_tris: u32_at(0x40),
            num_frames: u32_at(0x44),
            sync_type: u32_at(0x48),
            flags: u32_at(0x4C),
            size: f32_at(0x50),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_size() {
        assert_eq!(MdlHeader::SIZE, 84);
        assert_eq!(std::mem::size_of::<MdlHeader>(), MdlHeader::SIZE);
    }

    #[test]
    fn test_header_starts_with_magic() {
        let bytes = MdlHeader::default().to_bytes();
        assert_eq!(&bytes[0..4], b"IDPO");
        assert_eq!(&bytes[4..8], &[6, 0, 0, 0]);
    }

    #[test]
    fn test_header_field_offsets() {
        let header = MdlHeader {
            num_skins: 1,
            skin_width: 64,
            skin_height: 32,
            num_verts: 3,
            num_tris: 1,
            num_frames: 1,
            ..Default::default()
        };
        let bytes = header.to_bytes();

        assert_eq!(&bytes[0x30..0x34], &[1, 0, 0, 0]);
        assert_eq!(&bytes[0x34..0x38], &[64, 0, 0, 0]);
        assert_eq!(&bytes[0x38..0x3C], &[32, 0, 0, 0]);
        assert_eq!(&bytes[0x3C..0x40], &[3, 0, 0, 0]);
        assert_eq!(&bytes[0x50..0x54], &1.0f32.to_le_bytes());
    }

    #[test]
    fn test_header_roundtrip() {
        let header = MdlHeader {
            scale: [0.5, 0.25, 1.0],
            translate: [-3.0, 2.0, 7.5],
            bounding_radius: 42.0,
            eye_position: [0.0, 0.0, 24.0],
            num_skins: 2,
            skin_width: 128,
            skin_height: 64,
            num_verts: 300,
            num_tris: 500,
            num_frames: 12,
            ..Default::default()
        };
        let parsed = MdlHeader::from_bytes(&header.to_bytes()).unwrap();
        assert_eq!(parsed, header);
        assert!(parsed.is_supported());
    }

    #[test]
    fn test_header_too_short() {
        assert!(MdlHeader::from_bytes(&[0; 83]).is_none());
    }

    #[test]
    fn test_unsupported_version() {
        let header = MdlHeader {
            version: 8,
            ..Default::default()
        };
        assert!(!header.is_supported());
    }
}

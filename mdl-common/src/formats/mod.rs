//! IDPO version 6 alias model sections
//!
//! A file is a fixed header followed by skins, texcoords, triangles and
//! frames, all little-endian with no padding between sections.
//!
//! Format constants (extension, magic, caps) live in `mdlforge_shared::ModelFormat`.
//! Fixed-size records implement [`BinarySerializable`].

pub mod frame;
pub mod header;
pub mod model;
mod serialization;
pub mod skin;
pub mod texcoord;
pub mod triangle;

pub use frame::*;
pub use header::*;
pub use model::*;
pub use serialization::BinarySerializable;
pub use skin::*;
pub use texcoord::*;
pub use triangle::*;

pub use mdlforge_shared::{MDL_FORMAT, ModelFormat};

/// Magic identifier as read little-endian from offset 0 ("IDPO").
pub const MDL_IDENT: u32 = MDL_FORMAT.magic_u32();

/// Only version this crate reads or writes.
pub const MDL_VERSION: u32 = MDL_FORMAT.version;

//! Alias model (IDPO v6) types and codecs
//!
//! This crate provides the on-disk model representation shared between:
//! - `mdl-export` (mesh → model pipeline)
//! - tooling that inspects or validates `.mdl` files
//!
//! # Modules
//!
//! - [`formats`] - header, section records and the model serializer
//! - [`normals`] - the fixed 162-entry normal codebook
//! - [`packing`] - position/normal/uv quantization into file codes
//! - [`validate`] - structural checks over serialized bytes

pub mod formats;
pub mod normals;
pub mod packing;
pub mod validate;

pub use formats::{
    BinarySerializable, FRAME_NAME_LEN, Frame, MDL_IDENT, MDL_VERSION, MdlHeader, MdlModel, Skin,
    TexCoord, TriVertex, Triangle, encode_frame_name,
};
pub use normals::{ANORMS, NUM_NORMALS, decode_normal, quantize_normal};
pub use packing::{PositionBounds, VertexQuantizer, pack_texcoord, pack_vertex};
pub use validate::{Diagnostic, Severity, ValidationReport, validate};

//! mdl-export library
//!
//! Compresses triangulated meshes into IDPO version 6 alias models:
//! 8-bit vertex quantization, codebook normals, palette-indexed skins.
//!
//! # Example
//!
//! ```no_run
//! use glam::Vec3;
//! use mdl_export::{ExportConfig, ModelAssembler, RawMesh, RawVertex, write_mdl_file};
//!
//! let mesh = RawMesh {
//!     vertices: vec![
//!         RawVertex::new(Vec3::ZERO, Vec3::Z),
//!         RawVertex::new(Vec3::X, Vec3::Z),
//!         RawVertex::new(Vec3::Y, Vec3::Z),
//!     ],
//!     uvs: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
//!     triangles: vec![[0, 1, 2]],
//!     material: None,
//! };
//! let assembled = ModelAssembler::new(ExportConfig::default()).assemble(&mesh, &[])?;
//! write_mdl_file("triangle.mdl".as_ref(), &assembled.model)?;
//! # Ok::<(), mdl_export::ExportError>(())
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod formats;
pub mod mesh;
pub mod model;
pub mod texture;

// Re-export packing and validation from mdl-common
pub use mdl_common::{
    Diagnostic, Severity, ValidationReport, VertexQuantizer, decode_normal, pack_texcoord,
    pack_vertex, quantize_normal, validate,
};

// Re-export format constants from shared
pub use mdlforge_shared::{MDL_FORMAT, ModelFormat};

pub use config::{ExportConfig, TextureConfig, load_config};
pub use error::{ExportError, ExportWarning};
pub use export::{ExportJob, ExportSummary, export_batch, export_model, validate_file};
pub use formats::{MdlModel, write_mdl, write_mdl_file};
pub use mesh::{DiffuseTexture, Material, Pose, RawMesh, RawVertex};
pub use model::{Assembled, ModelAssembler};
pub use texture::{FileImageDecoder, ImageDecoder, IndexedTexture, TextureIndexer, TextureOutcome};

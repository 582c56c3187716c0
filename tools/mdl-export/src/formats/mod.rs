//! Binary format output for alias model files
//!
//! Re-exports the section types from mdl-common and adds file placement.

pub use mdl_common::formats::*;

use std::io::Write;
use std::path::Path;

use mdlforge_shared::fs::write_file_atomic;

use crate::error::ExportError;

/// Write a complete model to any writer.
pub fn write_mdl<W: Write>(w: &mut W, model: &MdlModel) -> std::io::Result<()> {
    model.write_to(w)
}

/// Write a complete model file.
///
/// The model is encoded in memory and placed with a temp file and rename, so
/// `path` holds either its previous contents or the whole new model. Returns
/// the number of bytes written.
pub fn write_mdl_file(path: &Path, model: &MdlModel) -> Result<usize, ExportError> {
    let bytes = model.to_bytes();
    write_file_atomic(path, &bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn tiny_model() -> MdlModel {
        MdlModel {
            scale: Vec3::ONE,
            translate: Vec3::ZERO,
            bounding_radius: 0.0,
            eye_position: DEFAULT_EYE_POSITION,
            skins: vec![Skin::new(1, 1, vec![0])],
            texcoords: vec![TexCoord::new(0, 0)],
            triangles: vec![],
            frames: vec![Frame::build("idle", vec![TriVertex::default()])],
        }
    }

    #[test]
    fn test_write_mdl_matches_to_bytes() {
        let model = tiny_model();
        let mut out = Vec::new();
        write_mdl(&mut out, &model).unwrap();
        assert_eq!(out, model.to_bytes());
    }

    #[test]
    fn test_write_mdl_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.mdl");
        let model = tiny_model();

        let written = write_mdl_file(&path, &model).unwrap();
        assert_eq!(written, model.encoded_len());
        assert_eq!(std::fs::read(&path).unwrap(), model.to_bytes());
    }

    #[test]
    fn test_write_failure_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("tiny.mdl");
        let err = write_mdl_file(&path, &tiny_model()).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
        assert!(!path.exists());
    }
}

//! Export errors and warnings
//!
//! Errors abort the build of one model. Warnings describe degraded input that
//! was replaced with a documented default; the model is still produced.

use std::fmt;
use std::path::PathBuf;

/// Fatal conditions for one model build.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("mesh has no vertices")]
    EmptyMesh,

    #[error("{count} vertices exceeds the format limit of {max}")]
    TooManyVertices { count: usize, max: usize },

    #[error("{count} triangles exceeds the format limit of {max}")]
    TooManyTriangles { count: usize, max: usize },

    #[error("{count} frames exceeds the format limit of {max}")]
    TooManyFrames { count: usize, max: usize },

    #[error("{count} skins exceeds the format limit of {max}")]
    TooManySkins { count: usize, max: usize },

    #[error("triangle {triangle} references vertex {index}, but the mesh has {vertex_count}")]
    TriangleIndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("pose '{pose}' has {found} vertices, expected {expected}")]
    PoseVertexCountMismatch {
        pose: String,
        expected: usize,
        found: usize,
    },

    #[error("vertex {vertex} has a non-finite position")]
    NonFinitePosition { vertex: usize },

    #[error("all vertices share one position; scale is degenerate on every axis")]
    DegenerateBounds,

    #[error("I/O error writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Non-fatal conditions surfaced alongside an assembled model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportWarning {
    /// A diffuse texture could not be decoded; the checkerboard was used.
    TextureUnreadable { material: String, reason: String },
    /// No material carried a diffuse image; the checkerboard was used.
    NoTexture,
    /// The mesh referenced a material index past the end of the material list.
    MissingMaterial { index: usize },
    /// The mesh had a different number of UVs than vertices.
    UvCountMismatch { vertices: usize, uvs: usize },
}

impl fmt::Display for ExportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TextureUnreadable { material, reason } => write!(
                f,
                "texture for material '{material}' is unreadable ({reason}), using fallback skin"
            ),
            Self::NoTexture => write!(f, "no diffuse texture, using fallback skin"),
            Self::MissingMaterial { index } => write!(
                f,
                "mesh references missing material {index}, skins come from the remaining materials"
            ),
            Self::UvCountMismatch { vertices, uvs } => write!(
                f,
                "{uvs} uvs for {vertices} vertices, missing entries padded with (0, 0)"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ExportError::TooManyVertices {
            count: 2000,
            max: 1024,
        };
        assert_eq!(
            err.to_string(),
            "2000 vertices exceeds the format limit of 1024"
        );

        let err = ExportError::TriangleIndexOutOfRange {
            triangle: 4,
            index: 9,
            vertex_count: 3,
        };
        assert!(err.to_string().contains("vertex 9"));
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error;

        let err = ExportError::Io {
            path: PathBuf::from("out.mdl"),
            source: std::io::Error::other("disk full"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("out.mdl"));
    }

    #[test]
    fn test_warning_display() {
        let warning = ExportWarning::TextureUnreadable {
            material: "skin".into(),
            reason: "not found".into(),
        };
        assert!(warning.to_string().contains("'skin'"));
        assert!(ExportWarning::NoTexture.to_string().contains("fallback"));
        let missing = ExportWarning::MissingMaterial { index: 7 };
        assert!(missing.to_string().contains("material 7"));
    }
}

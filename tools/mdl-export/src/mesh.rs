//! Raw mesh input types
//!
//! These are produced by an external importer and are read-only to the
//! exporter. Triangle indices index `vertices` and `uvs` in parallel.

use std::path::PathBuf;

use glam::Vec3;
use image::DynamicImage;

/// One mesh vertex before compression.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawVertex {
    pub position: Vec3,
    /// Unit length, or zero when the importer has no normal.
    pub normal: Vec3,
}

impl RawVertex {
    pub const fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

/// One triangulated surface.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawMesh {
    pub vertices: Vec<RawVertex>,
    /// One (u, v) pair per vertex, nominally in [0, 1].
    pub uvs: Vec<[f32; 2]>,
    pub triangles: Vec<[u32; 3]>,
    /// Index into the material list passed to the assembler. The referenced
    /// material provides the first skin.
    pub material: Option<usize>,
}

impl RawMesh {
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.iter().map(|v| v.position)
    }

    /// Concatenate several meshes into one.
    ///
    /// Triangle indices are offset by the vertex count of the preceding
    /// meshes. Each mesh's UVs are padded with (0, 0) or cut to its own vertex
    /// count so UV indices stay aligned with vertex indices. The material of
    /// the first mesh that has one is kept.
    pub fn merge(meshes: &[RawMesh]) -> RawMesh {
        let mut merged = RawMesh::default();
        for mesh in meshes {
            let base = merged.vertices.len() as u32;
            merged.vertices.extend_from_slice(&mesh.vertices);

            let mut uvs = mesh.uvs.clone();
            uvs.resize(mesh.vertices.len(), [0.0, 0.0]);
            merged.uvs.extend(uvs);

            merged.triangles.extend(mesh.triangles.iter().map(|tri| tri.map(|i| i + base)));
            merged.material = merged.material.or(mesh.material);
        }
        merged
    }
}

/// Source of a material's diffuse texture.
#[derive(Debug, Clone)]
pub enum DiffuseTexture {
    /// Image file decoded on demand.
    File(PathBuf),
    /// Already decoded pixels.
    Image(DynamicImage),
}

/// A material reference from the importer.
#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    pub diffuse: Option<DiffuseTexture>,
}

impl Material {
    /// Material without a diffuse texture.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            diffuse: None,
        }
    }

    pub fn with_file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            diffuse: Some(DiffuseTexture::File(path.into())),
        }
    }

    pub fn with_image(name: impl Into<String>, image: DynamicImage) -> Self {
        Self {
            name: name.into(),
            diffuse: Some(DiffuseTexture::Image(image)),
        }
    }
}

/// Vertex positions and normals for one extra keyframe.
///
/// Shares the triangles and UVs of the mesh it belongs to, so it must have
/// exactly as many vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    pub name: String,
    pub vertices: Vec<RawVertex>,
}

impl Pose {
    pub fn new(name: impl Into<String>, vertices: Vec<RawVertex>) -> Self {
        Self {
            name: name.into(),
            vertices,
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.iter().map(|v| v.position)
    }
}

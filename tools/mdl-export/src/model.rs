//! Model assembly (RawMesh + materials -> MdlModel)
//!
//! Steps run in a fixed order because later ones depend on earlier results:
//!
//! 1. check preconditions (counts, indices, finite positions)
//! 2. derive one quantizer from every position of every frame
//! 3. compress vertices in source order
//! 4. resolve skins (the first skin fixes the UV pixel space)
//! 5. compress UVs, padding with (0, 0)
//! 6. copy triangles
//! 7. build the frames
//! 8. compute the bounding radius from the reconstructed vertices

use mdl_common::VertexQuantizer;
use mdl_common::formats::{Frame, MDL_FORMAT, MdlModel, Skin, TexCoord, TriVertex, Triangle};
use mdl_common::packing::{PositionBounds, pack_texcoord, pack_vertex};

use crate::config::ExportConfig;
use crate::error::{ExportError, ExportWarning};
use crate::mesh::{Material, Pose, RawMesh, RawVertex};
use crate::texture::{FileImageDecoder, ImageDecoder, TextureIndexer};

/// An assembled model plus the degraded-input warnings raised while building it.
#[derive(Debug, Clone)]
pub struct Assembled {
    pub model: MdlModel,
    pub warnings: Vec<ExportWarning>,
}

/// Builds [`MdlModel`]s from raw meshes.
pub struct ModelAssembler {
    config: ExportConfig,
    indexer: TextureIndexer,
    decoder: Box<dyn ImageDecoder>,
}

impl ModelAssembler {
    /// Assembler that decodes texture files from disk.
    pub fn new(config: ExportConfig) -> Self {
        Self::with_decoder(config, Box::new(FileImageDecoder))
    }

    /// Assembler with a custom image decoder.
    pub fn with_decoder(config: ExportConfig, decoder: Box<dyn ImageDecoder>) -> Self {
        let indexer = TextureIndexer::from(config.texture);
        Self {
            config,
            indexer,
            decoder,
        }
    }

    /// Assemble a single-frame model.
    pub fn assemble(
        &self,
        mesh: &RawMesh,
        materials: &[Material],
    ) -> Result<Assembled, ExportError> {
        self.assemble_poses(mesh, &[], materials)
    }

    /// Assemble a model whose first frame is the mesh itself, followed by one
    /// frame per pose.
    pub fn assemble_poses(
        &self,
        mesh: &RawMesh,
        poses: &[Pose],
        materials: &[Material],
    ) -> Result<Assembled, ExportError> {
        check_preconditions(mesh, poses)?;

        let all_positions = mesh
            .positions()
            .chain(poses.iter().flat_map(|p| p.positions()));
        let bounds = PositionBounds::from_positions(all_positions)
            .ok_or(ExportError::EmptyMesh)?;
        if bounds.is_degenerate() {
            return Err(ExportError::DegenerateBounds);
        }
        let quantizer = bounds.quantizer();
        tracing::debug!(
            "Quantizer: scale={:?} translate={:?}",
            quantizer.scale,
            quantizer.translate
        );

        let base_vertices = compress_vertices(&quantizer, &mesh.vertices);

        let mut warnings = Vec::new();
        let skins = self.resolve_skins(mesh, materials, &mut warnings)?;
        let skin_size = skins.first().map(|s| (s.width, s.height));
        let (skin_width, skin_height) = skin_size.unwrap_or((0, 0));

        let vertex_count = mesh.vertices.len();
        if mesh.uvs.len() != vertex_count {
            let warning = ExportWarning::UvCountMismatch {
                vertices: vertex_count,
                uvs: mesh.uvs.len(),
            };
            tracing::warn!("{}", warning);
            warnings.push(warning);
        }
        let texcoords = (0..vertex_count)
            .map(|i| {
                mesh.uvs
                    .get(i)
                    .map(|uv| pack_texcoord(*uv, skin_width, skin_height))
                    .unwrap_or_default()
            })
            .collect::<Vec<TexCoord>>();

        let triangles = mesh
            .triangles
            .iter()
            .map(|&indices| Triangle::new(indices))
            .collect();

        let mut frames = Vec::with_capacity(1 + poses.len());
        frames.push(Frame::build(&self.config.frame_name, base_vertices));
        for pose in poses {
            frames.push(Frame::build(
                &pose.name,
                compress_vertices(&quantizer, &pose.vertices),
            ));
        }

        let mut model = MdlModel {
            scale: quantizer.scale,
            translate: quantizer.translate,
            bounding_radius: 0.0,
            eye_position: self.config.eye_position(),
            skins,
            texcoords,
            triangles,
            frames,
        };
        model.bounding_radius = model.reconstructed_radius();

        tracing::info!(
            "Assembled model: {} verts, {} tris, {} frames, {} skins ({}x{}), radius {:.3}",
            model.texcoords.len(),
            model.triangles.len(),
            model.frames.len(),
            model.skins.len(),
            skin_width,
            skin_height,
            model.bounding_radius
        );

        Ok(Assembled { model, warnings })
    }

    /// One skin per material with a diffuse texture, the mesh's own material
    /// first. Later skins are resampled to the first skin's size. Without any
    /// diffuse texture a single fallback skin is produced.
    fn resolve_skins(
        &self,
        mesh: &RawMesh,
        materials: &[Material],
        warnings: &mut Vec<ExportWarning>,
    ) -> Result<Vec<Skin>, ExportError> {
        let primary = match mesh.material {
            Some(index) => {
                let material = materials.get(index);
                if material.is_none() {
                    let warning = ExportWarning::MissingMaterial { index };
                    tracing::warn!("{}", warning);
                    warnings.push(warning);
                }
                material
            }
            None => None,
        };
        let textured: Vec<&Material> = primary
            .into_iter()
            .chain(
                materials
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| Some(*i) != mesh.material)
                    .map(|(_, m)| m),
            )
            .filter(|m| m.diffuse.is_some())
            .collect();

        if textured.len() > MDL_FORMAT.max_skins {
            return Err(ExportError::TooManySkins {
                count: textured.len(),
                max: MDL_FORMAT.max_skins,
            });
        }

        if textured.is_empty() {
            let name = primary.map(|m| m.name.as_str()).unwrap_or("");
            let (texture, warning) = self
                .indexer
                .resolve(name, None, self.decoder.as_ref())
                .into_parts();
            warnings.extend(warning);
            return Ok(vec![texture.into_skin()]);
        }

        let mut skins: Vec<Skin> = Vec::with_capacity(textured.len());
        for material in textured {
            let size = skins.first().map(|s| (s.width, s.height));
            let (texture, warning) = self
                .indexer
                .resolve_sized(
                    &material.name,
                    material.diffuse.as_ref(),
                    self.decoder.as_ref(),
                    size,
                )
                .into_parts();
            warnings.extend(warning);
            skins.push(texture.into_skin());
        }
        Ok(skins)
    }
}

fn compress_vertices(quantizer: &VertexQuantizer, vertices: &[RawVertex]) -> Vec<TriVertex> {
    vertices
        .iter()
        .map(|v| pack_vertex(quantizer, v.position, v.normal))
        .collect()
}

fn check_preconditions(mesh: &RawMesh, poses: &[Pose]) -> Result<(), ExportError> {
    let vertex_count = mesh.vertices.len();
    if vertex_count == 0 {
        return Err(ExportError::EmptyMesh);
    }
    if vertex_count > MDL_FORMAT.max_verts {
        return Err(ExportError::TooManyVertices {
            count: vertex_count,
            max: MDL_FORMAT.max_verts,
        });
    }
    if mesh.triangles.len() > MDL_FORMAT.max_tris {
        return Err(ExportError::TooManyTriangles {
            count: mesh.triangles.len(),
            max: MDL_FORMAT.max_tris,
        });
    }
    let frame_count = 1 + poses.len();
    if frame_count > MDL_FORMAT.max_frames {
        return Err(ExportError::TooManyFrames {
            count: frame_count,
            max: MDL_FORMAT.max_frames,
        });
    }

    for (triangle, indices) in mesh.triangles.iter().enumerate() {
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(ExportError::TriangleIndexOutOfRange {
                triangle,
                index,
                vertex_count,
            });
        }
    }

    for pose in poses {
        if pose.vertices.len() != vertex_count {
            return Err(ExportError::PoseVertexCountMismatch {
                pose: pose.name.clone(),
                expected: vertex_count,
                found: pose.vertices.len(),
            });
        }
    }

    let frame_vertices = std::iter::once(mesh.vertices.as_slice())
        .chain(poses.iter().map(|p| p.vertices.as_slice()));
    for vertices in frame_vertices {
        if let Some(vertex) = vertices.iter().position(|v| !v.position.is_finite()) {
            return Err(ExportError::NonFinitePosition { vertex });
        }
    }

    Ok(())
}

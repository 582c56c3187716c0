//! File export and batch orchestration
//!
//! Each job owns its mesh data and produces its own model, so jobs run in
//! parallel without sharing state.

use std::path::{Path, PathBuf};

use mdl_common::formats::MdlHeader;
use mdl_common::validate::{ValidationReport, validate};
use mdlforge_shared::fs::{MAX_MODEL_BYTES, read_file_with_limit};
use rayon::prelude::*;

use crate::config::ExportConfig;
use crate::error::{ExportError, ExportWarning};
use crate::formats::write_mdl_file;
use crate::mesh::{Material, Pose, RawMesh};
use crate::model::{Assembled, ModelAssembler};

/// One model to build and write.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub mesh: RawMesh,
    /// Extra keyframes after the mesh's own frame.
    pub poses: Vec<Pose>,
    pub materials: Vec<Material>,
    pub output: PathBuf,
}

impl ExportJob {
    pub fn new(mesh: RawMesh, materials: Vec<Material>, output: impl Into<PathBuf>) -> Self {
        Self {
            mesh,
            poses: Vec::new(),
            materials,
            output: output.into(),
        }
    }

    pub fn with_poses(mut self, poses: Vec<Pose>) -> Self {
        self.poses = poses;
        self
    }
}

/// What a successful export produced.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub output: PathBuf,
    pub bytes: usize,
    pub header: MdlHeader,
    pub warnings: Vec<ExportWarning>,
}

/// Assemble one model and write it to `job.output`.
pub fn export_model(job: &ExportJob, config: &ExportConfig) -> Result<ExportSummary, ExportError> {
    let assembler = ModelAssembler::new(config.clone());
    let Assembled { model, warnings } =
        assembler.assemble_poses(&job.mesh, &job.poses, &job.materials)?;

    let bytes = write_mdl_file(&job.output, &model)?;
    tracing::info!(
        "Exported {}: {} verts, {} tris, {} frames, {} bytes",
        job.output.display(),
        model.texcoords.len(),
        model.triangles.len(),
        model.frames.len(),
        bytes
    );

    Ok(ExportSummary {
        output: job.output.clone(),
        bytes,
        header: model.header(),
        warnings,
    })
}

/// Export independent jobs in parallel.
///
/// Results are in job order. A failed job does not affect the others.
pub fn export_batch(
    jobs: &[ExportJob],
    config: &ExportConfig,
) -> Vec<Result<ExportSummary, ExportError>> {
    let results: Vec<_> = jobs
        .par_iter()
        .map(|job| export_model(job, config))
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        tracing::warn!("{} of {} exports failed", failed, jobs.len());
    }
    results
}

/// Validate a model file on disk.
///
/// Read failures become an error diagnostic instead of an `Err`.
pub fn validate_file(path: &Path) -> ValidationReport {
    match read_file_with_limit(path, MAX_MODEL_BYTES) {
        Ok(bytes) => validate(&bytes),
        Err(e) => ValidationReport::failed(format!("{e:#}")),
    }
}

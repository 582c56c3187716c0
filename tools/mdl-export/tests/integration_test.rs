//! Integration tests for mdl-export
//!
//! Tests the full pipeline: build mesh -> assemble -> write -> validate


use glam::Vec3;
use mdl_export::formats::{MdlHeader, Skin};
use mdl_export::{
    Assembled, ExportConfig, ExportJob, ExportWarning, Material, ModelAssembler, RawMesh,
    export_batch, export_model, validate, validate_file, write_mdl_file,
};
use tempfile::tempdir;

use generate_test_assets::{cube, generate_corrupt_png, generate_gradient_png, reference_triangle};

fn assemble(mesh: &RawMesh, materials: &[Material]) -> Assembled {
    ModelAssembler::new(ExportConfig::default())
        .assemble(mesh, materials)
        .expect("Failed to assemble model")
}

/// Check the parts of the header that never vary.
fn verify_fixed_header(header: &MdlHeader) {
    assert!(header.is_supported());
    assert_eq!(header.eye_position, [0.0, 0.0, 24.0]);
    assert_eq!(header.sync_type, 0);
    assert_eq!(header.flags, 0);
    assert_eq!(header.size, 1.0);
}

/// Single triangle, no material: every field of the file is known.
#[test]
fn test_reference_triangle_end_to_end() {
    let Assembled { model, warnings } = assemble(&reference_triangle(), &[]);
    assert_eq!(warnings, vec![ExportWarning::NoTexture]);

    let bytes = model.to_bytes();
    // header + 64x64 skin + 3 texcoords + 1 triangle + 1 frame of 3 verts
    assert_eq!(bytes.len(), 84 + (4 + 64 * 64) + 3 * 12 + 16 + (28 + 3 * 4));
    assert_eq!(bytes.len(), 4276);

    let header = MdlHeader::from_bytes(&bytes).expect("Header should parse");
    verify_fixed_header(&header);
    assert_eq!(header.scale, [10.0 / 255.0, 10.0 / 255.0, 1.0]);
    assert_eq!(header.translate, [0.0, 0.0, 0.0]);
    assert_eq!(header.num_skins, 1);
    assert_eq!((header.skin_width, header.skin_height), (64, 64));
    assert_eq!(header.num_verts, 3);
    assert_eq!(header.num_tris, 1);
    assert_eq!(header.num_frames, 1);

    // Triangle section: faces_front, then indices 0, 1, 2
    let tri_at = 84 + 4 + 64 * 64 + 3 * 12;
    let tri: Vec<u32> = bytes[tri_at..tri_at + 16]
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    assert_eq!(tri, vec![1, 0, 1, 2]);

    // Frame: all three normals point at codebook entry 5 (+Z)
    let frame_at = tri_at + 16;
    assert_eq!(&bytes[frame_at + 12..frame_at + 17], b"idle\0");
    let verts = &bytes[frame_at + 28..];
    assert_eq!(verts, &[0, 0, 0, 5, 255, 0, 0, 5, 0, 255, 0, 5]);
}

#[test]
fn test_header_roundtrip_through_validator() {
    let mut mesh = cube(4.0);
    mesh.material = None;
    let model = assemble(&mesh, &[]).model;

    let report = validate(&model.to_bytes());
    assert!(report.ok, "{:?}", report.diagnostics);
    let header = report.header.expect("Header should be reported");
    assert_eq!(header, model.header());
    assert_eq!(header.num_skins as usize, model.skins.len());
    assert_eq!(header.num_verts, 8);
    assert_eq!(header.num_tris, 12);
    assert_eq!(header.num_frames, 1);
}

#[test]
fn test_serialization_is_deterministic() {
    let dir = tempdir().expect("Failed to create temp dir");
    let png_path = dir.path().join("skin.png");
    generate_gradient_png(&png_path, 48, 40).expect("Failed to generate PNG");

    let mesh = cube(2.5);
    let materials = [Material::with_file("cube", &png_path)];
    let first = assemble(&mesh, &materials).model.to_bytes();
    let second = assemble(&mesh, &materials).model.to_bytes();
    assert_eq!(first, second);
}

#[test]
fn test_degenerate_axis() {
    let mesh = reference_triangle();
    let model = assemble(&mesh, &[]).model;

    assert_eq!(model.scale.z, 1.0);
    assert!(model.frames[0].vertices.iter().all(|v| v.v[2] == 0));
}

#[test]
fn test_unreadable_texture_falls_back() {
    let dir = tempdir().expect("Failed to create temp dir");
    let bad_png = dir.path().join("broken.png");
    generate_corrupt_png(&bad_png).expect("Failed to write file");

    for path in [bad_png, dir.path().join("missing.png")] {
        let mut mesh = reference_triangle();
        mesh.material = Some(0);
        let Assembled { model, warnings } = assemble(&mesh, &[Material::with_file("body", path)]);

        assert_eq!(model.skins.len(), 1);
        let skin: &Skin = &model.skins[0];
        assert_eq!((skin.width, skin.height), (64, 64));
        assert_eq!(skin.pixels.len(), 64 * 64);
        assert!(skin.pixels.iter().all(|&p| p == 0 || p == 255));
        assert_eq!(skin.pixels[0], 0);
        assert_eq!(skin.pixels[8], 255);
        assert_eq!(skin.pixels[8 * 64], 255);
        assert!(matches!(
            warnings.as_slice(),
            [ExportWarning::TextureUnreadable { material, .. }] if material == "body"
        ));
    }
}

#[test]
fn test_png_texture_is_indexed() {
    let dir = tempdir().expect("Failed to create temp dir");
    let png_path = dir.path().join("wide.png");
    generate_gradient_png(&png_path, 512, 128).expect("Failed to generate PNG");

    let Assembled { model, warnings } =
        assemble(&cube(1.0), &[Material::with_file("cube", &png_path)]);
    assert!(warnings.is_empty(), "{warnings:?}");
    assert_eq!(model.skin_size(), (256, 64));
    assert!(model.skins[0].validate());

    // uv (1, 1) on corner 2 lands on the far edge of the downsampled skin
    assert_eq!((model.texcoords[2].s, model.texcoords[2].t), (256, 64));
}

#[test]
fn test_long_frame_name_truncated() {
    let config = ExportConfig {
        frame_name: "walk_cycle_frame_number_one".to_string(),
        ..Default::default()
    };
    let model = ModelAssembler::new(config)
        .assemble(&reference_triangle(), &[])
        .expect("Failed to assemble model")
        .model;

    let bytes = model.to_bytes();
    let name_at = bytes.len() - 3 * 4 - 16;
    assert_eq!(&bytes[name_at..name_at + 16], b"walk_cycle_frame");
}

#[test]
fn test_atomic_write_replaces_previous_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("model.mdl");

    let small = assemble(&reference_triangle(), &[]).model;
    write_mdl_file(&path, &small).expect("Failed to write model");

    let mut mesh = cube(3.0);
    mesh.material = None;
    let big = assemble(&mesh, &[]).model;
    write_mdl_file(&path, &big).expect("Failed to write model");

    assert_eq!(std::fs::read(&path).unwrap(), big.to_bytes());
    assert!(!dir.path().join("model.mdl.tmp").exists());
    assert!(validate_file(&path).ok);
}

#[test]
fn test_failed_write_keeps_previous_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("model.mdl");
    let model = assemble(&reference_triangle(), &[]).model;
    write_mdl_file(&path, &model).expect("Failed to write model");

    // A directory where the temp file should go makes the write fail.
    std::fs::create_dir(dir.path().join("model.mdl.tmp")).unwrap();
    let mut mesh = cube(3.0);
    mesh.material = None;
    assert!(write_mdl_file(&path, &assemble(&mesh, &[]).model).is_err());

    assert_eq!(std::fs::read(&path).unwrap(), model.to_bytes());
}

#[test]
fn test_merged_meshes_export() {
    let dir = tempdir().expect("Failed to create temp dir");
    let left = reference_triangle();
    let mut right = reference_triangle();
    for v in &mut right.vertices {
        v.position += Vec3::new(20.0, 0.0, 5.0);
    }
    let merged = RawMesh::merge(&[left, right]);

    let job = ExportJob::new(merged, Vec::new(), dir.path().join("pair.mdl"));
    let summary = export_model(&job, &ExportConfig::default()).expect("Export failed");
    assert_eq!(summary.header.num_verts, 6);
    assert_eq!(summary.header.num_tris, 2);
    assert_eq!(summary.header.scale[0], 30.0 / 255.0);
}

#[test]
fn test_batch_export() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let dir = tempdir().expect("Failed to create temp dir");
    let jobs: Vec<ExportJob> = (1..=6)
        .map(|i| {
            let mut mesh = cube(i as f32);
            mesh.material = None;
            ExportJob::new(mesh, Vec::new(), dir.path().join(format!("cube{i}.mdl")))
        })
        .collect();

    let results = export_batch(&jobs, &ExportConfig::default());
    for (i, result) in results.iter().enumerate() {
        let summary = result.as_ref().expect("Export failed");
        assert_eq!(summary.output, jobs[i].output);
        let report = validate_file(&summary.output);
        assert!(report.ok, "{:?}", report.diagnostics);
        assert_eq!(
            report.header.map(|h| h.bounding_radius),
            Some(summary.header.bounding_radius)
        );
    }
}

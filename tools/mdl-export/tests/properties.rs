//! Property tests for quantization and radius derivation

use glam::Vec3;
use mdl_common::{NUM_NORMALS, VertexQuantizer, quantize_normal};
use mdl_export::{ExportConfig, ModelAssembler, RawMesh, RawVertex};
use proptest::prelude::*;

fn finite() -> impl Strategy<Value = f32> {
    -1000.0f32..1000.0
}

fn vec3() -> impl Strategy<Value = Vec3> {
    (finite(), finite(), finite()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn mesh_from(positions: &[Vec3]) -> RawMesh {
    RawMesh {
        vertices: positions
            .iter()
            .map(|&p| RawVertex::new(p, p.normalize_or_zero()))
            .collect(),
        uvs: vec![[0.5, 0.5]; positions.len()],
        triangles: vec![[0, 1, 2]],
        material: None,
    }
}

proptest! {
    #[test]
    fn normal_index_in_codebook(x in any::<f32>(), y in any::<f32>(), z in any::<f32>()) {
        let index = quantize_normal(Vec3::new(x, y, z));
        prop_assert!((index as usize) < NUM_NORMALS);
    }

    #[test]
    fn codes_cover_full_range(positions in prop::collection::vec(vec3(), 2..64)) {
        let q = VertexQuantizer::from_positions(positions.iter().copied()).unwrap();

        let codes: Vec<[u8; 3]> = positions.iter().map(|&p| q.compress(p)).collect();
        for axis in 0..3 {
            let lo = positions.iter().map(|p| p[axis]).fold(f32::INFINITY, f32::min);
            let hi = positions.iter().map(|p| p[axis]).fold(f32::NEG_INFINITY, f32::max);
            let min_code = codes.iter().map(|c| c[axis]).min().unwrap();
            let max_code = codes.iter().map(|c| c[axis]).max().unwrap();
            prop_assert_eq!(min_code, 0);

            let mut below = Vec3::ZERO;
            below[axis] = lo - (hi - lo) - 1.0;
            let mut above = Vec3::ZERO;
            above[axis] = hi + (hi - lo) + 1.0;
            prop_assert_eq!(q.compress(below)[axis], 0);
            if hi > lo {
                prop_assert_eq!(max_code, 255);
                prop_assert_eq!(q.compress(above)[axis], 255);
            } else {
                prop_assert_eq!(max_code, 0);
            }
        }
    }

    #[test]
    fn radius_grows_with_scale(
        positions in prop::collection::vec(vec3(), 3..32),
        k in 1.5f32..8.0,
    ) {
        let mesh = mesh_from(&positions);
        let bounds = mdl_common::PositionBounds::from_positions(positions.iter().copied()).unwrap();
        prop_assume!(bounds.extent().min_element() > 1e-3);

        let scaled: Vec<Vec3> = positions.iter().map(|&p| p * k).collect();
        let assembler = ModelAssembler::new(ExportConfig::default());
        let base = assembler.assemble(&mesh, &[]).unwrap().model.bounding_radius;
        let grown = assembler.assemble(&mesh_from(&scaled), &[]).unwrap().model.bounding_radius;

        prop_assert!(grown >= base * (1.0 - 1e-5), "base {} grown {}", base, grown);
    }
}

use aloft_geom::Vec3;
use aloft_mesh_cpu::MeshBuild;
use proptest::prelude::*;

fn small_f32() -> impl Strategy<Value = f32> {
    -1.0e4f32..1.0e4f32
}

fn arb_vertex() -> impl Strategy<Value = (Vec3, Vec3, (f32, f32))> {
    (
        (small_f32(), small_f32(), small_f32()),
        (small_f32(), small_f32(), small_f32()),
        (small_f32(), small_f32()),
    )
        .prop_map(|(p, n, uv)| {
            (
                Vec3::new(p.0, p.1, p.2),
                Vec3::new(n.0, n.1, n.2),
                uv,
            )
        })
}

proptest! {
    // push_vertex hands out consecutive indices and stores exactly what it got
    #[test]
    fn push_vertex_roundtrip(verts in proptest::collection::vec(arb_vertex(), 1..64)) {
        let mut mesh = MeshBuild::default();
        for (i, (p, n, uv)) in verts.iter().enumerate() {
            let idx = mesh.push_vertex(*p, *n, *uv);
            prop_assert_eq!(idx as usize, i);
        }
        prop_assert_eq!(mesh.vertex_count(), verts.len());
        for (i, (p, n, uv)) in verts.iter().enumerate() {
            prop_assert_eq!(mesh.vertex_position(i), *p);
            prop_assert_eq!(mesh.vertex_normal(i), *n);
            prop_assert_eq!((mesh.uvs()[i * 2], mesh.uvs()[i * 2 + 1]), *uv);
        }
    }

    // clear_keep_capacity empties the arrays but keeps the allocations
    #[test]
    fn clear_preserves_capacity(verts in proptest::collection::vec(arb_vertex(), 1..64)) {
        let mut mesh = MeshBuild::default();
        for (p, n, uv) in &verts {
            mesh.push_vertex(*p, *n, *uv);
        }
        mesh.push_triangle(0, 0, 0);
        let cap = mesh.pos.capacity();
        mesh.clear_keep_capacity();
        prop_assert_eq!(mesh.vertex_count(), 0);
        prop_assert_eq!(mesh.triangle_count(), 0);
        prop_assert!(mesh.pos.capacity() >= cap.min(1));
    }

    // reserve_grid makes room for the full grid without reallocation
    #[test]
    fn reserve_grid_is_sufficient(res in 1usize..=48) {
        let mut mesh = MeshBuild::default();
        mesh.reserve_grid(res);
        let cap_pos = mesh.pos.capacity();
        let cap_idx = mesh.idx.capacity();
        for _ in 0..(res + 1) * (res + 1) {
            mesh.push_vertex(Vec3::ZERO, Vec3::UP, (0.0, 0.0));
        }
        for _ in 0..res * res * 2 {
            mesh.push_triangle(0, 1, 2);
        }
        prop_assert_eq!(mesh.pos.capacity(), cap_pos);
        prop_assert_eq!(mesh.idx.capacity(), cap_idx);
    }
}

// Host-side tests for generated scene geometry.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sonic_planet::constants::*;
use sonic_planet::core::geometry::{particles, sphere};
use sonic_planet::core::Topology;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn planet_sphere_has_one_random_per_vertex() {
    let g = sphere(PLANET_RADIUS, PLANET_SEGMENTS, PLANET_SEGMENTS, &mut rng());
    assert_eq!(g.topology(), Topology::Triangles);
    assert_eq!(g.vertex_count(), 51 * 51);
    assert_eq!(g.random().item_size(), 1);
    assert_eq!(g.random().count(), g.vertex_count());
    assert!(g
        .random()
        .values()
        .iter()
        .all(|r| (0.0..1.0).contains(r)));
}

#[test]
fn planet_sphere_skips_pole_triangles() {
    let g = sphere(1.0, 50, 50, &mut rng());
    let indices = g.indices().expect("sphere is indexed");
    assert_eq!(indices.len(), 6 * 50 * 49);
    assert!(indices.iter().all(|&i| (i as usize) < g.vertex_count()));
}

#[test]
fn sphere_vertices_lie_on_the_surface() {
    let g = sphere(2.5, 12, 8, &mut rng());
    for p in g.positions() {
        let r = glam::Vec3::from(*p).length();
        assert!((r - 2.5).abs() < 1e-4, "radius {}", r);
    }
    for n in g.normals() {
        assert!((glam::Vec3::from(*n).length() - 1.0).abs() < 1e-4);
    }
}

#[test]
fn interleaved_vertices_carry_the_random_scalar() {
    let g = sphere(1.0, 4, 3, &mut rng());
    let verts = g.vertices();
    assert_eq!(verts.len(), g.vertex_count());
    for (v, r) in verts.iter().zip(g.random().values()) {
        assert_eq!(v.random, [*r, 0.0, 0.0]);
    }
}

#[test]
fn particle_field_fills_the_cube() {
    let g = particles(PARTICLE_COUNT, PARTICLE_SPREAD, &mut rng());
    assert_eq!(g.topology(), Topology::Points);
    assert_eq!(g.vertex_count(), 100_000);
    assert!(g.indices().is_none());
    let half = PARTICLE_SPREAD / 2.0;
    assert!(g
        .positions()
        .iter()
        .flatten()
        .all(|c| *c >= -half && *c < half));
}

#[test]
fn particle_jitter_is_a_vector_in_unit_range() {
    let g = particles(1_000, 10.0, &mut rng());
    assert_eq!(g.random().item_size(), 3);
    assert_eq!(g.random().count(), 1_000);
    assert!(g
        .random()
        .values()
        .iter()
        .all(|r| *r >= -1.0 && *r < 1.0));
    // points have no normals; upload zero-fills them
    assert!(g.vertices().iter().all(|v| v.normal == [0.0; 3]));
}

#[test]
fn empty_particle_field_is_valid() {
    let g = particles(0, 10.0, &mut rng());
    assert_eq!(g.vertex_count(), 0);
    assert!(g.vertices().is_empty());
}

// Host-side tests for the scene graph and its teardown.

use glam::Vec3;
use sonic_planet::core::{
    GeometryId, Material, Node, NodeKind, ResourceSink, Scene, TextureId,
};

#[derive(Default)]
struct CountingSink {
    geometries: Vec<GeometryId>,
    textures: Vec<TextureId>,
}

impl ResourceSink for CountingSink {
    fn release_geometry(&mut self, id: GeometryId) {
        self.geometries.push(id);
    }

    fn release_texture(&mut self, id: TextureId) {
        self.textures.push(id);
    }
}

fn planet_scene() -> Scene {
    let mut planet = Node::drawable("planet", NodeKind::Mesh, GeometryId(1), Material::planet());
    planet.add(Node::new("sound", NodeKind::PositionalAudio));
    let mut scene = Scene::new();
    scene.add(planet);
    scene
}

#[test]
fn dispose_releases_each_resource_once() {
    let mut scene = planet_scene();
    let mut extra = Node::drawable("moon", NodeKind::Mesh, GeometryId(2), Material::planet());
    if let Some(m) = extra.material.as_mut() {
        m.maps.map = Some(TextureId(10));
        m.maps.normal_map = Some(TextureId(11));
    }
    scene.add(extra);

    let mut sink = CountingSink::default();
    let report = scene.dispose(&mut sink);

    assert_eq!(report.nodes, 3);
    assert_eq!(report.geometries, 2);
    assert_eq!(report.textures, 2);
    assert_eq!(sink.geometries, vec![GeometryId(1), GeometryId(2)]);
    assert_eq!(sink.textures, vec![TextureId(10), TextureId(11)]);
    assert!(scene.is_empty());
    assert!(scene.find("sound").is_none());
}

#[test]
fn second_dispose_releases_nothing() {
    let mut scene = planet_scene();
    let mut sink = CountingSink::default();
    scene.dispose(&mut sink);
    let report = scene.dispose(&mut sink);
    assert_eq!(report.nodes, 0);
    assert_eq!(report.geometries, 0);
    assert_eq!(sink.geometries.len(), 1);
}

#[test]
fn children_follow_the_parent_transform() {
    let mut scene = planet_scene();
    if let Some(planet) = scene.find_mut("planet") {
        planet.position = Vec3::new(1.0, 2.0, 3.0);
    }
    let pos = scene.world_position_of("sound").expect("sound node");
    assert!((pos - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
}

#[test]
fn only_nodes_with_geometry_are_drawn() {
    let scene = planet_scene();
    let drawables = scene.drawables();
    assert_eq!(drawables.len(), 1);
    assert_eq!(drawables[0].geometry, GeometryId(1));
    assert_eq!(scene.root().descendant_count(), 2);
}

#[test]
fn rotating_the_object_spins_children_around_it() {
    let mut planet = Node::new("planet", NodeKind::Group);
    let mut child = Node::new("sound", NodeKind::PositionalAudio);
    child.position = Vec3::X;
    planet.add(child);
    planet.rotation.y = std::f32::consts::PI;
    let mut scene = Scene::new();
    scene.add(planet);
    let pos = scene.world_position_of("sound").expect("sound node");
    assert!((pos - Vec3::NEG_X).length() < 1e-5, "{:?}", pos);
}

#[test]
fn palette_is_converted_to_linear() {
    use sonic_planet::core::material::srgb_hex_to_linear;
    assert_eq!(srgb_hex_to_linear(0x000000), [0.0; 3]);
    assert_eq!(srgb_hex_to_linear(0xFFFFFF), [1.0; 3]);
    let [r, g, b] = srgb_hex_to_linear(0x31C48D);
    assert!(g > b && b > r);
}

#[test]
fn particle_material_blends_additively_without_depth() {
    use sonic_planet::core::Blending;
    let m = Material::particles();
    assert_eq!(m.blending, Blending::Additive);
    assert!(!m.depth_test && !m.depth_write);
    assert!(Material::planet().depth_test);
}

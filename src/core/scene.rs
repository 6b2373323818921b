//! Owned scene graph.
//!
//! Every node owns its children outright. Teardown is a single post-order
//! walk that drains each child list, so nothing stays reachable afterwards.

use glam::{EulerRot, Mat4, Quat, Vec3};

use super::material::{Material, TextureId};

/// Handle to geometry buffers owned by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeometryId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Group,
    Mesh,
    Points,
    PositionalAudio,
}

/// Receives GPU resources released while a scene is torn down.
pub trait ResourceSink {
    fn release_geometry(&mut self, id: GeometryId);
    fn release_texture(&mut self, id: TextureId);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisposeReport {
    /// Nodes detached from their parent.
    pub nodes: usize,
    pub geometries: usize,
    pub textures: usize,
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub geometry: Option<GeometryId>,
    pub material: Option<Material>,
    children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            geometry: None,
            material: None,
            children: Vec::new(),
        }
    }

    pub fn drawable(
        name: impl Into<String>,
        kind: NodeKind,
        geometry: GeometryId,
        material: Material,
    ) -> Self {
        let mut node = Self::new(name, kind);
        node.geometry = Some(geometry);
        node.material = Some(material);
        node
    }

    pub fn add(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn local_matrix(&self) -> Mat4 {
        let q = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, q, self.position)
    }

    /// Number of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }

    pub fn find(&self, name: &str) -> Option<&Node> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Node> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(name))
    }

    fn world_matrix_of(&self, name: &str, parent: Mat4) -> Option<Mat4> {
        let world = parent * self.local_matrix();
        if self.name == name {
            return Some(world);
        }
        self.children
            .iter()
            .find_map(|c| c.world_matrix_of(name, world))
    }

    fn collect_drawables<'a>(&'a self, parent: Mat4, out: &mut Vec<Drawable<'a>>) {
        let world = parent * self.local_matrix();
        if let (Some(geometry), Some(material)) = (self.geometry, self.material.as_ref()) {
            out.push(Drawable {
                geometry,
                material,
                world,
            });
        }
        for child in &self.children {
            child.collect_drawables(world, out);
        }
    }

    fn dispose_into(&mut self, sink: &mut dyn ResourceSink, report: &mut DisposeReport) {
        for mut child in std::mem::take(&mut self.children) {
            child.dispose_into(sink, report);
            report.nodes += 1;
        }
        if let Some(id) = self.geometry.take() {
            sink.release_geometry(id);
            report.geometries += 1;
        }
        if let Some(material) = self.material.as_mut() {
            report.textures += material.release_maps(|t| sink.release_texture(t));
        }
    }
}

/// A node with geometry and material, with its world transform resolved.
#[derive(Debug)]
pub struct Drawable<'a> {
    pub geometry: GeometryId,
    pub material: &'a Material,
    pub world: Mat4,
}

#[derive(Clone, Debug)]
pub struct Scene {
    root: Node,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            root: Node::new("scene", NodeKind::Group),
        }
    }

    pub fn add(&mut self, node: Node) {
        self.root.add(node);
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Node> {
        self.root.find(name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.root.find_mut(name)
    }

    pub fn world_matrix_of(&self, name: &str) -> Option<Mat4> {
        self.root.world_matrix_of(name, Mat4::IDENTITY)
    }

    pub fn world_position_of(&self, name: &str) -> Option<Vec3> {
        self.world_matrix_of(name)
            .map(|m| m.transform_point3(Vec3::ZERO))
    }

    /// Drawables in depth-first order.
    pub fn drawables(&self) -> Vec<Drawable<'_>> {
        let mut out = Vec::new();
        self.root.collect_drawables(Mat4::IDENTITY, &mut out);
        out
    }

    /// Release every geometry and material texture in the graph and detach
    /// all nodes. Running it again on an emptied scene releases nothing.
    pub fn dispose(&mut self, sink: &mut dyn ResourceSink) -> DisposeReport {
        let mut report = DisposeReport::default();
        self.root.dispose_into(sink, &mut report);
        report
    }
}

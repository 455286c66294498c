//! Scene model: mesh instances over a ground plane, the per-tick animation
//! policy, selection and the view accumulators.

use std::sync::Arc;

use asset::MeshAsset;

use crate::{
    Color, CoreError, CoreResult, Vec3,
    draw::{Canvas, PolygonMode, Primitive},
    transform::Transform,
    vec3,
};

/// Outline colour of the wireframe pass.
pub const WIREFRAME_COLOR: Color = Color::WHITE;
/// Colour of the vertical line from a node down to the ground.
pub const DROP_LINE_COLOR: Color = Color::BLACK;

/// Mouse units per degree when orbiting.
const ORBIT_SENSITIVITY: f32 = 5.0;
/// Mouse units per world unit when panning.
const PAN_SENSITIVITY: f32 = 100.0;
/// Wheel lines per world unit when zooming.
const ZOOM_SENSITIVITY: f32 = 1.0;

/// A placed, coloured instance of a shared mesh.
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub transform: Transform,
    pub color: Color,
    pub mesh: Arc<MeshAsset>,
}

impl SceneNode {
    pub fn new(mesh: Arc<MeshAsset>, position: Vec3) -> Self {
        Self {
            transform: Transform::new(position),
            color: Color::default(),
            mesh,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.transform = self.transform.with_scale(scale);
        self
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Draw with `color` under the current matrix, offset so `focus` lands at
    /// the origin, then the drop line to ground level.
    fn draw(&self, canvas: &mut dyn Canvas, focus: Vec3, color: Color) {
        let t = &self.transform;
        let rel = t.position - focus;

        canvas.push_matrix();
        canvas.set_color(color);
        canvas.translate(rel);
        canvas.rotate(t.rotation.x, Vec3::X);
        canvas.rotate(t.rotation.y, Vec3::Y);
        canvas.rotate(t.rotation.z, Vec3::Z);
        canvas.scale(t.scale);
        canvas.draw_mesh(&self.mesh, Primitive::Quads);
        canvas.draw_mesh(&self.mesh, Primitive::Triangles);
        canvas.pop_matrix();

        canvas.set_polygon_mode(PolygonMode::Fill);
        canvas.set_color(DROP_LINE_COLOR);
        canvas.draw_line(rel, vec3(rel.x, -focus.y, rel.z));
    }
}

/// Large textured square at ground height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundPlane {
    pub half_size: f32,
}

impl GroundPlane {
    pub const UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    /// Corners at height `y`, counter-clockwise seen from above.
    pub fn corners(&self, y: f32) -> [Vec3; 4] {
        let s = self.half_size;
        [vec3(-s, y, -s), vec3(s, y, -s), vec3(s, y, s), vec3(-s, y, s)]
    }
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self { half_size: 100.0 }
    }
}

/// Per-tick animation: node 0 spins about x, node 1 about y, the rest spin
/// about z while sinking. Rates are per second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpdatePolicy {
    /// Degrees per second.
    pub spin_rate: f32,
    /// World units per second.
    pub fall_rate: f32,
    pub ticks_per_second: u32,
}

impl UpdatePolicy {
    #[inline]
    pub fn spin_per_tick(&self) -> f32 {
        self.spin_rate / self.ticks_per_second.max(1) as f32
    }

    #[inline]
    pub fn fall_per_tick(&self) -> f32 {
        self.fall_rate / self.ticks_per_second.max(1) as f32
    }

    pub fn apply(&self, nodes: &mut [SceneNode]) {
        let spin = self.spin_per_tick();
        let fall = self.fall_per_tick();
        for (i, node) in nodes.iter_mut().enumerate() {
            let t = &mut node.transform;
            match i {
                0 => t.rotation.x += spin,
                1 => t.rotation.y += spin,
                _ => {
                    t.rotation.z += spin;
                    t.position.y -= fall;
                }
            }
        }
    }
}

impl Default for UpdatePolicy {
    fn default() -> Self {
        Self {
            spin_rate: 10.0,
            fall_rate: 0.1,
            ticks_per_second: 100,
        }
    }
}

/// Ordered nodes plus the view accumulators and ground backdrop.
#[derive(Clone, Debug)]
pub struct Scene {
    /// View translation; `z` is the zoom depth.
    pub origin: Vec3,
    /// View rotation in degrees about x, y, z.
    pub orientation: Vec3,
    /// Point every node draw is offset by.
    pub focus: Vec3,
    pub background: Color,
    pub ground: GroundPlane,
    nodes: Vec<SceneNode>,
    focused: usize,
}

impl Scene {
    pub fn new(origin: Vec3, nodes: Vec<SceneNode>) -> Self {
        Self {
            origin,
            orientation: Vec3::ZERO,
            focus: Vec3::ZERO,
            background: Color::SKY,
            ground: GroundPlane::default(),
            nodes,
            focused: 0,
        }
    }

    #[inline]
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node; it is drawn after every existing node.
    pub fn push_node(&mut self, node: SceneNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Remove a node, keeping the selection on the same node when possible.
    pub fn remove_node(&mut self, index: usize) -> CoreResult<SceneNode> {
        self.check_index(index)?;
        let node = self.nodes.remove(index);
        if index < self.focused || self.focused >= self.nodes.len() {
            self.focused = self.focused.saturating_sub(1);
        }
        Ok(node)
    }

    #[inline]
    pub fn focused_index(&self) -> usize {
        self.focused
    }

    pub fn focused_node(&self) -> Option<&SceneNode> {
        self.nodes.get(self.focused)
    }

    pub fn select(&mut self, index: usize) -> CoreResult<()> {
        self.check_index(index)?;
        self.focused = index;
        Ok(())
    }

    pub fn select_next(&mut self) {
        if !self.nodes.is_empty() {
            self.focused = (self.focused + 1) % self.nodes.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.nodes.is_empty() {
            let len = self.nodes.len();
            self.focused = (self.focused + len - 1) % len;
        }
    }

    /// Yaw from horizontal drag, pitch from vertical drag (y up).
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.orientation.y += dx / ORBIT_SENSITIVITY;
        self.orientation.x -= dy / ORBIT_SENSITIVITY;
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.origin.x += dx / PAN_SENSITIVITY;
        self.origin.y += dy / PAN_SENSITIVITY;
    }

    pub fn zoom(&mut self, scroll: f32) {
        self.origin.z += scroll / ZOOM_SENSITIVITY;
    }

    /// Advance the animation one tick, then follow the focused node.
    pub fn tick(&mut self, policy: &UpdatePolicy) {
        policy.apply(&mut self.nodes);
        if let Some(node) = self.focused_node() {
            self.focus = node.position();
        }
    }

    /// Issue one frame: clear, base transform, ground, then each node filled
    /// and outlined in insertion order.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(self.background);

        canvas.load_identity();
        canvas.translate(self.origin);
        canvas.rotate(self.orientation.x, Vec3::X);
        canvas.rotate(self.orientation.y, Vec3::Y);
        canvas.rotate(self.orientation.z, Vec3::Z);

        canvas.push_matrix();
        canvas.set_color(Color::WHITE);
        canvas.draw_ground(self.ground.corners(-self.focus.y), GroundPlane::UVS);
        canvas.pop_matrix();

        for node in &self.nodes {
            canvas.set_polygon_mode(PolygonMode::Fill);
            node.draw(canvas, self.focus, node.color);

            canvas.set_polygon_mode(PolygonMode::Line);
            node.draw(canvas, self.focus, WIREFRAME_COLOR);
        }
    }

    fn check_index(&self, index: usize) -> CoreResult<()> {
        if index < self.nodes.len() {
            Ok(())
        } else {
            Err(CoreError::NodeIndexOutOfRange {
                index,
                len: self.nodes.len(),
            })
        }
    }
}

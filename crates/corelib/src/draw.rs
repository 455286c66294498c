//! Drawing capability the presentation layer provides to the scene.
//!
//! The interface follows a fixed-function model: a current matrix with a
//! push/pop stack, a polygon mode and a current colour, plus indexed mesh
//! batches, lines and the textured ground quad. Backends only implement the
//! state sinks and the draw calls; matrix bookkeeping comes from [`MatrixStack`].

use std::sync::Arc;

use asset::MeshAsset;

use crate::{Color, Mat4, Vec3};

/// How polygons are rasterized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PolygonMode {
    #[default]
    Fill,
    /// Outline only.
    Line,
}

/// Which index batch of a mesh to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Quads,
    Triangles,
}

/// Current model matrix plus saved copies, post-multiplied like a GL stack.
#[derive(Clone, Debug)]
pub struct MatrixStack {
    current: Mat4,
    saved: Vec<Mat4>,
}

impl MatrixStack {
    pub fn new() -> Self {
        Self {
            current: Mat4::IDENTITY,
            saved: Vec::new(),
        }
    }

    #[inline]
    pub fn current(&self) -> Mat4 {
        self.current
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn load_identity(&mut self) {
        self.current = Mat4::IDENTITY;
    }

    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    pub fn pop(&mut self) {
        match self.saved.pop() {
            Some(m) => self.current = m,
            None => debug_assert!(false, "matrix stack underflow"),
        }
    }

    pub fn multiply(&mut self, m: Mat4) {
        self.current *= m;
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.multiply(Mat4::from_translation(offset));
    }

    pub fn rotate(&mut self, degrees: f32, axis: Vec3) {
        self.multiply(Mat4::from_axis_angle(axis.normalize(), degrees.to_radians()));
    }

    pub fn scale(&mut self, factor: f32) {
        self.multiply(Mat4::from_scale(Vec3::splat(factor)));
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Immediate-mode drawing surface for one frame.
pub trait Canvas {
    /// Matrix state used by the provided transform methods.
    fn matrices(&mut self) -> &mut MatrixStack;

    /// Clear colour and depth.
    fn clear(&mut self, color: Color);

    fn set_polygon_mode(&mut self, mode: PolygonMode);

    fn set_color(&mut self, color: Color);

    /// Draw one index batch of `mesh` under the current matrix.
    fn draw_mesh(&mut self, mesh: &Arc<MeshAsset>, primitive: Primitive);

    fn draw_line(&mut self, from: Vec3, to: Vec3);

    /// Textured quad, corners in order with matching texture coordinates.
    fn draw_ground(&mut self, corners: [Vec3; 4], uvs: [[f32; 2]; 4]);

    fn load_identity(&mut self) {
        self.matrices().load_identity();
    }

    fn push_matrix(&mut self) {
        self.matrices().push();
    }

    fn pop_matrix(&mut self) {
        self.matrices().pop();
    }

    fn translate(&mut self, offset: Vec3) {
        self.matrices().translate(offset);
    }

    fn rotate(&mut self, degrees: f32, axis: Vec3) {
        self.matrices().rotate(degrees, axis);
    }

    fn scale(&mut self, factor: f32) {
        self.matrices().scale(factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3;

    #[test]
    fn push_pop_restores_matrix() {
        let mut stack = MatrixStack::new();
        stack.translate(vec3(1.0, 0.0, 0.0));
        let before = stack.current();
        stack.push();
        stack.rotate(45.0, Vec3::Y);
        stack.scale(3.0);
        assert_ne!(stack.current(), before);
        stack.pop();
        assert_eq!(stack.current(), before);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn operations_compose_outer_to_inner() {
        let mut stack = MatrixStack::new();
        stack.translate(vec3(0.0, 0.0, -5.0));
        stack.scale(2.0);
        let p = stack.current().transform_point3(vec3(1.0, 0.0, 0.0));
        assert!((p - vec3(2.0, 0.0, -5.0)).length() < 1e-6);
    }
}

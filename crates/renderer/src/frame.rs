//! CPU-side frame recording.
//! The scene draws into a [`FrameRecorder`]; the GPU state then uploads what
//! it references and replays the items in order inside one render pass.

use std::sync::Arc;

use asset::MeshAsset;
use bytemuck::{Pod, Zeroable};
use corelib::{
    Color, Mat4, Vec3,
    draw::{Canvas, MatrixStack, PolygonMode, Primitive},
};

/// Ground vertex: position + texture coordinate.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, PartialEq)]
pub struct GroundVertex {
    pub pos: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug)]
pub enum DrawKind {
    Mesh {
        mesh: Arc<MeshAsset>,
        primitive: Primitive,
        mode: PolygonMode,
    },
    /// Two vertices starting at `first` in the frame's line buffer.
    Line { first: u32 },
    Ground,
}

/// One recorded draw with the state current when it was issued.
#[derive(Clone, Debug)]
pub struct DrawItem {
    pub kind: DrawKind,
    pub model: Mat4,
    pub color: Color,
}

#[derive(Default)]
pub struct FrameRecorder {
    matrices: MatrixStack,
    mode: PolygonMode,
    color: Color,
    clear: Option<Color>,
    items: Vec<DrawItem>,
    line_vertices: Vec<[f32; 3]>,
    ground: Option<[GroundVertex; 4]>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear_color(&self) -> Option<Color> {
        self.clear
    }

    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn line_vertices(&self) -> &[[f32; 3]] {
        &self.line_vertices
    }

    #[inline]
    pub fn ground(&self) -> Option<&[GroundVertex; 4]> {
        self.ground.as_ref()
    }

    fn record(&mut self, kind: DrawKind) {
        self.items.push(DrawItem {
            kind,
            model: self.matrices.current(),
            color: self.color,
        });
    }
}

impl Canvas for FrameRecorder {
    fn matrices(&mut self) -> &mut MatrixStack {
        &mut self.matrices
    }

    fn clear(&mut self, color: Color) {
        self.clear = Some(color);
        self.items.clear();
        self.line_vertices.clear();
        self.ground = None;
    }

    fn set_polygon_mode(&mut self, mode: PolygonMode) {
        self.mode = mode;
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn draw_mesh(&mut self, mesh: &Arc<MeshAsset>, primitive: Primitive) {
        self.record(DrawKind::Mesh {
            mesh: Arc::clone(mesh),
            primitive,
            mode: self.mode,
        });
    }

    fn draw_line(&mut self, from: Vec3, to: Vec3) {
        let first = self.line_vertices.len() as u32;
        self.line_vertices.push(from.to_array());
        self.line_vertices.push(to.to_array());
        self.record(DrawKind::Line { first });
    }

    fn draw_ground(&mut self, corners: [Vec3; 4], uvs: [[f32; 2]; 4]) {
        let vertices = std::array::from_fn(|i| GroundVertex {
            pos: corners[i].to_array(),
            uv: uvs[i],
        });
        self.ground = Some(vertices);
        self.record(DrawKind::Ground);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::{
        Scene, SceneNode, vec3,
        scene::{DROP_LINE_COLOR, WIREFRAME_COLOR},
    };

    fn quad() -> Arc<MeshAsset> {
        Arc::new(MeshAsset::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
            vec![0, 1, 2, 3],
            vec![],
        ))
    }

    #[test]
    fn lines_index_into_shared_buffer() {
        let mut frame = FrameRecorder::new();
        frame.draw_line(Vec3::ZERO, Vec3::Y);
        frame.draw_line(Vec3::X, Vec3::Z);
        assert_eq!(frame.line_vertices().len(), 4);
        assert!(matches!(frame.items()[1].kind, DrawKind::Line { first: 2 }));
    }

    #[test]
    fn mesh_items_capture_state() {
        let mut frame = FrameRecorder::new();
        frame.translate(vec3(0.0, 0.0, -5.0));
        frame.set_polygon_mode(PolygonMode::Line);
        frame.set_color(Color::RED);
        frame.draw_mesh(&quad(), Primitive::Quads);

        let item = &frame.items()[0];
        assert_eq!(item.color, Color::RED);
        assert_eq!(item.model, Mat4::from_translation(vec3(0.0, 0.0, -5.0)));
        assert!(matches!(
            item.kind,
            DrawKind::Mesh {
                mode: PolygonMode::Line,
                primitive: Primitive::Quads,
                ..
            }
        ));
    }

    #[test]
    fn clear_starts_a_new_frame() {
        let mut frame = FrameRecorder::new();
        frame.draw_line(Vec3::ZERO, Vec3::Y);
        frame.clear(Color::SKY);
        assert!(frame.items().is_empty());
        assert!(frame.line_vertices().is_empty());
        assert_eq!(frame.clear_color(), Some(Color::SKY));
    }

    #[test]
    fn records_a_whole_scene() {
        let mesh = quad();
        let scene = Scene::new(
            vec3(0.0, 0.0, -5.0),
            vec![
                SceneNode::new(mesh.clone(), vec3(0.0, 2.0, 0.0)).with_color(Color::RED),
                SceneNode::new(mesh, vec3(1.0, 3.0, 0.0)).with_color(Color::BLUE),
            ],
        );
        let mut frame = FrameRecorder::new();
        scene.draw(&mut frame);

        assert!(frame.ground().is_some());
        assert!(matches!(frame.items()[0].kind, DrawKind::Ground));
        // Per node: two filled batches, drop line, two outline batches, drop line.
        assert_eq!(frame.items().len(), 1 + 2 * 6);
        assert_eq!(frame.line_vertices().len(), 2 * 2 * 2);
        let outlines = frame
            .items()
            .iter()
            .filter(|i| {
                matches!(i.kind, DrawKind::Mesh { mode: PolygonMode::Line, .. })
                    && i.color == WIREFRAME_COLOR
            })
            .count();
        assert_eq!(outlines, 4);
        assert!(
            frame
                .items()
                .iter()
                .filter(|i| matches!(i.kind, DrawKind::Line { .. }))
                .all(|i| i.color == DROP_LINE_COLOR)
        );
    }
}

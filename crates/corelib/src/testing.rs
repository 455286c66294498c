//! Test doubles shared by the unit tests.

use std::sync::Arc;

use asset::MeshAsset;

use crate::{
    Color, Mat4, Vec3,
    draw::{Canvas, MatrixStack, PolygonMode, Primitive},
};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Clear(Color),
    Ground {
        model: Mat4,
        corners: [Vec3; 4],
    },
    Mesh {
        model: Mat4,
        mode: PolygonMode,
        color: Color,
        primitive: Primitive,
    },
    Line {
        model: Mat4,
        from: Vec3,
        to: Vec3,
        color: Color,
    },
}

/// Canvas that records draw calls together with the state they were issued in.
#[derive(Default)]
pub struct RecordingCanvas {
    pub matrices: MatrixStack,
    pub mode: PolygonMode,
    pub color: Color,
    pub calls: Vec<Call>,
}

impl Canvas for RecordingCanvas {
    fn matrices(&mut self) -> &mut MatrixStack {
        &mut self.matrices
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(Call::Clear(color));
    }

    fn set_polygon_mode(&mut self, mode: PolygonMode) {
        self.mode = mode;
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn draw_mesh(&mut self, _mesh: &Arc<MeshAsset>, primitive: Primitive) {
        self.calls.push(Call::Mesh {
            model: self.matrices.current(),
            mode: self.mode,
            color: self.color,
            primitive,
        });
    }

    fn draw_line(&mut self, from: Vec3, to: Vec3) {
        self.calls.push(Call::Line {
            model: self.matrices.current(),
            from,
            to,
            color: self.color,
        });
    }

    fn draw_ground(&mut self, corners: [Vec3; 4], _uvs: [[f32; 2]; 4]) {
        self.calls.push(Call::Ground {
            model: self.matrices.current(),
            corners,
        });
    }
}

pub fn unit_quad() -> Arc<MeshAsset> {
    Arc::new(MeshAsset::new(
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        vec![0, 1, 2, 3],
        vec![],
    ))
}

//! Core types: math re-exports, colours, transforms, the scene model and the
//! capabilities the presentation layer implements (drawing, input).

pub use glam::{Mat4, Vec3, vec3};
use thiserror::Error;

pub mod camera;
pub mod color;
pub mod draw;
pub mod input;
pub mod scene;
pub mod tick;
pub mod transform;
pub mod viewer;

#[cfg(test)]
mod testing;

pub use color::Color;
pub use scene::{Scene, SceneNode, UpdatePolicy};
pub use viewer::Viewer;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("node index {index} out of range for {len} nodes")]
    NodeIndexOutOfRange { index: usize, len: usize },
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform_is_identity_matrix() {
        let t = transform::Transform::identity();
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn translate_then_scale_matrix() {
        let t = transform::Transform::new(vec3(1.0, 2.0, 3.0)).with_scale(2.0);
        // Last column is the translation, the diagonal is the scale when unrotated.
        let m = t.matrix().to_cols_array();
        assert!((m[12] - 1.0).abs() < 1e-6);
        assert!((m[13] - 2.0).abs() < 1e-6);
        assert!((m[14] - 3.0).abs() < 1e-6);
        assert!((m[0] - 2.0).abs() < 1e-6);
        assert!((m[5] - 2.0).abs() < 1e-6);
        assert!((m[10] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn projection_is_finite() {
        let proj = camera::Projection::default().with_viewport(400, 300);
        let a = proj.matrix().to_cols_array();
        assert!(a.iter().all(|f| f.is_finite()));
    }

    #[test]
    fn error_message_names_bounds() {
        let e = CoreError::NodeIndexOutOfRange { index: 4, len: 3 };
        assert_eq!(e.to_string(), "node index 4 out of range for 3 nodes");
    }
}

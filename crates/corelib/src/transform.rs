use crate::{Mat4, Vec3};

/// Placement of a node: translation, Euler rotation in degrees applied about
/// x then y then z, and a uniform scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Degrees about each axis.
    pub rotation: Vec3,
    pub scale: f32,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }

    #[inline]
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    #[inline]
    pub fn with_rotation(mut self, degrees: Vec3) -> Self {
        self.rotation = degrees;
        self
    }

    #[inline]
    pub fn with_scale(mut self, scale: f32) -> Self {
        debug_assert!(scale > 0.0, "scale must be positive");
        self.scale = scale;
        self
    }

    /// Rotation-and-scale part: Rx * Ry * Rz * S.
    #[inline]
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.rotation.x.to_radians())
            * Mat4::from_rotation_y(self.rotation.y.to_radians())
            * Mat4::from_rotation_z(self.rotation.z.to_radians())
            * Mat4::from_scale(Vec3::splat(self.scale))
    }

    /// Build matrix = T * Rx * Ry * Rz * S (column-major Mat4 per glam).
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * self.local_matrix()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3;

    #[test]
    fn rotation_order_is_x_then_y_then_z() {
        let t = Transform::identity().with_rotation(vec3(90.0, 90.0, 0.0));
        // Ry first moves +Z onto +X, Rx then leaves +X alone.
        let p = t.matrix().transform_point3(Vec3::Z);
        assert!((p - Vec3::X).length() < 1e-5, "{p:?}");
    }

    #[test]
    fn scale_applies_before_translation() {
        let t = Transform::new(vec3(0.0, 1.0, 0.0)).with_scale(0.5);
        let p = t.matrix().transform_point3(vec3(2.0, 0.0, 0.0));
        assert!((p - vec3(1.0, 1.0, 0.0)).length() < 1e-6);
    }
}

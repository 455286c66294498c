use crate::Mat4;

/// Perspective projection for the viewer window (right-handed, depth in [0, 1]).
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    pub fov_y_deg: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub aspect: f32,
}

impl Projection {
    pub fn new(fov_y_deg: f32, z_near: f32, z_far: f32, aspect: f32) -> Self {
        Self {
            fov_y_deg,
            z_near,
            z_far,
            aspect,
        }
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_deg.to_radians(),
            self.aspect.max(1e-6),
            self.z_near,
            self.z_far,
        )
    }

    #[inline]
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    #[inline]
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.set_viewport(width, height);
        self
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(90.0, 0.1, 10_000.0, 1.0)
    }
}

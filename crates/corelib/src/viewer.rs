//! Application object: the scene, its animation policy and the projection,
//! driven through [`InputHandler`].

use crate::{
    Mat4,
    camera::Projection,
    draw::Canvas,
    input::{DragButtons, Flow, InputHandler, Key},
    scene::{Scene, UpdatePolicy},
};

#[derive(Clone, Debug)]
pub struct Viewer {
    scene: Scene,
    policy: UpdatePolicy,
    projection: Projection,
}

impl Viewer {
    pub fn new(scene: Scene, policy: UpdatePolicy) -> Self {
        Self {
            scene,
            policy,
            projection: Projection::default(),
        }
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.projection.matrix()
    }
}

impl InputHandler for Viewer {
    fn on_resize(&mut self, width: u32, height: u32) {
        self.projection.set_viewport(width, height);
    }

    fn on_draw(&self, canvas: &mut dyn Canvas) {
        self.scene.draw(canvas);
    }

    fn on_key(&mut self, key: Key) -> Flow {
        match key {
            Key::Right => self.scene.select_next(),
            Key::Left => self.scene.select_previous(),
            Key::Escape => return Flow::Exit,
        }
        log::info!(
            "Focused node {}/{}",
            self.scene.focused_index() + 1,
            self.scene.len()
        );
        Flow::Continue
    }

    fn on_scroll(&mut self, delta: f32) {
        self.scene.zoom(delta);
    }

    fn on_drag(&mut self, dx: f32, dy: f32, buttons: DragButtons) {
        match buttons {
            DragButtons {
                primary: true,
                secondary: true,
            } => self.scene.pan(dx, dy),
            DragButtons { primary: true, .. } => self.scene.orbit(dx, dy),
            _ => {}
        }
    }

    fn on_tick(&mut self) {
        self.scene.tick(&self.policy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Vec3,
        scene::SceneNode,
        testing::{RecordingCanvas, unit_quad},
        vec3,
    };

    fn viewer() -> Viewer {
        let mesh = unit_quad();
        let nodes = (0..3)
            .map(|i| SceneNode::new(mesh.clone(), vec3(i as f32, 1.0, 0.0)))
            .collect();
        Viewer::new(Scene::new(vec3(0.0, 0.0, -5.0), nodes), UpdatePolicy::default())
    }

    #[test]
    fn arrow_keys_cycle_selection() {
        let mut v = viewer();
        assert_eq!(v.on_key(Key::Left), Flow::Continue);
        assert_eq!(v.scene().focused_index(), 2);
        v.on_key(Key::Right);
        v.on_key(Key::Right);
        assert_eq!(v.scene().focused_index(), 1);
        assert_eq!(v.on_key(Key::Escape), Flow::Exit);
    }

    #[test]
    fn drag_buttons_pick_orbit_or_pan() {
        let mut v = viewer();
        let left = DragButtons {
            primary: true,
            secondary: false,
        };
        let both = DragButtons {
            primary: true,
            secondary: true,
        };
        v.on_drag(5.0, 10.0, left);
        assert_eq!(v.scene().orientation, vec3(-2.0, 1.0, 0.0));
        assert_eq!(v.scene().origin, vec3(0.0, 0.0, -5.0));

        v.on_drag(100.0, 200.0, both);
        assert_eq!(v.scene().origin, vec3(1.0, 2.0, -5.0));
        assert_eq!(v.scene().orientation, vec3(-2.0, 1.0, 0.0));

        v.on_drag(100.0, 100.0, DragButtons::default());
        assert_eq!(v.scene().origin, vec3(1.0, 2.0, -5.0));
    }

    #[test]
    fn scroll_zooms() {
        let mut v = viewer();
        v.on_scroll(1.5);
        assert_eq!(v.scene().origin.z, -3.5);
    }

    #[test]
    fn resize_changes_aspect() {
        let mut v = viewer();
        let square = v.projection();
        v.on_resize(800, 400);
        assert_ne!(v.projection(), square);
    }

    #[test]
    fn tick_then_draw() {
        let mut v = viewer();
        v.on_tick();
        assert!(v.scene().nodes()[0].transform.rotation.x > 0.0);
        assert_ne!(v.scene().focus, Vec3::ZERO);
        let mut canvas = RecordingCanvas::default();
        v.on_draw(&mut canvas);
        assert!(!canvas.calls.is_empty());
    }
}

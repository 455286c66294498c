//! The demo layout: two boxes and a small pyramid hovering over the grass.

use std::sync::Arc;

use anyhow::{Context, Result};
use asset::{MeshAsset, obj::load_obj_from_path};
use corelib::{Color, Scene, SceneNode, vec3};

use crate::config::AppConfig;

pub const BOX_MESH: &str = "box.obj";
pub const PYRAMID_MESH: &str = "pyramid.obj";

pub struct DemoMeshes {
    pub cube: Arc<MeshAsset>,
    pub pyramid: Arc<MeshAsset>,
}

impl DemoMeshes {
    pub fn load(config: &AppConfig) -> Result<Self> {
        let load = |name: &str| -> Result<Arc<MeshAsset>> {
            let path = config.mesh_path(name);
            let mesh = load_obj_from_path(&path)
                .with_context(|| format!("Failed to load mesh {}", path.display()))?;
            Ok(Arc::new(mesh))
        };
        Ok(Self {
            cube: load(BOX_MESH)?,
            pyramid: load(PYRAMID_MESH)?,
        })
    }
}

/// Scene seen from five units back; the third node sinks while spinning.
pub fn build_scene(meshes: &DemoMeshes) -> Scene {
    let nodes = vec![
        SceneNode::new(meshes.cube.clone(), vec3(-1.0, 2.0, -3.5))
            .with_color(Color::RED)
            .with_scale(0.5),
        SceneNode::new(meshes.cube.clone(), vec3(1.0, 2.0, -3.5)).with_color(Color::BLUE),
        SceneNode::new(meshes.pyramid.clone(), vec3(2.0, 4.0, 2.0))
            .with_color(Color::YELLOW)
            .with_scale(0.1),
    ];
    Scene::new(vec3(0.0, 0.0, -5.0), nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn shipped_assets() -> AppConfig {
        AppConfig {
            assets: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets"),
            ..AppConfig::default()
        }
    }

    #[test]
    fn shipped_meshes_load() {
        let meshes = DemoMeshes::load(&shipped_assets()).expect("load assets");
        assert_eq!(meshes.cube.positions.len(), 8);
        assert_eq!(meshes.cube.quad_count(), 6);
        assert_eq!(meshes.pyramid.triangle_count(), 4);
        assert_eq!(meshes.pyramid.quad_count(), 1);
        assert!(meshes.cube.validate().is_ok() && meshes.pyramid.validate().is_ok());
    }

    #[test]
    fn demo_layout() {
        let meshes = DemoMeshes::load(&shipped_assets()).expect("load assets");
        let scene = build_scene(&meshes);
        assert_eq!(scene.len(), 3);
        assert_eq!(scene.origin, vec3(0.0, 0.0, -5.0));
        assert!(Arc::ptr_eq(&scene.nodes()[0].mesh, &scene.nodes()[1].mesh));
        assert_eq!(scene.nodes()[2].transform.scale, 0.1);
    }

    #[test]
    fn missing_assets_fail_with_path() {
        let cfg = AppConfig {
            assets: PathBuf::from("does/not/exist"),
            ..AppConfig::default()
        };
        let err = DemoMeshes::load(&cfg).err().expect("should fail");
        assert!(format!("{err:#}").contains("box.obj"));
    }
}

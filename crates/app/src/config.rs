//! Command-line configuration.
//! Flags: --gpu-backend=auto|vulkan|dx12|metal|gl, --size=WxH, --width=, --height=,
//! --title=, --assets=DIR

use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub backends: wgpu::Backends,
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub assets: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            width: 400,
            height: 400,
            title: "OBJ Viewer".to_owned(),
            assets: PathBuf::from("assets"),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_args(std::env::args().skip(1))
    }

    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut cfg = Self::default();
        let mut w: Option<u32> = None;
        let mut h: Option<u32> = None;

        for arg in args {
            if let Some(val) = arg.strip_prefix("--gpu-backend=") {
                cfg.backends = parse_backend(val);
            } else if let Some(v) = arg.strip_prefix("--size=") {
                match v.split_once('x').or_else(|| v.split_once('X')) {
                    Some((sw, sh)) => {
                        if let (Ok(pw), Ok(ph)) = (sw.parse::<u32>(), sh.parse::<u32>()) {
                            w = Some(pw);
                            h = Some(ph);
                        } else {
                            log::warn!("Ignoring malformed --size={v}");
                        }
                    }
                    None => log::warn!("Ignoring malformed --size={v}"),
                }
            } else if let Some(v) = arg.strip_prefix("--width=") {
                if let Ok(pw) = v.parse::<u32>() {
                    w = Some(pw);
                }
            } else if let Some(v) = arg.strip_prefix("--height=") {
                if let Ok(ph) = v.parse::<u32>() {
                    h = Some(ph);
                }
            } else if let Some(v) = arg.strip_prefix("--title=") {
                cfg.title = v.to_owned();
            } else if let Some(v) = arg.strip_prefix("--assets=") {
                cfg.assets = PathBuf::from(v);
            } else {
                log::warn!("Unknown argument '{arg}'");
            }
        }

        cfg.width = w.unwrap_or(cfg.width).max(1);
        cfg.height = h.unwrap_or(cfg.height).max(1);
        cfg
    }

    pub fn mesh_path(&self, name: &str) -> PathBuf {
        self.assets.join("obj").join(name)
    }

    pub fn ground_texture_path(&self) -> PathBuf {
        self.assets.join("textures").join("grass_top.png")
    }
}

fn parse_backend(val: &str) -> wgpu::Backends {
    match val.to_ascii_lowercase().as_str() {
        "auto" => wgpu::Backends::all(),
        "vulkan" | "vk" => wgpu::Backends::VULKAN,
        "dx12" | "d3d12" => wgpu::Backends::DX12,
        "metal" | "mtl" => wgpu::Backends::METAL,
        "gl" | "opengl" | "gles" => wgpu::Backends::GL,
        other => {
            log::warn!("Unknown backend '{}', falling back to auto.", other);
            wgpu::Backends::all()
        }
    }
}

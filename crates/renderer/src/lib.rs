//! Renderer: wgpu backend for the scene's immediate-mode draw calls.
//! wgpu = 26.x, winit = 0.30.x
//!
//! Each frame the viewer draws into a [`FrameRecorder`]; the recorded items
//! are replayed in order inside a single render pass. Quads are split into
//! triangles on upload and wireframe passes use edge line lists, so only
//! triangle and line topologies are needed.

pub mod frame;
pub mod gpu_mesh;

use std::num::NonZeroU64;
use std::sync::Arc;

use anyhow::{Context, Result};
use asset::texture::TextureData;
use bytemuck::{Pod, Zeroable};
use corelib::{
    Color, Viewer,
    draw::PolygonMode,
    input::InputHandler,
};
use glam::Mat4;
use wgpu::{
    BindGroup, BindGroupLayout, BindGroupLayoutDescriptor, BindGroupLayoutEntry, BindingType,
    BlendState, Buffer, BufferBindingType, BufferUsages, ColorTargetState, ColorWrites,
    CommandEncoderDescriptor, DepthBiasState, DepthStencilState, Device, DeviceDescriptor,
    Extent3d, Features, FragmentState, Instance, InstanceDescriptor, Limits, LoadOp, Operations,
    PipelineLayout, PipelineLayoutDescriptor, PowerPreference, PresentMode, PrimitiveTopology,
    Queue, RenderPassColorAttachment, RenderPassDescriptor, RenderPipeline,
    RenderPipelineDescriptor, ShaderModule, ShaderModuleDescriptor, ShaderSource, ShaderStages,
    StoreOp, Surface, SurfaceConfiguration, SurfaceError, TextureDescriptor, TextureDimension,
    TextureFormat, TextureFormatFeatureFlags, TextureUsages, TextureView, TextureViewDescriptor, VertexBufferLayout,
    VertexState, VertexStepMode, util::DeviceExt,
};
use winit::{dpi::PhysicalSize, window::Window};

use crate::{
    frame::{DrawKind, FrameRecorder, GroundVertex},
    gpu_mesh::MeshCache,
};

const POSITION_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: std::mem::size_of::<[f32; 3]>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
};

const GROUND_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: std::mem::size_of::<GroundVertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2],
};

const GROUND_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Per-draw uniform slot (16-byte aligned).
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct DrawUniform {
    mvp: [[f32; 4]; 4],
    color: [f32; 4],
}

const DRAW_UNIFORM_SIZE: u64 = std::mem::size_of::<DrawUniform>() as u64;

const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

/// Preferred MSAA sample count; falls back to 1 when the formats lack it.
const MSAA_SAMPLES: u32 = 4;

/// Dynamic-offset uniform buffer holding one [`DrawUniform`] per draw.
struct DrawUniforms {
    buf: Buffer,
    bind_group: BindGroup,
    stride: u64,
    capacity: u64,
    staging: Vec<u8>,
}

impl DrawUniforms {
    fn new(device: &Device, layout: &BindGroupLayout, capacity: u64) -> Self {
        let align = device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = DRAW_UNIFORM_SIZE.div_ceil(align) * align;
        let (buf, bind_group) = Self::allocate(device, layout, stride, capacity);
        Self {
            buf,
            bind_group,
            stride,
            capacity,
            staging: Vec::new(),
        }
    }

    fn allocate(device: &Device, layout: &BindGroupLayout, stride: u64, capacity: u64) -> (Buffer, BindGroup) {
        let buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Draw UBO"),
            size: stride * capacity,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Draw BG"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buf,
                    offset: 0,
                    size: NonZeroU64::new(DRAW_UNIFORM_SIZE),
                }),
            }],
        });
        (buf, bind_group)
    }

    /// Upload one slot per draw, growing the buffer when needed.
    fn write(
        &mut self,
        device: &Device,
        queue: &Queue,
        layout: &BindGroupLayout,
        draws: impl ExactSizeIterator<Item = DrawUniform>,
    ) {
        let count = draws.len() as u64;
        if count > self.capacity {
            self.capacity = count.next_power_of_two();
            log::debug!("Growing draw uniform buffer to {} slots", self.capacity);
            let (buf, bind_group) = Self::allocate(device, layout, self.stride, self.capacity);
            self.buf = buf;
            self.bind_group = bind_group;
        }

        self.staging.clear();
        self.staging.resize((self.stride * count) as usize, 0);
        for (i, draw) in draws.enumerate() {
            let at = i * self.stride as usize;
            self.staging[at..at + DRAW_UNIFORM_SIZE as usize].copy_from_slice(bytemuck::bytes_of(&draw));
        }
        if !self.staging.is_empty() {
            queue.write_buffer(&self.buf, 0, &self.staging);
        }
    }

    #[inline]
    fn offset(&self, slot: usize) -> u32 {
        (slot as u64 * self.stride) as u32
    }
}

pub struct GpuState {
    // Surface
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,

    // Device/queue
    device: Device,
    queue: Queue,

    // Pipelines
    fill_pipeline: RenderPipeline,
    line_pipeline: RenderPipeline,
    ground_pipeline: RenderPipeline,

    // Per-draw uniforms
    draw_bgl: BindGroupLayout,
    uniforms: DrawUniforms,

    // Ground
    ground_bg: BindGroup,
    ground_vb: Buffer,
    ground_ib: Buffer,

    meshes: MeshCache,

    // Multisampled colour target (None without MSAA) and depth
    sample_count: u32,
    msaa_view: Option<TextureView>,
    depth_view: TextureView,

    // Size cache
    width: u32,
    height: u32,
}

impl GpuState {
    /// Create GPU state bound to an Arc<Window>, uploading the ground texture.
    pub async fn new(
        window: Arc<Window>,
        backends: wgpu::Backends,
        ground_texture: &TextureData,
    ) -> Result<Self> {
        let PhysicalSize { width, height } = window.inner_size();
        let width = width.max(1);
        let height = height.max(1);

        // Instance & surface
        let instance = Instance::new(&InstanceDescriptor {
            backends,
            ..Default::default()
        });
        let surface: Surface<'static> = instance
            .create_surface(window.clone())
            .context("create_surface failed")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No suitable GPU adapter")?;
        log::info!("Using adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&DeviceDescriptor {
                label: Some("MeshView Device"),
                required_features: Features::empty(),
                required_limits: Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("request_device failed")?;

        // Surface format (prefer linear so palette values reach the screen unchanged)
        let caps = surface.get_capabilities(&adapter);
        let surface_format = pick_surface_format(&caps.formats).context("Surface reports no formats")?;
        let sample_count = pick_sample_count(
            adapter.get_texture_format_features(surface_format).flags,
            adapter.get_texture_format_features(DEPTH_FORMAT).flags,
        );
        log::info!("Surface format {surface_format:?}, {sample_count}x MSAA");

        // Configure surface
        let surface_config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let msaa_view = create_msaa_view(&device, &surface_config, sample_count);
        let depth_view = create_depth_view(&device, &surface_config, sample_count);

        // ==== Shaders ====
        let flat_shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("Flat WGSL"),
            source: ShaderSource::Wgsl(include_str!("shaders/flat.wgsl").into()),
        });
        let ground_shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("Ground WGSL"),
            source: ShaderSource::Wgsl(include_str!("shaders/ground.wgsl").into()),
        });

        // ==== Bind group layouts ====
        let draw_bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Draw BGL"),
            entries: &[BindGroupLayoutEntry {
                binding: 0,
                visibility: ShaderStages::VERTEX | ShaderStages::FRAGMENT,
                ty: BindingType::Buffer {
                    ty: BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(DRAW_UNIFORM_SIZE),
                },
                count: None,
            }],
        });
        let texture_bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Ground texture BGL"),
            entries: &[
                BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                BindGroupLayoutEntry {
                    binding: 1,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        // ==== Pipelines ====
        let flat_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Flat PipelineLayout"),
            bind_group_layouts: &[&draw_bgl],
            push_constant_ranges: &[],
        });
        let ground_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Ground PipelineLayout"),
            bind_group_layouts: &[&draw_bgl, &texture_bgl],
            push_constant_ranges: &[],
        });

        let target = PipelineTarget {
            device: &device,
            format: surface_format,
            sample_count,
        };
        // Filled faces sit slightly behind their outlines.
        let fill_pipeline = target.build(
            "Fill Pipeline",
            &flat_layout,
            &flat_shader,
            POSITION_LAYOUT,
            PrimitiveTopology::TriangleList,
            DepthBiasState {
                constant: 1,
                slope_scale: 1.0,
                clamp: 0.0,
            },
        );
        let line_pipeline = target.build(
            "Line Pipeline",
            &flat_layout,
            &flat_shader,
            POSITION_LAYOUT,
            PrimitiveTopology::LineList,
            DepthBiasState::default(),
        );
        let ground_pipeline = target.build(
            "Ground Pipeline",
            &ground_layout,
            &ground_shader,
            GROUND_LAYOUT,
            PrimitiveTopology::TriangleList,
            DepthBiasState::default(),
        );

        // ==== Ground ====
        let ground_bg = upload_ground_texture(&device, &queue, &texture_bgl, ground_texture);
        let ground_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Ground VB"),
            size: std::mem::size_of::<[GroundVertex; 4]>() as u64,
            usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let ground_ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Ground IB"),
            contents: bytemuck::cast_slice(&GROUND_INDICES),
            usage: BufferUsages::INDEX,
        });

        let uniforms = DrawUniforms::new(&device, &draw_bgl, 64);

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            fill_pipeline,
            line_pipeline,
            ground_pipeline,
            draw_bgl,
            uniforms,
            ground_bg,
            ground_vb,
            ground_ib,
            meshes: MeshCache::default(),
            sample_count,
            msaa_view,
            depth_view,
            width,
            height,
        })
    }

    /// Resize: reconfigure surface & recreate the MSAA and depth targets.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.surface_config.width = self.width;
        self.surface_config.height = self.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.msaa_view = create_msaa_view(&self.device, &self.surface_config, self.sample_count);
        self.depth_view = create_depth_view(&self.device, &self.surface_config, self.sample_count);
    }

    /// Render one frame of the viewer's scene.
    pub fn render(&mut self, viewer: &Viewer) -> Result<(), SurfaceError> {
        let mut frame = FrameRecorder::new();
        viewer.on_draw(&mut frame);
        let proj = viewer.projection();

        // --- uploads
        for item in frame.items() {
            if let DrawKind::Mesh { mesh, .. } = &item.kind {
                self.meshes.ensure(&self.device, mesh);
            }
        }
        if let Some(ground) = frame.ground() {
            self.queue
                .write_buffer(&self.ground_vb, 0, bytemuck::cast_slice(ground));
        }
        let line_vb = (!frame.line_vertices().is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Line VB"),
                    contents: bytemuck::cast_slice(frame.line_vertices()),
                    usage: BufferUsages::VERTEX,
                })
        });
        self.uniforms.write(
            &self.device,
            &self.queue,
            &self.draw_bgl,
            frame.items().iter().map(|item| DrawUniform {
                mvp: mvp_columns(proj, item.model),
                color: item.color.into(),
            }),
        );

        // --- frame & pass
        let surface_frame = self.surface.get_current_texture()?;
        let view = surface_frame.texture.create_view(&Default::default());

        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("MainEncoder"),
            });

        {
            let clear = frame.clear_color().unwrap_or(Color::SKY);
            // With MSAA the samples resolve into the swapchain view and are discarded.
            let (target, resolve_target, store) = match &self.msaa_view {
                Some(msaa) => (msaa, Some(&view), StoreOp::Discard),
                None => (&view, None, StoreOp::Store),
            };
            let mut rpass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("MainPass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: target,
                    depth_slice: None,
                    resolve_target,
                    ops: Operations {
                        load: LoadOp::Clear(wgpu_color(clear)),
                        store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(Operations {
                        load: LoadOp::Clear(1.0),
                        store: StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            for (slot, item) in frame.items().iter().enumerate() {
                let offset = self.uniforms.offset(slot);
                match &item.kind {
                    DrawKind::Ground => {
                        rpass.set_pipeline(&self.ground_pipeline);
                        rpass.set_bind_group(0, &self.uniforms.bind_group, &[offset]);
                        rpass.set_bind_group(1, &self.ground_bg, &[]);
                        rpass.set_vertex_buffer(0, self.ground_vb.slice(..));
                        rpass.set_index_buffer(self.ground_ib.slice(..), wgpu::IndexFormat::Uint16);
                        rpass.draw_indexed(0..GROUND_INDICES.len() as u32, 0, 0..1);
                    }
                    DrawKind::Line { first } => {
                        let Some(vb) = line_vb.as_ref() else { continue };
                        rpass.set_pipeline(&self.line_pipeline);
                        rpass.set_bind_group(0, &self.uniforms.bind_group, &[offset]);
                        rpass.set_vertex_buffer(0, vb.slice(..));
                        rpass.draw(*first..*first + 2, 0..1);
                    }
                    DrawKind::Mesh {
                        mesh,
                        primitive,
                        mode,
                    } => {
                        let Some(gpu) = self.meshes.get(mesh) else { continue };
                        let Some(batch) = gpu.batch(*primitive, *mode) else { continue };
                        let pipeline = match mode {
                            PolygonMode::Fill => &self.fill_pipeline,
                            PolygonMode::Line => &self.line_pipeline,
                        };
                        rpass.set_pipeline(pipeline);
                        rpass.set_bind_group(0, &self.uniforms.bind_group, &[offset]);
                        rpass.set_vertex_buffer(0, gpu.vertex_buf.slice(..));
                        rpass.set_index_buffer(batch.buf.slice(..), wgpu::IndexFormat::Uint32);
                        rpass.draw_indexed(0..batch.count, 0, 0..1);
                    }
                }
            }
        }

        self.queue.submit(Some(encoder.finish()));
        surface_frame.present();
        Ok(())
    }

    pub fn is_surface_lost(err: &SurfaceError) -> bool {
        matches!(err, SurfaceError::Lost | SurfaceError::Outdated)
    }

    pub fn recreate_surface(&mut self) {
        self.resize(self.width, self.height);
    }
}

/// Shared settings for the three pipelines.
struct PipelineTarget<'a> {
    device: &'a Device,
    format: TextureFormat,
    sample_count: u32,
}

impl PipelineTarget<'_> {
    fn build(
        &self,
        label: &str,
        layout: &PipelineLayout,
        shader: &ShaderModule,
        vertex_layout: VertexBufferLayout<'static>,
        topology: PrimitiveTopology,
        bias: DepthBiasState,
    ) -> RenderPipeline {
        self.device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(ColorTargetState {
                    format: self.format,
                    blend: Some(BlendState::ALPHA_BLENDING),
                    write_mask: ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                // OBJ winding is not reliable; draw both faces.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias,
            }),
            multisample: wgpu::MultisampleState {
                count: self.sample_count,
                ..Default::default()
            },
            multiview: None,
            cache: None,
        })
    }
}

/// Upload RGBA8 pixels and build the texture + nearest sampler bind group.
fn upload_ground_texture(
    device: &Device,
    queue: &Queue,
    layout: &BindGroupLayout,
    data: &TextureData,
) -> BindGroup {
    debug_assert!(data.is_valid());
    let size = Extent3d {
        width: data.width,
        height: data.height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&TextureDescriptor {
        label: Some("Ground texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: TextureFormat::Rgba8Unorm,
        usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &data.data,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(data.row_bytes()),
            rows_per_image: Some(data.height),
        },
        size,
    );
    let view = texture.create_view(&TextureViewDescriptor::default());
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Ground sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    });
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Ground texture BG"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    })
}

/// First non-sRGB format, else whatever the surface lists first.
///
/// Colours are authored as display values, so an sRGB target would brighten them.
fn pick_surface_format(formats: &[TextureFormat]) -> Option<TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first().copied())
}

/// [`MSAA_SAMPLES`] when both attachments support it and the colour format can resolve.
fn pick_sample_count(color: TextureFormatFeatureFlags, depth: TextureFormatFeatureFlags) -> u32 {
    let ok = color.sample_count_supported(MSAA_SAMPLES)
        && color.contains(TextureFormatFeatureFlags::MULTISAMPLE_RESOLVE)
        && depth.sample_count_supported(MSAA_SAMPLES);
    if ok { MSAA_SAMPLES } else { 1 }
}

fn attachment_texture(
    device: &Device,
    sc: &SurfaceConfiguration,
    label: &str,
    format: TextureFormat,
    sample_count: u32,
) -> TextureView {
    let tex = device.create_texture(&TextureDescriptor {
        label: Some(label),
        size: Extent3d {
            width: sc.width.max(1),
            height: sc.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: TextureDimension::D2,
        format,
        usage: TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&TextureViewDescriptor::default())
}

/// Create a depth texture view matching the surface config.
fn create_depth_view(device: &Device, sc: &SurfaceConfiguration, sample_count: u32) -> TextureView {
    attachment_texture(device, sc, "DepthTex", DEPTH_FORMAT, sample_count)
}

/// Multisampled colour target resolved into the swapchain image.
fn create_msaa_view(device: &Device, sc: &SurfaceConfiguration, sample_count: u32) -> Option<TextureView> {
    (sample_count > 1).then(|| attachment_texture(device, sc, "MsaaColorTex", sc.format, sample_count))
}

#[inline]
fn mvp_columns(proj: Mat4, model: Mat4) -> [[f32; 4]; 4] {
    (proj * model).to_cols_array_2d()
}

fn wgpu_color(c: Color) -> wgpu::Color {
    wgpu::Color {
        r: c.r as f64,
        g: c.g as f64,
        b: c.b as f64,
        a: c.a as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn draw_uniform_is_16_byte_aligned() {
        assert_eq!(DRAW_UNIFORM_SIZE, 80);
        assert_eq!(DRAW_UNIFORM_SIZE % 16, 0);
    }

    #[test]
    fn clear_color_converts_exactly() {
        let c = wgpu_color(Color::rgba(0.5, 0.25, 1.0, 0.0));
        assert_eq!((c.r, c.g, c.b, c.a), (0.5, 0.25, 1.0, 0.0));
    }

    #[test]
    fn identity_mvp_roundtrips_columns() {
        let u = DrawUniform {
            mvp: mvp_columns(Mat4::IDENTITY, Mat4::IDENTITY),
            color: Color::WHITE.into(),
        };
        assert_eq!(bytemuck::bytes_of(&u).len(), DRAW_UNIFORM_SIZE as usize);
        assert_eq!(u.color, [1.0; 4]);
    }

    #[test]
    fn mvp_applies_model_before_projection() {
        let proj = Mat4::from_scale(Vec3::splat(2.0));
        let model = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let cols = mvp_columns(proj, model);
        // Translation column is scaled by the projection.
        assert_eq!(cols[3], [2.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn surface_format_prefers_linear() {
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
        assert_eq!(pick_surface_format(&formats), Some(TextureFormat::Bgra8Unorm));
        assert_eq!(
            pick_surface_format(&[TextureFormat::Rgba8UnormSrgb]),
            Some(TextureFormat::Rgba8UnormSrgb)
        );
        assert_eq!(pick_surface_format(&[]), None);
    }

    #[test]
    fn msaa_needs_both_attachments_and_resolve() {
        let x4 = TextureFormatFeatureFlags::MULTISAMPLE_X4;
        let resolve = TextureFormatFeatureFlags::MULTISAMPLE_RESOLVE;
        assert_eq!(pick_sample_count(x4 | resolve, x4), 4);
        assert_eq!(pick_sample_count(x4, x4), 1);
        assert_eq!(pick_sample_count(x4 | resolve, TextureFormatFeatureFlags::empty()), 1);
    }
}

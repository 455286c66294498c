//! GPU copies of mesh assets, uploaded on first use.

use std::{collections::HashMap, sync::Arc};

use asset::MeshAsset;
use corelib::draw::{PolygonMode, Primitive};
use wgpu::{Buffer, BufferUsages, Device, util::DeviceExt};

pub struct IndexBatch {
    pub buf: Buffer,
    pub count: u32,
}

/// One shared vertex buffer with an index batch per primitive and polygon mode.
pub struct GpuMesh {
    // Held so the pointer key stays unique while cached.
    _source: Arc<MeshAsset>,
    pub vertex_buf: Buffer,
    quads: Option<IndexBatch>,
    triangles: Option<IndexBatch>,
    quad_edges: Option<IndexBatch>,
    triangle_edges: Option<IndexBatch>,
}

impl GpuMesh {
    fn upload(device: &Device, mesh: &Arc<MeshAsset>) -> Self {
        let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh VB"),
            contents: bytemuck::cast_slice(&mesh.positions),
            usage: BufferUsages::VERTEX,
        });
        Self {
            _source: Arc::clone(mesh),
            vertex_buf,
            quads: index_batch(device, "Quad IB", &mesh.triangulated_quads()),
            triangles: index_batch(device, "Triangle IB", &mesh.triangle_indices),
            quad_edges: index_batch(device, "Quad edge IB", &mesh.quad_edges()),
            triangle_edges: index_batch(device, "Triangle edge IB", &mesh.triangle_edges()),
        }
    }

    /// Indices for a filled (triangle list) or outlined (line list) batch.
    pub fn batch(&self, primitive: Primitive, mode: PolygonMode) -> Option<&IndexBatch> {
        match (mode, primitive) {
            (PolygonMode::Fill, Primitive::Quads) => self.quads.as_ref(),
            (PolygonMode::Fill, Primitive::Triangles) => self.triangles.as_ref(),
            (PolygonMode::Line, Primitive::Quads) => self.quad_edges.as_ref(),
            (PolygonMode::Line, Primitive::Triangles) => self.triangle_edges.as_ref(),
        }
    }
}

fn index_batch(device: &Device, label: &str, indices: &[u32]) -> Option<IndexBatch> {
    if indices.is_empty() {
        return None;
    }
    let buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(indices),
        usage: BufferUsages::INDEX,
    });
    Some(IndexBatch {
        buf,
        count: indices.len() as u32,
    })
}

/// Uploaded meshes keyed by asset identity.
#[derive(Default)]
pub struct MeshCache {
    meshes: HashMap<*const MeshAsset, GpuMesh>,
}

impl MeshCache {
    /// Upload `mesh` unless it already is. Meshes without positions are skipped.
    pub fn ensure(&mut self, device: &Device, mesh: &Arc<MeshAsset>) {
        if mesh.positions.is_empty() {
            return;
        }
        self.meshes.entry(Arc::as_ptr(mesh)).or_insert_with(|| {
            log::debug!(
                "Uploading mesh: {} vertices, {} quads, {} triangles",
                mesh.positions.len(),
                mesh.quad_count(),
                mesh.triangle_count()
            );
            GpuMesh::upload(device, mesh)
        });
    }

    pub fn get(&self, mesh: &Arc<MeshAsset>) -> Option<&GpuMesh> {
        self.meshes.get(&Arc::as_ptr(mesh))
    }
}

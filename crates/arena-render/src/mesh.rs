use std::f32::consts::{PI, TAU};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// CPU-side indexed triangle list.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    fn push(&mut self, position: [f32; 3], normal: [f32; 3]) -> u16 {
        let i = self.vertices.len() as u16;
        self.vertices.push(Vertex { position, normal });
        i
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Axis-aligned box centred on the origin.
pub fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);
    // normal, then the face's u and v axes
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];
    let half = [hx, hy, hz];
    let mut mesh = MeshData::default();
    for (n, u, v) in faces {
        let corner = |su: f32, sv: f32| {
            let mut p = [0.0f32; 3];
            for k in 0..3 {
                p[k] = (n[k] + u[k] * su + v[k] * sv) * half[k];
            }
            p
        };
        let a = mesh.push(corner(-1.0, -1.0), n);
        let b = mesh.push(corner(1.0, -1.0), n);
        let c = mesh.push(corner(1.0, 1.0), n);
        let d = mesh.push(corner(-1.0, 1.0), n);
        mesh.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }
    mesh
}

/// Square on the XZ plane at y = 0, facing +Y.
pub fn plane(size: f32) -> MeshData {
    let h = size * 0.5;
    let up = [0.0, 1.0, 0.0];
    let mut mesh = MeshData::default();
    let a = mesh.push([-h, 0.0, h], up);
    let b = mesh.push([h, 0.0, h], up);
    let c = mesh.push([h, 0.0, -h], up);
    let d = mesh.push([-h, 0.0, -h], up);
    mesh.indices.extend_from_slice(&[a, b, c, a, c, d]);
    mesh
}

/// Flat disc on the XZ plane at y = 0, facing +Y.
pub fn disc(radius: f32, segments: u16) -> MeshData {
    let segments = segments.max(3);
    let up = [0.0, 1.0, 0.0];
    let mut mesh = MeshData::default();
    let center = mesh.push([0.0, 0.0, 0.0], up);
    for i in 0..segments {
        let a = i as f32 / segments as f32 * TAU;
        mesh.push([radius * a.cos(), 0.0, -radius * a.sin()], up);
    }
    for i in 0..segments {
        let cur = 1 + i;
        let next = 1 + (i + 1) % segments;
        mesh.indices.extend_from_slice(&[center, cur, next]);
    }
    mesh
}

/// Latitude/longitude sphere centred on the origin.
pub fn uv_sphere(radius: f32, segments: u16, rings: u16) -> MeshData {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut mesh = MeshData::default();
    for r in 0..=rings {
        let theta = r as f32 / rings as f32 * PI;
        let (st, ct) = theta.sin_cos();
        for s in 0..=segments {
            let phi = s as f32 / segments as f32 * TAU;
            let (sp, cp) = phi.sin_cos();
            let n = [st * cp, ct, st * sp];
            mesh.push([n[0] * radius, n[1] * radius, n[2] * radius], n);
        }
    }
    let stride = segments + 1;
    for r in 0..rings {
        for s in 0..segments {
            let a = r * stride + s;
            let b = a + stride;
            mesh.indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    mesh
}

/// Vertex/index buffers for one uploaded mesh.
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        // index buffers must be a multiple of 4 bytes
        let mut indices = mesh.indices.clone();
        if indices.len() % 2 == 1 {
            indices.push(0);
        }
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

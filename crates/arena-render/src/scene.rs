use super::helpers::{self, DEPTH_FORMAT, HDR_FORMAT};
use super::mesh::{self, GpuMesh, Vertex};
use super::shadow::{self, ShadowMap};
use arena_core::*;
use glam::{Mat4, Quat, Vec3};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct GlobalsUniform {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) light_view_proj: [[f32; 4]; 4],
    pub(crate) camera_pos: [f32; 4],
    pub(crate) light_dir: [f32; 4],
    pub(crate) hemi_sky: [f32; 4],
    pub(crate) hemi_ground: [f32; 4],
    pub(crate) params: [f32; 4],
}

impl GlobalsUniform {
    pub(crate) fn from_frame(frame: &SceneFrame, aspect: f32) -> Self {
        let dir = shadow::light_direction();
        let eye = frame.camera.eye;
        Self {
            view_proj: frame.camera.view_proj(aspect).to_cols_array_2d(),
            light_view_proj: shadow::light_view_proj(frame.player).to_cols_array_2d(),
            camera_pos: [eye.x, eye.y, eye.z, 1.0],
            light_dir: [dir.x, dir.y, dir.z, SUN_LIGHT_INTENSITY],
            hemi_sky: rgb_w(HEMI_SKY_COLOR, HEMI_INTENSITY),
            hemi_ground: rgb_w(HEMI_GROUND_COLOR, 1.0),
            params: [
                if frame.flags.shadows { 1.0 } else { 0.0 },
                ShadowMap::texel_size(),
                0.0,
                0.0,
            ],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ObjectUniform {
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) color: [f32; 4],
    pub(crate) emissive: [f32; 4],
    pub(crate) material: [f32; 4],
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Material {
    Lit,
    Unlit,
    Sky,
}

impl Material {
    fn code(self) -> f32 {
        match self {
            Material::Lit => 0.0,
            Material::Unlit => 1.0,
            Material::Sky => 2.0,
        }
    }
}

impl ObjectUniform {
    fn new(model: Mat4, color: [f32; 3], opacity: f32, emissive: [f32; 3], material: Material) -> Self {
        let receives_shadow = material == Material::Lit;
        Self {
            model: model.to_cols_array_2d(),
            color: rgb_w(color, opacity),
            emissive: rgb_w(emissive, 0.0),
            material: [material.code(), if receives_shadow { 1.0 } else { 0.0 }, 0.0, 0.0],
        }
    }
}

fn rgb_w(c: [f32; 3], w: f32) -> [f32; 4] {
    [c[0], c[1], c[2], w]
}

/// Scene meshes in draw order. The blob shadow is last so it blends over the
/// floor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum SceneObjectKind {
    Sky,
    Floor,
    Sun,
    Player,
    BlobShadow,
}

impl SceneObjectKind {
    pub(crate) const ALL: [SceneObjectKind; 5] = [
        SceneObjectKind::Sky,
        SceneObjectKind::Floor,
        SceneObjectKind::Sun,
        SceneObjectKind::Player,
        SceneObjectKind::BlobShadow,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn mesh(self) -> mesh::MeshData {
        match self {
            SceneObjectKind::Sky => mesh::uv_sphere(SKY_RADIUS, 32, 32),
            SceneObjectKind::Floor => mesh::plane(FLOOR_SIZE),
            SceneObjectKind::Sun => mesh::uv_sphere(SUN_RADIUS, 32, 32),
            SceneObjectKind::Player => mesh::cuboid(PLAYER_SIZE[0], PLAYER_SIZE[1], PLAYER_SIZE[2]),
            SceneObjectKind::BlobShadow => mesh::disc(BLOB_SHADOW_RADIUS, 32),
        }
    }

    fn label(self) -> &'static str {
        match self {
            SceneObjectKind::Sky => "sky",
            SceneObjectKind::Floor => "floor",
            SceneObjectKind::Sun => "sun",
            SceneObjectKind::Player => "player",
            SceneObjectKind::BlobShadow => "blob_shadow",
        }
    }

    pub(crate) fn is_transparent(self) -> bool {
        self == SceneObjectKind::BlobShadow
    }
}

/// Objects visible in `frame` with their per-object uniforms.
pub(crate) fn draw_list(frame: &SceneFrame) -> Vec<(SceneObjectKind, ObjectUniform)> {
    let flags = frame.flags;
    let mut out = Vec::with_capacity(SceneObjectKind::ALL.len());
    if flags.sky_visible {
        let model = Mat4::from_quat(Quat::from_rotation_y(frame.sky_rotation));
        out.push((
            SceneObjectKind::Sky,
            ObjectUniform::new(model, [1.0; 3], 1.0, [0.0; 3], Material::Sky),
        ));
    }
    out.push((
        SceneObjectKind::Floor,
        ObjectUniform::new(Mat4::IDENTITY, FLOOR_COLOR, 1.0, [0.0; 3], Material::Lit),
    ));
    if flags.sun_visible {
        let model = Mat4::from_translation(sun_position_vec3());
        out.push((
            SceneObjectKind::Sun,
            ObjectUniform::new(model, SUN_COLOR, 1.0, [0.0; 3], Material::Unlit),
        ));
    }
    let glow = Vec3::from(PLAYER_EMISSIVE) * flags.player_emissive;
    out.push((
        SceneObjectKind::Player,
        ObjectUniform::new(
            Mat4::from_translation(frame.player),
            PLAYER_COLOR,
            1.0,
            glow.to_array(),
            Material::Lit,
        ),
    ));
    if flags.blob_shadow_visible {
        out.push((
            SceneObjectKind::BlobShadow,
            ObjectUniform::new(
                Mat4::from_translation(frame.blob_shadow),
                [0.0; 3],
                BLOB_SHADOW_OPACITY,
                [0.0; 3],
                Material::Unlit,
            ),
        ));
    }
    out
}

pub(crate) struct SceneObject {
    pub(crate) mesh: GpuMesh,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

/// Pipelines, layouts and per-object resources for the forward and shadow
/// passes.
pub(crate) struct ScenePass {
    pub(crate) globals_buffer: wgpu::Buffer,
    pub(crate) globals_bind_group: wgpu::BindGroup,
    pub(crate) shadow_bind_group: wgpu::BindGroup,
    pub(crate) opaque_pipeline: wgpu::RenderPipeline,
    pub(crate) transparent_pipeline: wgpu::RenderPipeline,
    pub(crate) shadow_pipeline: wgpu::RenderPipeline,
    pub(crate) shadow_map: ShadowMap,
    pub(crate) objects: Vec<SceneObject>,
}

impl ScenePass {
    pub(crate) fn new(device: &wgpu::Device) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::SCENE_WGSL.into()),
        });
        let vis = wgpu::ShaderStages::VERTEX_FRAGMENT;
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_globals_bgl"),
            entries: &[
                helpers::uniform_layout_entry(0, vis),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Depth,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });
        // the shadow pass writes the map, so it cannot also bind it
        let shadow_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_shadow_bgl"),
            entries: &[helpers::uniform_layout_entry(0, vis)],
        });
        let object_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_object_bgl"),
            entries: &[helpers::uniform_layout_entry(0, vis)],
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_globals"),
            size: std::mem::size_of::<GlobalsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let shadow_map = ShadowMap::new(device);
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_globals_bg"),
            layout: &globals_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&shadow_map.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&shadow_map.sampler),
                },
            ],
        });
        let shadow_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_shadow_bg"),
            layout: &shadow_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let scene_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_scene"),
            bind_group_layouts: &[&globals_bgl, &object_bgl],
            push_constant_ranges: &[],
        });
        let shadow_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_shadow"),
            bind_group_layouts: &[&shadow_bgl, &object_bgl],
            push_constant_ranges: &[],
        });

        let opaque_pipeline = make_scene_pipeline(device, &scene_layout, &shader, false);
        let transparent_pipeline = make_scene_pipeline(device, &scene_layout, &shader, true);
        let shadow_pipeline = make_shadow_pipeline(device, &shadow_layout, &shader);

        let objects = SceneObjectKind::ALL
            .iter()
            .map(|kind| {
                let label = kind.label();
                let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(label),
                    size: std::mem::size_of::<ObjectUniform>() as u64,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(label),
                    layout: &object_bgl,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    }],
                });
                SceneObject {
                    mesh: GpuMesh::upload(device, label, &kind.mesh()),
                    uniform_buffer,
                    bind_group,
                }
            })
            .collect();

        Self {
            globals_buffer,
            globals_bind_group,
            shadow_bind_group,
            opaque_pipeline,
            transparent_pipeline,
            shadow_pipeline,
            shadow_map,
            objects,
        }
    }

    pub(crate) fn object(&self, kind: SceneObjectKind) -> &SceneObject {
        &self.objects[kind.index()]
    }
}

fn make_scene_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    transparent: bool,
) -> wgpu::RenderPipeline {
    let (blend, depth_write_enabled, depth_compare) = if transparent {
        (
            Some(wgpu::BlendState::ALPHA_BLENDING),
            false,
            wgpu::CompareFunction::LessEqual,
        )
    } else {
        (Some(wgpu::BlendState::REPLACE), true, wgpu::CompareFunction::Less)
    };
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(if transparent { "scene_transparent" } else { "scene_opaque" }),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled,
            depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: HDR_FORMAT,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

fn make_shadow_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("scene_shadow"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_shadow"),
            buffers: &[Vertex::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState {
                constant: 2,
                slope_scale: 2.0,
                clamp: 0.0,
            },
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: None,
        cache: None,
        multiview: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with(toggles: VisualToggles, variant: SceneVariant) -> SceneFrame {
        let params = SimParams {
            variant,
            ..SimParams::default()
        };
        let mut sim = SimState::new(params).with_toggles(toggles);
        match sim.step(std::iter::empty()) {
            FrameOutcome::Advanced(frame) => frame,
            FrameOutcome::Skipped => panic!("fresh sim should advance"),
        }
    }

    fn kinds(list: &[(SceneObjectKind, ObjectUniform)]) -> Vec<SceneObjectKind> {
        list.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn uniform_sizes_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<GlobalsUniform>(), 208);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 112);
    }

    #[test]
    fn everything_on_draws_all_but_blob() {
        let f = frame_with(VisualToggles::default(), SceneVariant::Basic);
        let list = draw_list(&f);
        assert_eq!(
            kinds(&list),
            vec![
                SceneObjectKind::Sky,
                SceneObjectKind::Floor,
                SceneObjectKind::Sun,
                SceneObjectKind::Player
            ]
        );
    }

    #[test]
    fn shadow_off_swaps_in_blob_last() {
        let t = VisualToggles {
            shadow: false,
            ..VisualToggles::default()
        };
        let f = frame_with(t, SceneVariant::Basic);
        let list = draw_list(&f);
        let (kind, blob) = list[list.len() - 1];
        assert_eq!(kind, SceneObjectKind::BlobShadow);
        assert!(kind.is_transparent());
        assert_eq!(blob.color[3], BLOB_SHADOW_OPACITY);
        assert_eq!(blob.model[3][1], BLOB_SHADOW_Y);
    }

    #[test]
    fn sky_and_sun_toggles_remove_objects() {
        let t = VisualToggles {
            skybox: false,
            sun: false,
            ..VisualToggles::default()
        };
        let list = draw_list(&frame_with(t, SceneVariant::Bloom));
        assert!(!kinds(&list).contains(&SceneObjectKind::Sky));
        assert!(!kinds(&list).contains(&SceneObjectKind::Sun));
        assert!(kinds(&list).contains(&SceneObjectKind::Floor));
    }

    #[test]
    fn glow_off_clears_player_emissive() {
        let on = draw_list(&frame_with(VisualToggles::default(), SceneVariant::Basic));
        let off = draw_list(&frame_with(
            VisualToggles {
                glow: false,
                ..VisualToggles::default()
            },
            SceneVariant::Basic,
        ));
        let player = |l: &[(SceneObjectKind, ObjectUniform)]| {
            l.iter()
                .find(|(k, _)| *k == SceneObjectKind::Player)
                .map(|(_, u)| *u)
                .unwrap()
        };
        assert!(player(&on).emissive[2] > 0.0);
        assert_eq!(player(&off).emissive, [0.0; 4]);
    }

    #[test]
    fn globals_carry_shadow_flag() {
        let on = frame_with(VisualToggles::default(), SceneVariant::Basic);
        let off = frame_with(
            VisualToggles {
                shadow: false,
                ..VisualToggles::default()
            },
            SceneVariant::Basic,
        );
        assert_eq!(GlobalsUniform::from_frame(&on, 1.5).params[0], 1.0);
        assert_eq!(GlobalsUniform::from_frame(&off, 1.5).params[0], 0.0);
    }
}

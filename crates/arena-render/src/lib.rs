//! wgpu renderer for the arena scene, shared by the web and native front-ends.
//!
//! Frame structure:
//! 1. optional shadow pass (player depth from the light)
//! 2. forward scene pass into an HDR target
//! 3. optional bloom chain (bright, blur H, blur V) at half resolution
//! 4. composite with tone mapping onto the surface

mod helpers;
pub mod mesh;
mod post;
mod scene;
pub mod shadow;
mod targets;

use arena_core::SceneFrame;
use post::{PostBindGroups, PostResources, PostUniforms};
use scene::{GlobalsUniform, SceneObjectKind, ScenePass};
use targets::RenderTargets;

pub(crate) const SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub(crate) const POST_WGSL: &str = include_str!("../shaders/post.wgsl");

// shown where the sky dome is hidden
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.04,
    a: 1.0,
};

pub struct Renderer<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene: ScenePass,
    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: PostResources,
    post_groups: PostBindGroups,
    width: u32,
    height: u32,
}

impl<'a> Renderer<'a> {
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'a>,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        let width = width.max(1);
        let height = height.max(1);
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        log::info!("adapter: {:?}", adapter.get_info());
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let scene = ScenePass::new(&device);
        let targets = RenderTargets::new(&device, width, height);
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let post = post::create_post_resources(&device, format);
        let post_groups = post::build_bind_groups(&device, &post, &linear_sampler, &targets);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene,
            targets,
            linear_sampler,
            post,
            post_groups,
            width,
            height,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.targets.recreate(&self.device, width, height);
        self.post_groups =
            post::build_bind_groups(&self.device, &self.post, &self.linear_sampler, &self.targets);
        log::debug!("resized render targets to {}x{}", width, height);
    }

    /// Reapply the surface configuration after `Lost`/`Outdated`.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, frame: &SceneFrame) -> Result<(), wgpu::SurfaceError> {
        let aspect = self.width as f32 / self.height.max(1) as f32;
        let flags = frame.flags;

        self.queue.write_buffer(
            &self.scene.globals_buffer,
            0,
            bytemuck::bytes_of(&GlobalsUniform::from_frame(frame, aspect)),
        );
        let draws = scene::draw_list(frame);
        for (kind, uniform) in &draws {
            self.queue.write_buffer(
                &self.scene.object(*kind).uniform_buffer,
                0,
                bytemuck::bytes_of(uniform),
            );
        }
        let (bw, bh) = self.targets.bloom_size();
        post::write_post_uniforms(&self.queue, &self.post.main_uniforms, PostUniforms::main(flags.bloom));
        if flags.bloom {
            post::write_post_uniforms(
                &self.queue,
                &self.post.blur_h_uniforms,
                PostUniforms::blur(bw, bh, [1.0, 0.0]),
            );
            post::write_post_uniforms(
                &self.queue,
                &self.post.blur_v_uniforms,
                PostUniforms::blur(bw, bh, [0.0, 1.0]),
            );
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: shadow map
        if flags.shadows {
            let mut spass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("shadow_pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.scene.shadow_map.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            spass.set_pipeline(&self.scene.shadow_pipeline);
            spass.set_bind_group(0, &self.scene.shadow_bind_group, &[]);
            let player = self.scene.object(SceneObjectKind::Player);
            spass.set_bind_group(1, &player.bind_group, &[]);
            player.mesh.draw(&mut spass);
        }

        // Pass 2: scene into HDR
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.scene.globals_bind_group, &[]);
            let mut transparent = false;
            rpass.set_pipeline(&self.scene.opaque_pipeline);
            for (kind, _) in &draws {
                if kind.is_transparent() && !transparent {
                    rpass.set_pipeline(&self.scene.transparent_pipeline);
                    transparent = true;
                }
                let obj = self.scene.object(*kind);
                rpass.set_bind_group(1, &obj.bind_group, &[]);
                obj.mesh.draw(&mut rpass);
            }
        }

        // Passes 3-5: bloom chain
        if flags.bloom {
            post::blit(
                &mut encoder,
                "bright_pass",
                &self.targets.bloom_a_view,
                wgpu::Color::BLACK,
                &self.post.bright_pipeline,
                &self.post_groups.hdr,
                None,
            );
            post::blit(
                &mut encoder,
                "blur_h",
                &self.targets.bloom_b_view,
                wgpu::Color::BLACK,
                &self.post.blur_pipeline,
                &self.post_groups.from_bloom_a,
                None,
            );
            post::blit(
                &mut encoder,
                "blur_v",
                &self.targets.bloom_a_view,
                wgpu::Color::BLACK,
                &self.post.blur_pipeline,
                &self.post_groups.from_bloom_b,
                None,
            );
        }

        // Pass 6: composite to the surface
        post::blit(
            &mut encoder,
            "composite",
            &view,
            CLEAR_COLOR,
            &self.post.composite_pipeline,
            &self.post_groups.hdr,
            Some(&self.post_groups.bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}

use super::helpers;
use arena_core::light_position_vec3;
use glam::{Mat4, Vec3};

pub(crate) const SHADOW_MAP_SIZE: u32 = 2048;
const SHADOW_HALF_EXTENT: f32 = 20.0;
const SHADOW_EYE_DISTANCE: f32 = 30.0;
const SHADOW_NEAR: f32 = 0.1;
const SHADOW_FAR: f32 = 100.0;

/// Unit direction from the scene towards the directional light.
pub fn light_direction() -> Vec3 {
    light_position_vec3().normalize_or_zero()
}

/// Orthographic light matrix covering a box around `center`, so the shadow
/// follows the player across the floor.
pub fn light_view_proj(center: Vec3) -> Mat4 {
    let eye = center + light_direction() * SHADOW_EYE_DISTANCE;
    let view = Mat4::look_at_rh(eye, center, Vec3::Y);
    let proj = Mat4::orthographic_rh(
        -SHADOW_HALF_EXTENT,
        SHADOW_HALF_EXTENT,
        -SHADOW_HALF_EXTENT,
        SHADOW_HALF_EXTENT,
        SHADOW_NEAR,
        SHADOW_FAR,
    );
    proj * view
}

pub(crate) struct ShadowMap {
    _texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) sampler: wgpu::Sampler,
}

impl ShadowMap {
    pub(crate) fn new(device: &wgpu::Device) -> Self {
        let (texture, view) = helpers::create_depth_texture(
            device,
            "shadow_map",
            SHADOW_MAP_SIZE,
            SHADOW_MAP_SIZE,
            true,
        );
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("shadow_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });
        Self {
            _texture: texture,
            view,
            sampler,
        }
    }

    pub(crate) fn texel_size() -> f32 {
        1.0 / SHADOW_MAP_SIZE as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn project(m: Mat4, p: Vec3) -> Vec3 {
        let c = m * Vec4::new(p.x, p.y, p.z, 1.0);
        c.truncate() / c.w
    }

    #[test]
    fn light_points_up_and_away() {
        let d = light_direction();
        assert!((d.length() - 1.0).abs() < 1e-5);
        assert!(d.y > 0.0);
    }

    #[test]
    fn center_projects_inside_the_map() {
        for center in [Vec3::new(0.0, 1.0, 0.0), Vec3::new(12.0, 1.0, -7.0)] {
            let ndc = project(light_view_proj(center), center);
            assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
            assert!(ndc.z > 0.0 && ndc.z < 1.0);
        }
    }

    #[test]
    fn points_nearer_the_light_have_smaller_depth() {
        let center = Vec3::new(0.0, 1.0, 0.0);
        let m = light_view_proj(center);
        let near = project(m, center + light_direction() * 5.0);
        let far = project(m, center - light_direction() * 5.0);
        assert!(near.z < far.z);
    }
}

//! 灯光数据块

use glam::Vec3;

/// 宿主灯光种类
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightKind {
    Point,
    Spot,
    Capsule,
}

/// 格式特有的灯光属性（原样透传）
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LightProperties {
    pub flashiness: u32,
    pub flags: u32,
    pub group_id: u32,
    pub time_flags: u32,
    pub culling_plane_normal: Vec3,
    pub culling_plane_offset: f32,
    pub unknown_45: u32,
    pub unknown_46: u32,
    pub shadow_blur: u32,
    pub volume_size_scale: f32,
    pub volume_outer_color: Vec3,
    pub light_hash: u32,
    pub volume_outer_intensity: f32,
    pub corona_size: f32,
    pub volume_outer_exponent: f32,
    pub light_fade_distance: u32,
    pub shadow_fade_distance: u32,
    pub specular_fade_distance: u32,
    pub volumetric_fade_distance: u32,
    pub corona_intensity: f32,
    pub corona_z_bias: f32,
    pub extent: Vec3,
    pub projected_texture_hash: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightData {
    pub name: String,
    pub kind: LightKind,
    /// 0-1
    pub color: Vec3,
    pub energy: f32,
    pub use_custom_distance: bool,
    pub cutoff_distance: f32,
    pub shadow_soft_size: f32,
    /// 弧度
    pub spot_size: f32,
    pub spot_blend: f32,
    pub volume_factor: f32,
    pub shadow_buffer_clip_start: f32,
    pub properties: LightProperties,
}

impl LightData {
    pub fn new(name: &str, kind: LightKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            color: Vec3::ONE,
            energy: 10.0,
            use_custom_distance: false,
            cutoff_distance: 40.0,
            shadow_soft_size: 0.25,
            spot_size: std::f32::consts::FRAC_PI_4,
            spot_blend: 0.15,
            volume_factor: 1.0,
            shadow_buffer_clip_start: 0.05,
            properties: LightProperties::default(),
        }
    }
}

//! 灯光记录

use glam::Vec3;

/// 灯光记录，大部分字段原样透传到宿主灯光属性
#[derive(Clone, Debug)]
pub struct LightRecord {
    /// 灯光类型字符串（Point / Spot / Capsule）
    pub light_type: String,
    pub position: Vec3,
    pub tangent: Vec3,
    pub direction: Vec3,
    /// 0-255
    pub color: [u8; 3],
    pub intensity: f32,
    pub falloff: f32,
    pub falloff_exponent: f32,
    /// 角度制
    pub cone_inner_angle: f32,
    /// 角度制
    pub cone_outer_angle: f32,
    /// 绑定骨骼的标签
    pub bone_id: Option<u32>,
    pub flags: u32,
    pub time_flags: u32,
    pub group_id: u32,
    pub flashiness: u32,
    pub culling_plane_normal: Vec3,
    pub culling_plane_offset: f32,
    pub unknown_45: u32,
    pub unknown_46: u32,
    pub volume_intensity: f32,
    pub shadow_blur: u32,
    pub volume_size_scale: f32,
    pub volume_outer_color: [u8; 3],
    pub light_hash: u32,
    pub volume_outer_intensity: f32,
    pub corona_size: f32,
    pub volume_outer_exponent: f32,
    pub light_fade_distance: u32,
    pub shadow_fade_distance: u32,
    pub specular_fade_distance: u32,
    pub volumetric_fade_distance: u32,
    pub shadow_near_clip: f32,
    pub corona_intensity: f32,
    pub corona_z_bias: f32,
    pub extent: Vec3,
    pub projected_texture_hash: String,
}

impl Default for LightRecord {
    fn default() -> Self {
        Self {
            light_type: "Point".to_string(),
            position: Vec3::ZERO,
            tangent: Vec3::X,
            direction: Vec3::NEG_Z,
            color: [255, 255, 255],
            intensity: 1.0,
            falloff: 10.0,
            falloff_exponent: 8.0,
            cone_inner_angle: 0.0,
            cone_outer_angle: 45.0,
            bone_id: None,
            flags: 0,
            time_flags: 0,
            group_id: 0,
            flashiness: 0,
            culling_plane_normal: Vec3::Z,
            culling_plane_offset: 0.0,
            unknown_45: 0,
            unknown_46: 0,
            volume_intensity: 1.0,
            shadow_blur: 0,
            volume_size_scale: 1.0,
            volume_outer_color: [255, 255, 255],
            light_hash: 0,
            volume_outer_intensity: 1.0,
            corona_size: 0.0,
            volume_outer_exponent: 1.0,
            light_fade_distance: 0,
            shadow_fade_distance: 0,
            specular_fade_distance: 0,
            volumetric_fade_distance: 0,
            shadow_near_clip: 0.01,
            corona_intensity: 1.0,
            corona_z_bias: 0.1,
            extent: Vec3::ONE,
            projected_texture_hash: String::new(),
        }
    }
}

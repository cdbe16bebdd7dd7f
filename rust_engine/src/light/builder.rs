//! 灯光对象构建和骨骼绑定

use std::f32::consts::PI;

use glam::{Mat4, Vec3};

use crate::records::LightRecord;
use crate::scene::{
    ConstraintSpace, LightData, LightProperties, MixMode, Object, ObjectConstraint, ObjectData,
    ObjectId, ObjectRole, SceneSink,
};
use crate::skeleton::build_tag_bone_map;
use crate::Result;

use super::LightType;

/// 灯光分组空对象的名称
pub const LIGHTS_GROUP_NAME: &str = "Lights";

/// 阴影柔和度 = 衰减指数 / 5
const SHADOW_SOFT_DIVISOR: f32 = 5.0;

fn color_from_bytes(color: [u8; 3]) -> Vec3 {
    Vec3::new(color[0] as f32, color[1] as f32, color[2] as f32) / 255.0
}

/// 朝向基：列依次为切线、副切线、反向的方向
fn light_basis(light: &LightRecord) -> Mat4 {
    let direction = -light.direction;
    let bitangent = direction.cross(light.tangent).normalize_or_zero();
    Mat4::from_cols(
        light.tangent.extend(0.0),
        bitangent.extend(0.0),
        direction.extend(0.0),
        light.position.extend(1.0),
    )
}

fn light_data(light: &LightRecord, light_type: LightType, intensity_factor: f32) -> LightData {
    let mut data = LightData::new(light_type.ui_name(), light_type.kind());
    data.color = color_from_bytes(light.color);
    data.energy = light.intensity * intensity_factor;
    data.use_custom_distance = true;
    data.cutoff_distance = light.falloff;
    data.shadow_soft_size = light.falloff_exponent / SHADOW_SOFT_DIVISOR;
    data.volume_factor = light.volume_intensity;
    data.shadow_buffer_clip_start = light.shadow_near_clip;

    if light_type == LightType::Spot {
        data.spot_blend = (light.cone_inner_angle.to_radians() / PI - 1.0).abs();
        data.spot_size = light.cone_outer_angle.to_radians() * 2.0;
    }

    data.properties = LightProperties {
        flashiness: light.flashiness,
        flags: light.flags,
        group_id: light.group_id,
        time_flags: light.time_flags,
        culling_plane_normal: light.culling_plane_normal,
        culling_plane_offset: light.culling_plane_offset,
        unknown_45: light.unknown_45,
        unknown_46: light.unknown_46,
        shadow_blur: light.shadow_blur,
        volume_size_scale: light.volume_size_scale,
        volume_outer_color: color_from_bytes(light.volume_outer_color),
        light_hash: light.light_hash,
        volume_outer_intensity: light.volume_outer_intensity,
        corona_size: light.corona_size,
        volume_outer_exponent: light.volume_outer_exponent,
        light_fade_distance: light.light_fade_distance,
        shadow_fade_distance: light.shadow_fade_distance,
        specular_fade_distance: light.specular_fade_distance,
        volumetric_fade_distance: light.volumetric_fade_distance,
        corona_intensity: light.corona_intensity,
        corona_z_bias: light.corona_z_bias,
        extent: light.extent,
        projected_texture_hash: light.projected_texture_hash.clone(),
    };
    data
}

/// 绑定目标骨骼名；骨架对象不存在、不是骨架或标签不匹配时返回 None
fn bound_bone_name<S: SceneSink + ?Sized>(
    scene: &S,
    light: &LightRecord,
    armature_obj: Option<ObjectId>,
) -> Option<String> {
    let bone_id = light.bone_id?;
    let armature = scene.object(armature_obj?)?.armature()?;
    let name = build_tag_bone_map(armature)?.remove(&bone_id);
    if name.is_none() {
        log::debug!("light bone tag {} not found in '{}'", bone_id, armature.name);
    }
    name
}

/// 由灯光记录创建灯光对象并链接到场景
pub fn light_to_obj<S: SceneSink + ?Sized>(
    scene: &mut S,
    light: &LightRecord,
    armature_obj: Option<ObjectId>,
    intensity_factor: f32,
) -> Result<ObjectId> {
    let light_type = LightType::parse(&light.light_type)?;
    let data = light_data(light, light_type, intensity_factor);

    let mut obj = Object::new(light_type.ui_name(), ObjectData::Light(data));
    obj.role = ObjectRole::Light;
    obj.matrix_basis = light_basis(light);

    if let (Some(target), Some(bone)) = (armature_obj, bound_bone_name(scene, light, armature_obj)) {
        obj.constraints.push(ObjectConstraint::CopyTransforms {
            target,
            subtarget: bone,
            mix_mode: MixMode::BeforeFull,
            target_space: ConstraintSpace::Pose,
            owner_space: ConstraintSpace::Local,
        });
    }

    let id = scene.add_object(obj);
    scene.link_object(id);
    Ok(id)
}

/// 在 `Lights` 空对象下创建全部灯光，返回分组对象
///
/// 未指定骨架对象时使用 `parent` 作为骨骼绑定目标。
pub fn create_lights<S: SceneSink + ?Sized>(
    scene: &mut S,
    lights: &[LightRecord],
    parent: ObjectId,
    armature_obj: Option<ObjectId>,
    intensity_factor: f32,
) -> Result<ObjectId> {
    let armature_obj = armature_obj.or(Some(parent));

    let mut group = Object::empty(LIGHTS_GROUP_NAME);
    group.empty_display_size = 0.0;
    let group = scene.add_object(group);
    scene.set_parent(group, parent)?;
    scene.link_object(group);

    for light in lights {
        let lobj = light_to_obj(scene, light, armature_obj, intensity_factor)?;
        scene.set_parent(lobj, group)?;
    }
    Ok(group)
}

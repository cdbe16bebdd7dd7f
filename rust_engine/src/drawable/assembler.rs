//! drawable 根对象、模型和几何体的组装

use std::path::Path;

use crate::bounds::BoundsConverter;
use crate::config::get_config;
use crate::geometry::geometry_to_obj;
use crate::light::create_lights;
use crate::material::{apply_tint_palette, shadergroup_to_materials, ShaderLibrary};
use crate::records::{BoneRecord, BoundType, Drawable, DrawableModel, LodLevel};
use crate::scene::{
    Armature, DrawableProperties, Host, MaterialId, Modifier, ModelProperties, Object, ObjectData,
    ObjectId, ObjectRole, SceneSink,
};
use crate::skeleton::{rotation_limits_to_obj, skeleton_to_obj, BONE_TAIL_POS};
use crate::{DrawableError, Result};

use super::DrawableOptions;

/// 将 drawable 记录重建为场景对象层级，返回根对象
pub fn drawable_to_obj<H, L, B>(
    host: &mut H,
    library: &L,
    bounds: &B,
    drawable: &Drawable,
    filepath: &Path,
    name: &str,
    options: &DrawableOptions,
) -> Result<ObjectId>
where
    H: Host + ?Sized,
    L: ShaderLibrary + ?Sized,
    B: BoundsConverter,
{
    let config = get_config();

    let materials = match options.materials.as_deref() {
        Some(materials) if !materials.is_empty() => materials.to_vec(),
        _ => shadergroup_to_materials(
            host,
            library,
            &drawable.shader_group,
            filepath,
            config.placeholder_texture_size,
        )?,
    };

    let data = if drawable.has_skeleton() {
        ObjectData::Armature(Armature::new(&format!("{}.skel", name)))
    } else {
        ObjectData::Empty
    };
    let mut root = Object::new(name, data);
    root.role = ObjectRole::Drawable;
    root.empty_display_size = 0.0;
    root.drawable_properties = Some(DrawableProperties {
        lod_dist_high: drawable.lod_dist_high,
        lod_dist_med: drawable.lod_dist_med,
        lod_dist_low: drawable.lod_dist_low,
        lod_dist_vlow: drawable.lod_dist_vlow,
        unknown_9a: drawable.unknown_9a,
    });
    let root = host.add_object(root);
    host.link_object(root);

    let mut bones: Option<&[BoneRecord]> = None;
    if drawable.has_skeleton() {
        skeleton_to_obj(host, &drawable.skeleton, root)?;
        bones = Some(drawable.skeleton.bones.as_slice());
    }

    if !drawable.joints.rotation_limits.is_empty() {
        rotation_limits_to_obj(host, &drawable.joints.rotation_limits, root)?;
    }

    if let Some(bones_override) = options.bones_override.as_deref() {
        bones = Some(bones_override);
    }

    for bound in &drawable.bounds {
        let label = if bound.bound_type == BoundType::Composite {
            ObjectRole::BoundComposite.ui_name()
        } else {
            bound.bound_type.ui_name()
        };
        if let Some(bobj) = bounds.bound_to_obj(host, bound, label)? {
            host.set_parent(bobj, root)?;
        }
    }

    let armature = (drawable.has_skeleton() && !options.is_ydd).then_some(root);

    let mut model_count = 0;
    for lod in LodLevel::ALL {
        for model in drawable.models(lod) {
            let dobj =
                drawable_model_to_obj(host, model, &materials, &drawable.name, lod, bones, armature)?;
            host.set_parent(dobj, root)?;
            model_count += 1;
        }
    }

    if let Some(armature) = armature {
        add_armature_modifiers(host, root, armature)?;
    }

    if !drawable.lights.is_empty() {
        create_lights(
            host,
            &drawable.lights,
            root,
            None,
            config.light_intensity_factor(),
        )?;
    }

    log::debug!(
        "assembled drawable '{}': {} models, {} materials, {} lights",
        name,
        model_count,
        materials.len(),
        drawable.lights.len()
    );
    Ok(root)
}

/// 创建模型对象及其几何体
///
/// 有骨架时模型以 `bone_index` 对应的骨骼为父级；索引超出骨骼数则不绑定。
/// 几何体设置父级后按材质添加调色板修改器。
pub fn drawable_model_to_obj<H: Host + ?Sized>(
    scene: &mut H,
    model: &DrawableModel,
    materials: &[MaterialId],
    name: &str,
    lod: LodLevel,
    bones: Option<&[BoneRecord]>,
    armature: Option<ObjectId>,
) -> Result<ObjectId> {
    let mut dobj = Object::empty(ObjectRole::DrawableModel.ui_name());
    dobj.role = ObjectRole::DrawableModel;
    dobj.empty_display_size = 0.0;
    dobj.model_properties = Some(ModelProperties {
        lod,
        render_mask: model.render_mask,
        flags: model.flags,
        unknown_1: model.unknown_1,
    });

    if let Some(armature) = armature {
        let parent_bone = scene
            .object(armature)
            .and_then(Object::armature)
            .and_then(|data| data.bones.get(model.bone_index as usize))
            .map(|bone| bone.name.clone());
        if let Some(parent_bone) = parent_bone {
            dobj.parent = Some(armature);
            dobj.parent_bone = Some(parent_bone);
            dobj.delta_location -= BONE_TAIL_POS;
        }
    }

    let dobj = scene.add_object(dobj);

    for geometry in &model.geometries {
        let material = *materials.get(geometry.shader_index).ok_or_else(|| {
            DrawableError::Reference(format!(
                "geometry shader index {} out of range ({} materials)",
                geometry.shader_index,
                materials.len()
            ))
        })?;
        let child = geometry_to_obj(scene, geometry, material, bones, name)?;
        scene.set_parent(child, dobj)?;
        apply_tint_palette(scene, child)?;
    }

    scene.link_object(dobj);
    Ok(dobj)
}

/// 根对象下每个模型的每个几何体添加以骨架为目标的修改器
fn add_armature_modifiers<S: SceneSink + ?Sized>(
    scene: &mut S,
    root: ObjectId,
    armature: ObjectId,
) -> Result<()> {
    for model in scene.children(root) {
        if scene.object(model).map(|obj| obj.role) != Some(ObjectRole::DrawableModel) {
            continue;
        }
        for child in scene.children(model) {
            if scene.object(child).map(|obj| obj.role) != Some(ObjectRole::DrawableGeometry) {
                continue;
            }
            scene.add_modifier(child, Modifier::Armature { object: armature })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Geometry, Vertex};
    use crate::scene::MemoryScene;
    use glam::Vec3;

    fn triangle(shader_index: usize) -> Geometry {
        Geometry {
            shader_index,
            vertices: vec![
                Vertex::new(Vec3::ZERO),
                Vertex::new(Vec3::X),
                Vertex::new(Vec3::Y),
            ],
            indices: vec![0, 1, 2],
            bone_ids: Vec::new(),
        }
    }

    fn model(bone_index: u32, geometries: Vec<Geometry>) -> DrawableModel {
        DrawableModel {
            bone_index,
            render_mask: 255,
            flags: 1,
            unknown_1: 2,
            geometries,
        }
    }

    #[test]
    fn test_model_properties_and_geometry() {
        let mut scene = MemoryScene::new();
        let id = drawable_model_to_obj(
            &mut scene,
            &model(0, vec![triangle(0)]),
            &[MaterialId(0)],
            "prop",
            LodLevel::Medium,
            None,
            None,
        )
        .unwrap();

        let obj = scene.object(id).unwrap();
        assert_eq!(obj.name, "Drawable Model");
        assert_eq!(obj.parent, None);
        assert_eq!(obj.delta_location, Vec3::ZERO);
        assert_eq!(
            obj.model_properties,
            Some(ModelProperties {
                lod: LodLevel::Medium,
                render_mask: 255,
                flags: 1,
                unknown_1: 2,
            })
        );
        let children = scene.children(id);
        assert_eq!(children.len(), 1);
        assert_eq!(scene.object(children[0]).unwrap().name, "prop");
    }

    #[test]
    fn test_tinted_geometry_gets_palette_modifier() {
        use crate::material::{ShaderCatalog, TINT_PALETTE_SAMPLER};
        use crate::records::{Shader, ShaderGroup, ShaderParameter};

        let mut scene = MemoryScene::new();
        let group = ShaderGroup {
            shaders: vec![
                Shader {
                    name: "default".into(),
                    ..Default::default()
                },
                Shader {
                    name: "default_tnt".into(),
                    parameters: vec![ShaderParameter::texture(TINT_PALETTE_SAMPLER, "palette")],
                    ..Default::default()
                },
            ],
            texture_dictionary: None,
        };
        let materials = shadergroup_to_materials(
            &mut scene,
            &ShaderCatalog::standard(),
            &group,
            Path::new("/x/car.ydr.xml"),
            4,
        )
        .unwrap();

        let id = drawable_model_to_obj(
            &mut scene,
            &model(0, vec![triangle(0), triangle(1)]),
            &materials,
            "car",
            LodLevel::High,
            None,
            None,
        )
        .unwrap();
        let children = scene.children(id);
        assert!(scene.object(children[0]).unwrap().modifiers.is_empty());
        assert!(matches!(
            &scene.object(children[1]).unwrap().modifiers[..],
            [Modifier::TintPalette { material, palette: Some(_) }] if *material == materials[1]
        ));
    }

    #[test]
    fn test_shader_index_out_of_range() {
        let mut scene = MemoryScene::new();
        let result = drawable_model_to_obj(
            &mut scene,
            &model(0, vec![triangle(3)]),
            &[MaterialId(0)],
            "prop",
            LodLevel::High,
            None,
            None,
        );
        assert!(matches!(result, Err(DrawableError::Reference(_))));
    }

    #[test]
    fn test_bone_index_beyond_skeleton_not_bound() {
        let mut scene = MemoryScene::new();
        let mut armature = Armature::new("rig.skel");
        armature.bones.push(crate::scene::ArmatureBone::new("root"));
        let rig = scene.add_object(Object::new("rig", ObjectData::Armature(armature)));
        scene.link_object(rig);

        let bound = drawable_model_to_obj(
            &mut scene,
            &model(0, vec![]),
            &[],
            "prop",
            LodLevel::High,
            None,
            Some(rig),
        )
        .unwrap();
        let bound = scene.object(bound).unwrap();
        assert_eq!(bound.parent_bone.as_deref(), Some("root"));
        assert_eq!(bound.delta_location, -BONE_TAIL_POS);

        let unbound = drawable_model_to_obj(
            &mut scene,
            &model(1, vec![]),
            &[],
            "prop",
            LodLevel::High,
            None,
            Some(rig),
        )
        .unwrap();
        let unbound = scene.object(unbound).unwrap();
        assert_eq!(unbound.parent, None);
        assert_eq!(unbound.parent_bone, None);
    }
}

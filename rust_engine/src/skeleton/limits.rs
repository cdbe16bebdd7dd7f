//! 关节旋转限制

use std::collections::HashMap;

use crate::records::RotationLimit;
use crate::scene::{Armature, BoneConstraint, ConstraintSpace, ObjectId, RotationLimitConstraint, SceneSink};
use crate::{DrawableError, Result};

/// 骨骼标签 → 骨骼名；骨架没有骨骼时返回 None
pub fn build_tag_bone_map(armature: &Armature) -> Option<HashMap<u32, String>> {
    if armature.bones.is_empty() {
        return None;
    }
    Some(
        armature
            .bones
            .iter()
            .map(|bone| (bone.tag, bone.name.clone()))
            .collect(),
    )
}

/// 为关节对应的骨骼添加旋转限制约束，返回带约束的骨骼名
///
/// 目标不是骨架或没有骨骼时整个过程跳过；单个关节的标签找不到则报错。
pub fn rotation_limits_to_obj<S: SceneSink + ?Sized>(
    scene: &mut S,
    rotation_limits: &[RotationLimit],
    armature_obj: ObjectId,
) -> Result<Vec<String>> {
    let Some(armature) = scene.object_mut(armature_obj).and_then(|obj| obj.armature_mut()) else {
        log::warn!(
            "object {:?} is not an armature, skipping {} rotation limits",
            armature_obj,
            rotation_limits.len()
        );
        return Ok(Vec::new());
    };
    let Some(tag_bone_map) = build_tag_bone_map(armature) else {
        log::warn!(
            "armature '{}' has no bones, skipping {} rotation limits",
            armature.name,
            rotation_limits.len()
        );
        return Ok(Vec::new());
    };

    let mut bones_with_constraint = Vec::with_capacity(rotation_limits.len());
    for joint in rotation_limits {
        let bone_name = tag_bone_map.get(&joint.bone_id).ok_or_else(|| {
            DrawableError::Reference(format!(
                "rotation limit references unknown bone tag {}",
                joint.bone_id
            ))
        })?;
        let bone = armature
            .bones
            .iter_mut()
            .find(|bone| &bone.name == bone_name)
            .ok_or_else(|| DrawableError::Reference(format!("bone '{}' not found", bone_name)))?;

        bone.constraints.push(BoneConstraint::LimitRotation(RotationLimitConstraint {
            owner_space: ConstraintSpace::Local,
            use_limit: [true; 3],
            min: joint.min,
            max: joint.max,
        }));
        bones_with_constraint.push(bone.name.clone());
    }

    Ok(bones_with_constraint)
}

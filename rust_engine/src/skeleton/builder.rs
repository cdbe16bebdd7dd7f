//! 骨架构建
//!
//! 分两个阶段：先按索引顺序创建全部骨骼并计算世界变换，
//! 再在所有骨骼都存在之后写入标签和标志。

use std::collections::HashMap;

use glam::{Mat4, Vec3};

use crate::records::{BoneRecord, Skeleton};
use crate::scene::{Armature, ArmatureBone, ObjectId, SceneSink};
use crate::{DrawableError, Result};

/// 骨骼尾部偏移，仅用于编辑时可见，不影响变换语义
pub const BONE_TAIL_POS: Vec3 = Vec3::new(0.0, 0.05, 0.0);

/// 编辑骨骼不保存缩放，缩放矩阵只使用这个统一系数
const EDIT_BONE_SCALE: f32 = 1.0;

/// 在结构上另有表示、不作为通用标志保存的骨骼标志
const RESTRICTED_FLAGS: [&str; 2] = ["LimitRotation", "Unk0"];

/// 骨骼相对父骨骼的变换：平移 × 旋转 × 缩放
pub fn bone_local_matrix(bone: &BoneRecord) -> Mat4 {
    let mat_loc = Mat4::from_translation(bone.translation);
    let mat_rot = Mat4::from_quat(bone.rotation);
    let mat_sca = Mat4::from_scale(Vec3::splat(EDIT_BONE_SCALE));
    mat_loc * mat_rot * mat_sca
}

/// 骨骼构建器（可按索引寻址的中间骨骼数组）
#[derive(Default)]
pub struct SkeletonBuilder {
    bones: Vec<ArmatureBone>,
    name_to_index: HashMap<String, usize>,
}

impl SkeletonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 第一阶段：创建骨骼并计算世界变换
    ///
    /// 父骨骼必须已经创建（父索引小于当前索引）。
    pub fn bone_to_obj(&mut self, bone: &BoneRecord) -> Result<usize> {
        let index = self.bones.len();
        let parent = match bone.parent_index {
            -1 => None,
            p if p >= 0 && (p as usize) < index => Some(p as usize),
            p => {
                return Err(DrawableError::Reference(format!(
                    "bone '{}' (#{}) references parent #{} which is not built yet",
                    bone.name, index, p
                )))
            }
        };

        let local = bone_local_matrix(bone);
        let matrix = match parent {
            Some(p) => self.bones[p].matrix * local,
            None => local,
        };

        let mut edit_bone = ArmatureBone::new(&bone.name);
        edit_bone.parent = parent;
        edit_bone.matrix = matrix;
        edit_bone.head = matrix.transform_point3(Vec3::ZERO);
        edit_bone.tail = matrix.transform_point3(BONE_TAIL_POS);

        self.name_to_index.entry(bone.name.clone()).or_insert(index);
        self.bones.push(edit_bone);
        Ok(index)
    }

    /// 第二阶段：写入标签和标志，按名称查找骨骼
    pub fn set_bone_properties(&mut self, bone: &BoneRecord) -> Result<()> {
        let index = *self.name_to_index.get(&bone.name).ok_or_else(|| {
            DrawableError::Reference(format!("bone '{}' was not built", bone.name))
        })?;
        let target = &mut self.bones[index];
        target.tag = bone.tag;
        target.flags = bone
            .flags
            .iter()
            .filter(|flag| !RESTRICTED_FLAGS.contains(&flag.as_str()))
            .cloned()
            .collect();
        Ok(())
    }

    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    pub fn into_bones(self) -> Vec<ArmatureBone> {
        self.bones
    }

    /// 依次执行两个阶段
    pub fn build(skeleton: &Skeleton) -> Result<Vec<ArmatureBone>> {
        let mut builder = Self::new();
        for bone in &skeleton.bones {
            builder.bone_to_obj(bone)?;
        }
        for bone in &skeleton.bones {
            builder.set_bone_properties(bone)?;
        }
        Ok(builder.into_bones())
    }
}

/// 在骨架对象上重建骨架
pub fn skeleton_to_obj<S: SceneSink + ?Sized>(
    scene: &mut S,
    skeleton: &Skeleton,
    armature_obj: ObjectId,
) -> Result<()> {
    let bones = SkeletonBuilder::build(skeleton)?;
    let armature = armature_data_mut(scene, armature_obj)?;
    armature.bones = bones;
    Ok(())
}

pub(crate) fn armature_data_mut<S: SceneSink + ?Sized>(
    scene: &mut S,
    id: ObjectId,
) -> Result<&mut Armature> {
    scene
        .object_mut(id)
        .and_then(|obj| obj.armature_mut())
        .ok_or_else(|| DrawableError::Reference(format!("object {:?} is not an armature", id)))
}

//! 骨架与关节记录

use glam::{Quat, Vec3};

/// 骨骼记录
#[derive(Clone, Debug)]
pub struct BoneRecord {
    pub name: String,
    /// 父骨骼索引，-1 表示根骨骼
    pub parent_index: i32,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    /// 稳定标签，与索引无关，供灯光和关节引用
    pub tag: u32,
    pub flags: Vec<String>,
}

impl BoneRecord {
    pub fn new(name: &str, parent_index: i32, tag: u32) -> Self {
        Self {
            name: name.to_string(),
            parent_index,
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            tag,
            flags: Vec::new(),
        }
    }
}

/// 骨架（索引即身份）
#[derive(Clone, Debug, Default)]
pub struct Skeleton {
    pub bones: Vec<BoneRecord>,
}

/// 旋转限制关节，按骨骼标签定位
#[derive(Clone, Debug)]
pub struct RotationLimit {
    pub bone_id: u32,
    /// 各轴最小角度（弧度）
    pub min: Vec3,
    /// 各轴最大角度（弧度）
    pub max: Vec3,
}

#[derive(Clone, Debug, Default)]
pub struct Joints {
    pub rotation_limits: Vec<RotationLimit>,
}

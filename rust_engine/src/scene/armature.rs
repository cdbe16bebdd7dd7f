//! 骨架数据块

use glam::{Mat4, Vec3};

use super::ConstraintSpace;

/// 旋转限制约束（弧度）
#[derive(Clone, Debug, PartialEq)]
pub struct RotationLimitConstraint {
    pub owner_space: ConstraintSpace,
    pub use_limit: [bool; 3],
    pub min: Vec3,
    pub max: Vec3,
}

/// 骨骼级约束
#[derive(Clone, Debug, PartialEq)]
pub enum BoneConstraint {
    LimitRotation(RotationLimitConstraint),
}

/// 骨架中的骨骼
#[derive(Clone, Debug)]
pub struct ArmatureBone {
    pub name: String,
    pub parent: Option<usize>,
    pub head: Vec3,
    pub tail: Vec3,
    /// 骨架空间（世界）变换
    pub matrix: Mat4,
    pub tag: u32,
    pub flags: Vec<String>,
    pub constraints: Vec<BoneConstraint>,
}

impl ArmatureBone {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            head: Vec3::ZERO,
            tail: Vec3::ZERO,
            matrix: Mat4::IDENTITY,
            tag: 0,
            flags: Vec::new(),
            constraints: Vec::new(),
        }
    }
}

/// 骨架
#[derive(Clone, Debug, Default)]
pub struct Armature {
    pub name: String,
    pub bones: Vec<ArmatureBone>,
}

impl Armature {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            bones: Vec::new(),
        }
    }

    pub fn bone_index(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|bone| bone.name == name)
    }

    pub fn bone(&self, name: &str) -> Option<&ArmatureBone> {
        self.bones.iter().find(|bone| bone.name == name)
    }

    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }
}

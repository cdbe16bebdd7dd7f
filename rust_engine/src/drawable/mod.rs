//! drawable 组装
//!
//! 按固定顺序把记录树的各部分交给对应的构建器：材质、根对象与骨架、
//! 旋转限制、碰撞边界、四级 LOD 模型及其几何体、骨架修改器，最后是灯光。

mod assembler;
mod import;

pub use assembler::{drawable_model_to_obj, drawable_to_obj};
pub use import::{drawable_name, import_ydr, YDR_EXTENSION};

use crate::records::BoneRecord;
use crate::scene::MaterialId;

/// 单次导入的选项
#[derive(Debug, Clone, Default)]
pub struct ImportSettings {
    /// 导入后将每个模型下的几何体合并为一个网格对象
    pub join_geometries: bool,
}

/// 组装选项
#[derive(Debug, Clone, Default)]
pub struct DrawableOptions {
    /// 替代骨架骨骼用于权重组命名
    pub bones_override: Option<Vec<BoneRecord>>,
    /// 预先创建的材质，按着色器索引排列；为空时从着色器组创建
    pub materials: Option<Vec<MaterialId>>,
    /// drawable 字典模式：不添加骨架修改器
    pub is_ydd: bool,
}

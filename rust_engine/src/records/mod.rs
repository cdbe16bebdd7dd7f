//! 解析器产出的 drawable 记录树
//!
//! 这些类型是只读输入，由外部 XML 解析器构造，导入过程中不会被修改。

mod bound;
mod geometry;
mod light;
mod shader;
mod skeleton;

pub use bound::{Bound, BoundType};
pub use geometry::{BlendData, DrawableModel, Geometry, Vertex};
pub use light::LightRecord;
pub use shader::{EmbeddedTexture, ParameterValue, Shader, ShaderGroup, ShaderParameter};
pub use skeleton::{BoneRecord, Joints, RotationLimit, Skeleton};

/// LOD 等级
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LodLevel {
    High,
    Medium,
    Low,
    VeryLow,
}

impl LodLevel {
    /// 按固定顺序排列的全部等级
    pub const ALL: [LodLevel; 4] = [
        LodLevel::High,
        LodLevel::Medium,
        LodLevel::Low,
        LodLevel::VeryLow,
    ];
}

/// 可绘制资源（根记录）
#[derive(Clone, Debug, Default)]
pub struct Drawable {
    pub name: String,
    pub models_high: Vec<DrawableModel>,
    pub models_med: Vec<DrawableModel>,
    pub models_low: Vec<DrawableModel>,
    pub models_vlow: Vec<DrawableModel>,
    pub skeleton: Skeleton,
    pub joints: Joints,
    pub shader_group: ShaderGroup,
    pub bounds: Vec<Bound>,
    pub lights: Vec<LightRecord>,
    pub lod_dist_high: f32,
    pub lod_dist_med: f32,
    pub lod_dist_low: f32,
    pub lod_dist_vlow: f32,
    pub unknown_9a: u32,
}

impl Drawable {
    /// 指定 LOD 等级的模型列表
    pub fn models(&self, lod: LodLevel) -> &[DrawableModel] {
        match lod {
            LodLevel::High => &self.models_high,
            LodLevel::Medium => &self.models_med,
            LodLevel::Low => &self.models_low,
            LodLevel::VeryLow => &self.models_vlow,
        }
    }

    /// 是否带有骨架
    pub fn has_skeleton(&self) -> bool {
        !self.skeleton.bones.is_empty()
    }
}

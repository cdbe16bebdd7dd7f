//! 模型、几何体与顶点记录

use glam::{Vec2, Vec3};

/// 顶点骨骼混合数据（每顶点固定 4 组权重/索引）
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BlendData {
    /// 权重，0-255 标度
    pub weights: [u8; 4],
    /// 几何体局部骨骼索引
    pub indices: [u8; 4],
}

/// 交错顶点
///
/// 纹理坐标和颜色按通道名存放，通道顺序与解析器输出的字段顺序一致。
#[derive(Clone, Debug, Default)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Option<Vec3>,
    pub texcoords: Vec<(String, Vec2)>,
    pub colors: Vec<(String, [u8; 4])>,
    pub blend: Option<BlendData>,
}

impl Vertex {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = Some(normal);
        self
    }

    pub fn with_texcoord(mut self, channel: &str, uv: Vec2) -> Self {
        self.texcoords.push((channel.to_string(), uv));
        self
    }

    pub fn with_color(mut self, channel: &str, color: [u8; 4]) -> Self {
        self.colors.push((channel.to_string(), color));
        self
    }

    pub fn with_blend(mut self, weights: [u8; 4], indices: [u8; 4]) -> Self {
        self.blend = Some(BlendData { weights, indices });
        self
    }
}

/// 几何体
#[derive(Clone, Debug, Default)]
pub struct Geometry {
    /// 着色器组中的材质索引
    pub shader_index: usize,
    pub vertices: Vec<Vertex>,
    /// 平铺三角形索引，长度应为 3 的倍数
    pub indices: Vec<u32>,
    /// 几何体局部骨骼索引 → 骨架骨骼索引
    pub bone_ids: Vec<u32>,
}

/// 模型（属于某一个 LOD 等级）
#[derive(Clone, Debug, Default)]
pub struct DrawableModel {
    pub bone_index: u32,
    pub render_mask: u32,
    pub flags: u32,
    pub unknown_1: u32,
    pub geometries: Vec<Geometry>,
}

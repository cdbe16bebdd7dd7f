//! 网格数据块和图层辅助函数
//!
//! 图层数据按面角（loop）存放：第 f 个三角形的第 c 个角对应索引 `f * 3 + c`。

use glam::{Vec2, Vec3, Vec4};

use crate::{DrawableError, Result};

use super::MaterialId;

#[derive(Clone, Debug)]
pub struct UvLayer {
    pub name: String,
    pub data: Vec<Vec2>,
}

#[derive(Clone, Debug)]
pub struct ColorLayer {
    pub name: String,
    /// 0-1 RGBA
    pub data: Vec<Vec4>,
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[u32; 3]>,
    pub face_smooth: Vec<bool>,
    /// 每个面的材质槽索引
    pub face_material: Vec<u32>,
    /// 自定义（分裂）法线，按顶点
    pub custom_normals: Option<Vec<Vec3>>,
    pub uv_layers: Vec<UvLayer>,
    pub color_layers: Vec<ColorLayer>,
    pub materials: Vec<MaterialId>,
}

impl Mesh {
    /// 由顶点和三角形创建网格，只做结构检查
    pub fn from_triangles(name: &str, vertices: Vec<Vec3>, faces: Vec<[u32; 3]>) -> Result<Self> {
        if vertices.is_empty() {
            return Err(DrawableError::Decode(format!(
                "mesh '{}' has no vertices",
                name
            )));
        }
        let vertex_count = vertices.len() as u32;
        if let Some(bad) = faces.iter().flatten().find(|&&index| index >= vertex_count) {
            return Err(DrawableError::Decode(format!(
                "mesh '{}' references vertex {} but only has {}",
                name, bad, vertex_count
            )));
        }

        let face_count = faces.len();
        Ok(Self {
            name: name.to_string(),
            vertices,
            faces,
            face_smooth: vec![false; face_count],
            face_material: vec![0; face_count],
            custom_normals: None,
            uv_layers: Vec::new(),
            color_layers: Vec::new(),
            materials: Vec::new(),
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn loop_count(&self) -> usize {
        self.faces.len() * 3
    }

    /// 每个面角对应的顶点索引
    pub fn loop_vertices(&self) -> impl Iterator<Item = u32> + '_ {
        self.faces.iter().flatten().copied()
    }

    /// 设置按顶点的自定义法线，所有面标记为平滑
    pub fn set_custom_normals(&mut self, normals: Vec<Vec3>) -> Result<()> {
        if normals.len() != self.vertices.len() {
            return Err(DrawableError::Decode(format!(
                "mesh '{}' has {} vertices but {} normals",
                self.name,
                self.vertices.len(),
                normals.len()
            )));
        }
        self.face_smooth.iter_mut().for_each(|smooth| *smooth = true);
        self.custom_normals = Some(normals.into_iter().map(|n| n.normalize_or_zero()).collect());
        Ok(())
    }

    fn check_vertex_attribute(&self, what: &str, len: usize) -> Result<()> {
        if len != self.vertices.len() {
            return Err(DrawableError::Decode(format!(
                "mesh '{}' has {} vertices but {} {} values",
                self.name,
                self.vertices.len(),
                len,
                what
            )));
        }
        Ok(())
    }
}

/// 创建第 `num` 个 UV 图层，V 轴翻转
pub fn create_uv_layer(mesh: &mut Mesh, num: usize, coords: &[Vec2]) -> Result<()> {
    mesh.check_vertex_attribute("texcoord", coords.len())?;
    let data = mesh
        .loop_vertices()
        .map(|v| {
            let uv = coords[v as usize];
            Vec2::new(uv.x, 1.0 - uv.y)
        })
        .collect();
    mesh.uv_layers.push(UvLayer {
        name: format!("UVMap {}", num),
        data,
    });
    Ok(())
}

/// 创建第 `num` 个顶点颜色图层，分量从 0-255 映射到 0-1
pub fn create_color_layer(mesh: &mut Mesh, num: usize, colors: &[[u8; 4]]) -> Result<()> {
    mesh.check_vertex_attribute("colour", colors.len())?;
    let data = mesh
        .loop_vertices()
        .map(|v| {
            let [r, g, b, a] = colors[v as usize];
            Vec4::new(r as f32, g as f32, b as f32, a as f32) / 255.0
        })
        .collect();
    mesh.color_layers.push(ColorLayer {
        name: format!("Color {}", num),
        data,
    });
    Ok(())
}

//! 材质构建：着色器模板实例化、纹理和参数绑定、调色板着色

mod builder;
mod catalog;
mod graph;
mod texture;
mod tint;

pub use builder::{shader_item_to_material, shadergroup_to_materials};
pub use catalog::{ShaderCatalog, ShaderLibrary, ShaderTemplate};
pub use graph::{
    ParameterBinding, ShaderGraph, ShaderNode, TextureNode, ValueNode, DETAIL_EXTRA_SAMPLER,
    DETAIL_SAMPLER, TINT_PALETTE_SAMPLER,
};
pub use texture::{TextureFlags, TextureFormat, TextureProperties, TextureUsage};
pub use tint::apply_tint_palette;

/// 着色器元数据
#[derive(Clone, Debug, PartialEq)]
pub struct ShaderProperties {
    pub renderbucket: u32,
    /// 模板标识
    pub filename: String,
}

/// 材质
#[derive(Clone, Debug)]
pub struct Material {
    pub name: String,
    pub shader_properties: ShaderProperties,
    pub graph: ShaderGraph,
}

impl Material {
    /// 纹理槽上绑定的图像
    pub fn texture_image(&self, slot: &str) -> Option<crate::scene::ImageId> {
        self.graph.texture_node(slot)?.image
    }
}

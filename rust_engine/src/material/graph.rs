//! 着色器节点图
//!
//! 节点命名是与着色器模板之间的约定：纹理槽节点与参数同名，
//! 值节点命名为 `<参数>_<x|y|z|w>`。参数到节点的映射在实例化时建立并校验，
//! 之后按表查找而不是逐节点比较名称。

use std::collections::HashMap;

use glam::Vec4;

use crate::scene::ImageId;
use crate::{DrawableError, Result};

use super::texture::{TextureFlags, TextureProperties};

/// 主细节采样器
pub const DETAIL_SAMPLER: &str = "DetailSampler";

/// 仅用于预览的细节采样器副本
pub const DETAIL_EXTRA_SAMPLER: &str = "DetailSampler_EXTRA";

/// 调色板纹理槽，存在时材质按顶点色调着色
pub const TINT_PALETTE_SAMPLER: &str = "TintPaletteSampler";

const COMPONENTS: [char; 4] = ['x', 'y', 'z', 'w'];

#[derive(Clone, Debug, PartialEq)]
pub struct TextureNode {
    pub name: String,
    pub image: Option<ImageId>,
    pub properties: TextureProperties,
    pub flags: TextureFlags,
}

impl TextureNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            image: None,
            properties: TextureProperties::default(),
            flags: TextureFlags::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValueNode {
    pub name: String,
    pub value: f32,
}

impl ValueNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ShaderNode {
    Texture(TextureNode),
    Value(ValueNode),
}

impl ShaderNode {
    pub fn name(&self) -> &str {
        match self {
            ShaderNode::Texture(node) => &node.name,
            ShaderNode::Value(node) => &node.name,
        }
    }
}

/// 参数到节点的绑定
#[derive(Clone, Debug, PartialEq)]
pub enum ParameterBinding {
    /// 纹理槽节点索引
    Texture(usize),
    /// x/y/z/w 分量对应的值节点索引
    Vector([Option<usize>; 4]),
}

#[derive(Clone, Debug)]
pub struct ShaderGraph {
    template: String,
    nodes: Vec<ShaderNode>,
    bindings: HashMap<String, ParameterBinding>,
    detail_extra: Option<usize>,
}

impl ShaderGraph {
    /// 由节点列表建立图并生成参数绑定表
    pub fn new(template: &str, nodes: Vec<ShaderNode>) -> Result<Self> {
        let invalid = |msg: String| DrawableError::InvalidTemplate(format!("{}: {}", template, msg));

        let mut bindings: HashMap<String, ParameterBinding> = HashMap::new();
        let mut detail_extra = None;
        let mut seen = std::collections::HashSet::new();

        for (index, node) in nodes.iter().enumerate() {
            if !seen.insert(node.name()) {
                return Err(invalid(format!("duplicate node '{}'", node.name())));
            }
            match node {
                ShaderNode::Texture(texture) if texture.name == DETAIL_EXTRA_SAMPLER => {
                    detail_extra = Some(index);
                }
                ShaderNode::Texture(texture) => {
                    if bindings.contains_key(&texture.name) {
                        return Err(invalid(format!(
                            "texture slot '{}' collides with a value parameter",
                            texture.name
                        )));
                    }
                    bindings.insert(texture.name.clone(), ParameterBinding::Texture(index));
                }
                ShaderNode::Value(value) => {
                    let (param, component) = split_value_name(&value.name)
                        .ok_or_else(|| invalid(format!("malformed value node '{}'", value.name)))?;
                    let binding = bindings
                        .entry(param.to_string())
                        .or_insert(ParameterBinding::Vector([None; 4]));
                    match binding {
                        ParameterBinding::Vector(slots) => slots[component] = Some(index),
                        ParameterBinding::Texture(_) => {
                            return Err(invalid(format!(
                                "value node '{}' collides with a texture slot",
                                value.name
                            )))
                        }
                    }
                }
            }
        }

        Ok(Self {
            template: template.to_string(),
            nodes,
            bindings,
            detail_extra,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn nodes(&self) -> &[ShaderNode] {
        &self.nodes
    }

    pub fn binding(&self, param: &str) -> Option<&ParameterBinding> {
        self.bindings.get(param)
    }

    /// 参数绑定的纹理节点索引
    pub fn texture_slot(&self, param: &str) -> Option<usize> {
        match self.bindings.get(param)? {
            ParameterBinding::Texture(index) => Some(*index),
            ParameterBinding::Vector(_) => None,
        }
    }

    pub fn texture_node(&self, name: &str) -> Option<&TextureNode> {
        self.nodes.iter().find_map(|node| match node {
            ShaderNode::Texture(texture) if texture.name == name => Some(texture),
            _ => None,
        })
    }

    pub fn texture_node_at_mut(&mut self, index: usize) -> Option<&mut TextureNode> {
        match self.nodes.get_mut(index)? {
            ShaderNode::Texture(texture) => Some(texture),
            ShaderNode::Value(_) => None,
        }
    }

    /// 写入向量参数，返回实际写入的分量数
    pub fn set_vector(&mut self, param: &str, value: Vec4) -> usize {
        let Some(ParameterBinding::Vector(slots)) = self.bindings.get(param) else {
            return 0;
        };
        let slots = *slots;
        let mut written = 0;
        for (component, slot) in slots.iter().enumerate() {
            if let Some(ShaderNode::Value(node)) = slot.and_then(|i| self.nodes.get_mut(i)) {
                node.value = value[component];
                written += 1;
            }
        }
        written
    }

    /// 读取向量参数的某个分量
    pub fn value(&self, param: &str, component: usize) -> Option<f32> {
        let ParameterBinding::Vector(slots) = self.bindings.get(param)? else {
            return None;
        };
        match self.nodes.get((*slots.get(component)?)?)? {
            ShaderNode::Value(node) => Some(node.value),
            ShaderNode::Texture(_) => None,
        }
    }

    /// 预览用的细节采样器副本节点
    pub fn detail_extra_sampler(&self) -> Option<&TextureNode> {
        match &self.nodes[self.detail_extra?] {
            ShaderNode::Texture(texture) => Some(texture),
            ShaderNode::Value(_) => None,
        }
    }

    /// 调色板纹理节点
    pub fn tint_palette(&self) -> Option<&TextureNode> {
        self.texture_node(TINT_PALETTE_SAMPLER)
    }

    /// 将主细节采样器的图像复制到副本节点
    pub fn mirror_detail_sampler(&mut self) -> bool {
        let Some(extra) = self.detail_extra else {
            return false;
        };
        let Some(image) = self.texture_node(DETAIL_SAMPLER).map(|node| node.image) else {
            return false;
        };
        match self.texture_node_at_mut(extra) {
            Some(node) => {
                node.image = image;
                true
            }
            None => false,
        }
    }
}

/// `bumpiness_x` → ("bumpiness", 0)
fn split_value_name(name: &str) -> Option<(&str, usize)> {
    let mut chars = name.char_indices().rev();
    let (_, last) = chars.next()?;
    let (separator_at, separator) = chars.next()?;
    if separator != '_' || separator_at == 0 {
        return None;
    }
    let component = COMPONENTS.iter().position(|&c| c == last)?;
    Some((&name[..separator_at], component))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(name: &str) -> ShaderNode {
        ShaderNode::Value(ValueNode::new(name))
    }

    fn texture(name: &str) -> ShaderNode {
        ShaderNode::Texture(TextureNode::new(name))
    }

    #[test]
    fn test_split_value_name() {
        assert_eq!(split_value_name("bumpiness_x"), Some(("bumpiness", 0)));
        assert_eq!(split_value_name("detailSettings_w"), Some(("detailSettings", 3)));
        assert_eq!(split_value_name("bumpiness_q"), None);
        assert_eq!(split_value_name("_x"), None);
        assert_eq!(split_value_name("x"), None);
    }

    #[test]
    fn test_bindings_built_from_node_names() {
        let graph = ShaderGraph::new(
            "normal.sps",
            vec![
                texture("DiffuseSampler"),
                texture("BumpSampler"),
                value("bumpiness_x"),
                value("matMaterialColorScale_x"),
                value("matMaterialColorScale_y"),
            ],
        )
        .unwrap();
        assert_eq!(graph.texture_slot("BumpSampler"), Some(1));
        assert_eq!(
            graph.binding("matMaterialColorScale"),
            Some(&ParameterBinding::Vector([Some(3), Some(4), None, None]))
        );
        assert!(graph.detail_extra_sampler().is_none());
    }

    #[test]
    fn test_set_vector_writes_bound_components() {
        let mut graph = ShaderGraph::new(
            "t.sps",
            vec![value("scale_x"), value("scale_z")],
        )
        .unwrap();
        assert_eq!(graph.set_vector("scale", Vec4::new(1.0, 2.0, 3.0, 4.0)), 2);
        assert_eq!(graph.value("scale", 0), Some(1.0));
        assert_eq!(graph.value("scale", 1), None);
        assert_eq!(graph.value("scale", 2), Some(3.0));
        assert_eq!(graph.set_vector("missing", Vec4::ONE), 0);
    }

    #[test]
    fn test_invalid_templates_rejected() {
        assert!(matches!(
            ShaderGraph::new("t.sps", vec![texture("A"), texture("A")]),
            Err(DrawableError::InvalidTemplate(_))
        ));
        assert!(ShaderGraph::new("t.sps", vec![value("nocomponent")]).is_err());
        assert!(ShaderGraph::new("t.sps", vec![texture("p"), value("p_x")]).is_err());
    }

    #[test]
    fn test_mirror_detail_sampler() {
        let mut graph = ShaderGraph::new(
            "detail.sps",
            vec![texture(DETAIL_SAMPLER), texture(DETAIL_EXTRA_SAMPLER)],
        )
        .unwrap();
        if let Some(index) = graph.texture_slot(DETAIL_SAMPLER) {
            graph.texture_node_at_mut(index).unwrap().image = Some(ImageId(7));
        }
        assert!(graph.mirror_detail_sampler());
        assert_eq!(graph.detail_extra_sampler().unwrap().image, Some(ImageId(7)));
    }
}

//! 着色器模板库

use std::collections::HashMap;

use crate::{DrawableError, Result};

use super::graph::{
    ShaderGraph, ShaderNode, TextureNode, ValueNode, DETAIL_EXTRA_SAMPLER, DETAIL_SAMPLER,
    TINT_PALETTE_SAMPLER,
};

/// 着色器图构建接口
pub trait ShaderLibrary {
    /// 按模板标识（如 `normal_spec.sps`）创建新的图实例
    fn create_graph(&self, template: &str) -> Result<ShaderGraph>;
}

/// 模板声明：纹理槽和向量参数（参数名, 分量数）
#[derive(Clone, Debug, Default)]
pub struct ShaderTemplate {
    pub textures: Vec<String>,
    pub vectors: Vec<(String, usize)>,
    /// 是否带预览用的细节采样器副本
    pub detail_extra: bool,
}

impl ShaderTemplate {
    pub fn new(textures: &[&str], vectors: &[(&str, usize)]) -> Self {
        Self {
            textures: textures.iter().map(|t| t.to_string()).collect(),
            vectors: vectors.iter().map(|(v, n)| (v.to_string(), *n)).collect(),
            detail_extra: false,
        }
    }

    pub fn with_detail_extra(mut self) -> Self {
        self.detail_extra = true;
        self
    }

    /// 生成节点并建立绑定表
    pub fn instantiate(&self, name: &str) -> Result<ShaderGraph> {
        const COMPONENTS: [&str; 4] = ["x", "y", "z", "w"];

        let mut nodes: Vec<ShaderNode> = self
            .textures
            .iter()
            .map(|texture| ShaderNode::Texture(TextureNode::new(texture)))
            .collect();
        for (param, count) in &self.vectors {
            if *count == 0 || *count > 4 {
                return Err(DrawableError::InvalidTemplate(format!(
                    "{}: parameter '{}' has {} components",
                    name, param, count
                )));
            }
            for component in &COMPONENTS[..*count] {
                nodes.push(ShaderNode::Value(ValueNode::new(&format!(
                    "{}_{}",
                    param, component
                ))));
            }
        }
        if self.detail_extra {
            nodes.push(ShaderNode::Texture(TextureNode::new(DETAIL_EXTRA_SAMPLER)));
        }
        ShaderGraph::new(name, nodes)
    }
}

/// 按模板标识索引的模板表
#[derive(Clone, Debug, Default)]
pub struct ShaderCatalog {
    templates: HashMap<String, ShaderTemplate>,
}

impl ShaderCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常用模板
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        catalog.register(
            "default.sps",
            ShaderTemplate::new(
                &["DiffuseSampler"],
                &[("matMaterialColorScale", 4), ("HardAlphaBlend", 1), ("useTessellation", 1)],
            ),
        );
        catalog.register(
            "cutout.sps",
            ShaderTemplate::new(&["DiffuseSampler"], &[("HardAlphaBlend", 1)]),
        );
        catalog.register(
            "decal.sps",
            ShaderTemplate::new(&["DiffuseSampler"], &[("globalAnimUV0", 3), ("globalAnimUV1", 3)]),
        );
        catalog.register(
            "emissive.sps",
            ShaderTemplate::new(&["DiffuseSampler"], &[("emissiveMultiplier", 1)]),
        );
        catalog.register(
            "normal.sps",
            ShaderTemplate::new(
                &["DiffuseSampler", "BumpSampler"],
                &[("bumpiness", 1), ("HardAlphaBlend", 1)],
            ),
        );
        catalog.register(
            "spec.sps",
            ShaderTemplate::new(
                &["DiffuseSampler", "SpecSampler"],
                &[
                    ("specularFalloffMult", 1),
                    ("specularIntensityMult", 1),
                    ("specMapIntMask", 3),
                ],
            ),
        );
        catalog.register(
            "normal_spec.sps",
            ShaderTemplate::new(
                &["DiffuseSampler", "BumpSampler", "SpecSampler"],
                &[
                    ("bumpiness", 1),
                    ("specularFalloffMult", 1),
                    ("specularIntensityMult", 1),
                    ("specMapIntMask", 3),
                ],
            ),
        );
        catalog.register(
            "normal_spec_detail.sps",
            ShaderTemplate::new(
                &["DiffuseSampler", "BumpSampler", "SpecSampler", DETAIL_SAMPLER],
                &[
                    ("bumpiness", 1),
                    ("specularFalloffMult", 1),
                    ("specularIntensityMult", 1),
                    ("specMapIntMask", 3),
                    ("detailSettings", 4),
                ],
            )
            .with_detail_extra(),
        );
        catalog.register(
            "default_tnt.sps",
            ShaderTemplate::new(
                &["DiffuseSampler", TINT_PALETTE_SAMPLER],
                &[("matMaterialColorScale", 4), ("TintPaletteSelector", 2)],
            ),
        );
        catalog.register(
            "normal_spec_tnt.sps",
            ShaderTemplate::new(
                &["DiffuseSampler", "BumpSampler", "SpecSampler", TINT_PALETTE_SAMPLER],
                &[
                    ("bumpiness", 1),
                    ("specularFalloffMult", 1),
                    ("specularIntensityMult", 1),
                    ("specMapIntMask", 3),
                    ("TintPaletteSelector", 2),
                ],
            ),
        );
        catalog
    }

    pub fn register(&mut self, name: &str, template: ShaderTemplate) {
        self.templates.insert(name.to_string(), template);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }
}

impl ShaderLibrary for ShaderCatalog {
    fn create_graph(&self, template: &str) -> Result<ShaderGraph> {
        self.templates
            .get(template)
            .ok_or_else(|| DrawableError::UnknownShader(template.to_string()))?
            .instantiate(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::ParameterBinding;

    #[test]
    fn test_standard_templates_instantiate() {
        let catalog = ShaderCatalog::standard();
        for name in [
            "default.sps",
            "cutout.sps",
            "decal.sps",
            "emissive.sps",
            "normal.sps",
            "spec.sps",
            "normal_spec.sps",
            "normal_spec_detail.sps",
            "default_tnt.sps",
            "normal_spec_tnt.sps",
        ] {
            assert!(catalog.contains(name));
            let graph = catalog.create_graph(name).unwrap();
            assert_eq!(graph.template(), name);
        }
    }

    #[test]
    fn test_detail_template_has_extra_sampler() {
        let graph = ShaderCatalog::standard()
            .create_graph("normal_spec_detail.sps")
            .unwrap();
        assert!(graph.detail_extra_sampler().is_some());
        assert_eq!(
            graph.binding("specMapIntMask"),
            Some(&ParameterBinding::Vector([
                graph.nodes().iter().position(|n| n.name() == "specMapIntMask_x"),
                graph.nodes().iter().position(|n| n.name() == "specMapIntMask_y"),
                graph.nodes().iter().position(|n| n.name() == "specMapIntMask_z"),
                None,
            ]))
        );
    }

    #[test]
    fn test_tint_templates_expose_palette() {
        let catalog = ShaderCatalog::standard();
        let tinted = catalog.create_graph("default_tnt.sps").unwrap();
        assert!(tinted.tint_palette().is_some());
        let plain = catalog.create_graph("default.sps").unwrap();
        assert!(plain.tint_palette().is_none());
    }

    #[test]
    fn test_unknown_template() {
        assert!(!ShaderCatalog::standard().contains("vehicle_paint9.sps"));
        assert!(matches!(
            ShaderCatalog::standard().create_graph("vehicle_paint9.sps"),
            Err(DrawableError::UnknownShader(_))
        ));
    }

    #[test]
    fn test_bad_component_count() {
        let template = ShaderTemplate::new(&[], &[("wide", 5)]);
        assert!(template.instantiate("wide.sps").is_err());
    }
}

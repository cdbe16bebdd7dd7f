//! 着色器组 → 材质

use std::path::Path;

use crate::records::{EmbeddedTexture, ParameterValue, Shader, ShaderGroup};
use crate::scene::{AssetRegistry, ColorSpace, ImageId, ImageSource, MaterialId};
use crate::texture::{external_reference, placeholder_image, texture_folder, texture_path};
use crate::Result;

use super::catalog::ShaderLibrary;
use super::graph::TextureNode;
use super::texture::{TextureFormat, TextureUsage};
use super::{Material, ShaderProperties};

/// 参数名包含该子串时视为法线贴图
const BUMP_MARKER: &str = "Bump";

/// 为着色器组中每个着色器创建材质，顺序与着色器索引一致
pub fn shadergroup_to_materials<H, L>(
    host: &mut H,
    library: &L,
    shader_group: &ShaderGroup,
    filepath: &Path,
    placeholder_size: u32,
) -> Result<Vec<MaterialId>>
where
    H: AssetRegistry + ?Sized,
    L: ShaderLibrary + ?Sized,
{
    shader_group
        .shaders
        .iter()
        .map(|shader| {
            shader_item_to_material(host, library, shader, shader_group, filepath, placeholder_size)
        })
        .collect()
}

/// 由单个着色器创建材质
pub fn shader_item_to_material<H, L>(
    host: &mut H,
    library: &L,
    shader: &Shader,
    shader_group: &ShaderGroup,
    filepath: &Path,
    placeholder_size: u32,
) -> Result<MaterialId>
where
    H: AssetRegistry + ?Sized,
    L: ShaderLibrary + ?Sized,
{
    let folder = texture_folder(filepath);
    let template = shader.template_name();
    let mut graph = library.create_graph(&template)?;

    for param in &shader.parameters {
        match &param.value {
            ParameterValue::Texture { texture_name } => {
                // 没有纹理名的纹理参数
                let Some(texture_name) = texture_name.as_deref() else {
                    continue;
                };
                let Some(node) = graph
                    .texture_slot(&param.name)
                    .and_then(|slot| graph.texture_node_at_mut(slot))
                else {
                    continue;
                };
                let binding = TextureBinding {
                    param_name: &param.name,
                    texture_name,
                    folder: &folder,
                    placeholder_size,
                };
                binding.apply(host, node, shader_group);
            }
            ParameterValue::Vector(value) => {
                if graph.set_vector(&param.name, *value) == 0 {
                    log::debug!("{}: parameter '{}' has no value node", template, param.name);
                }
            }
        }
    }

    graph.mirror_detail_sampler();

    let material = Material {
        name: shader.name.clone(),
        shader_properties: ShaderProperties {
            renderbucket: shader.render_bucket,
            filename: template,
        },
        graph,
    };
    Ok(host.add_material(material))
}

struct TextureBinding<'a> {
    param_name: &'a str,
    texture_name: &'a str,
    folder: &'a Path,
    placeholder_size: u32,
}

impl TextureBinding<'_> {
    fn apply<H: AssetRegistry + ?Sized>(
        &self,
        host: &mut H,
        node: &mut TextureNode,
        shader_group: &ShaderGroup,
    ) {
        let image = self.resolve_image(host, node);

        if self.param_name.contains(BUMP_MARKER) {
            if let Some(img) = host.image_mut(image) {
                img.colorspace = ColorSpace::NonColor;
            }
        }

        if let Some(texture) = shader_group.embedded_texture(self.texture_name) {
            apply_embedded_properties(node, texture);
        }

        if !node.properties.embedded {
            if let Some(img) = host.image_mut(image) {
                img.source = ImageSource::File;
                if img.filepath.is_none() {
                    img.filepath = Some(external_reference(self.texture_name));
                }
            }
        }
    }

    /// 纹理目录中有文件则加载（按路径复用），否则按名称复用或创建占位图像
    fn resolve_image<H: AssetRegistry + ?Sized>(&self, host: &mut H, node: &mut TextureNode) -> ImageId {
        let path = texture_path(self.folder, self.texture_name);
        if path.is_file() {
            match host.load_image(&path) {
                Ok(image) => node.image = Some(image),
                Err(e) => log::warn!("Failed to load texture {}: {}", path.display(), e),
            }
        }

        if let Some(image) = node.image {
            return image;
        }

        let image = match host.find_image_by_name(self.texture_name) {
            Some(existing) => existing,
            None => host.add_image(placeholder_image(self.texture_name, self.placeholder_size)),
        };
        node.image = Some(image);
        image
    }
}

/// 内嵌纹理字典中的格式信息写入纹理节点，未知枚举值只记录日志
fn apply_embedded_properties(node: &mut TextureNode, texture: &EmbeddedTexture) {
    node.properties.embedded = true;

    match TextureFormat::parse(&texture.format) {
        Some(format) => node.properties.format = format,
        None => log::warn!(
            "Failed to set texture format: format '{}' unknown.",
            texture.format
        ),
    }

    match TextureUsage::parse(&texture.usage) {
        Some(usage) => node.properties.usage = usage,
        None => log::warn!(
            "Failed to set texture usage: usage '{}' unknown.",
            texture.usage
        ),
    }

    node.properties.extra_flags = texture.extra_flags;

    for flag in &texture.usage_flags {
        if !node.flags.set_named(flag) {
            log::debug!("texture '{}': ignoring usage flag '{}'", texture.name, flag);
        }
    }
}

//! 着色器组记录

use glam::Vec4;

/// 着色器参数值
#[derive(Clone, Debug, PartialEq)]
pub enum ParameterValue {
    /// 纹理引用，名称可能为空
    Texture { texture_name: Option<String> },
    /// 四分量标量
    Vector(Vec4),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShaderParameter {
    pub name: String,
    pub value: ParameterValue,
}

impl ShaderParameter {
    pub fn texture(name: &str, texture_name: &str) -> Self {
        let texture_name = if texture_name.is_empty() {
            None
        } else {
            Some(texture_name.to_string())
        };
        Self {
            name: name.to_string(),
            value: ParameterValue::Texture { texture_name },
        }
    }

    pub fn vector(name: &str, value: Vec4) -> Self {
        Self {
            name: name.to_string(),
            value: ParameterValue::Vector(value),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Shader {
    pub name: String,
    /// 着色器模板标识，缺省时为 `<name>.sps`
    pub filename: Option<String>,
    pub render_bucket: u32,
    pub parameters: Vec<ShaderParameter>,
}

impl Shader {
    /// 解析后的模板标识
    pub fn template_name(&self) -> String {
        match &self.filename {
            Some(filename) if !filename.is_empty() => filename.clone(),
            _ => format!("{}.sps", self.name),
        }
    }
}

/// 内嵌纹理字典条目
#[derive(Clone, Debug, Default)]
pub struct EmbeddedTexture {
    pub name: String,
    pub format: String,
    pub usage: String,
    pub usage_flags: Vec<String>,
    pub extra_flags: u32,
}

#[derive(Clone, Debug, Default)]
pub struct ShaderGroup {
    pub shaders: Vec<Shader>,
    pub texture_dictionary: Option<Vec<EmbeddedTexture>>,
}

impl ShaderGroup {
    /// 在内嵌字典中按名称查找纹理
    pub fn embedded_texture(&self, name: &str) -> Option<&EmbeddedTexture> {
        self.texture_dictionary
            .as_ref()?
            .iter()
            .find(|texture| texture.name == name)
    }
}

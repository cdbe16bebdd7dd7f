//! Drawable Engine - 可绘制资源场景重建引擎
//!
//! 将解析后的 drawable 记录树重建为宿主场景中的可编辑对象层级：
//! - 骨架、骨骼属性和旋转限制约束
//! - 顶点缓冲分解、网格构建和骨骼权重组
//! - 基于着色器模板的材质和纹理绑定
//! - 灯光对象和骨骼绑定
//! - 四级 LOD 模型的组装

pub mod bounds;
pub mod config;
pub mod drawable;
pub mod geometry;
pub mod light;
pub mod material;
pub mod records;
pub mod scene;
pub mod skeleton;
pub mod texture;

pub use config::{get_config, ImportConfig};
pub use drawable::{drawable_to_obj, import_ydr, DrawableOptions, ImportSettings};
pub use material::{Material, ShaderCatalog, ShaderLibrary};
pub use records::Drawable;
pub use scene::{AssetRegistry, Host, MemoryScene, ObjectId, SceneSink};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrawableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Reference error: {0}")]
    Reference(String),

    #[error("Unsupported enum value: {0}")]
    UnsupportedEnum(String),

    #[error("Unknown shader template: {0}")]
    UnknownShader(String),

    #[error("Invalid shader template: {0}")]
    InvalidTemplate(String),

    #[error("Texture error: {0}")]
    Texture(String),
}

pub type Result<T> = std::result::Result<T, DrawableError>;

//! 宿主场景抽象
//!
//! 导入过程只通过 [`SceneSink`] 和 [`AssetRegistry`] 两个接口写入宿主，
//! [`MemoryScene`] 是二者的内存实现。

mod armature;
mod image;
mod light;
mod memory;
mod mesh;
mod object;

pub use armature::{Armature, ArmatureBone, BoneConstraint, RotationLimitConstraint};
pub use image::{ColorSpace, Image, ImageSource};
pub use light::{LightData, LightKind, LightProperties};
pub use memory::MemoryScene;
pub use mesh::{create_color_layer, create_uv_layer, ColorLayer, Mesh, UvLayer};
pub use object::{
    ConstraintSpace, DrawableProperties, MixMode, ModelProperties, Modifier, Object,
    ObjectConstraint, ObjectData, ObjectRole, VertexGroup,
};

use std::path::Path;

use crate::material::Material;
use crate::texture::load_image_file;
use crate::{DrawableError, Result};

/// 场景对象句柄
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

/// 材质句柄
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub usize);

/// 图像句柄
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub usize);

/// 场景对象接收端
pub trait SceneSink {
    /// 创建对象（尚未链接到场景集合）
    fn add_object(&mut self, object: Object) -> ObjectId;

    /// 链接到当前场景集合
    fn link_object(&mut self, id: ObjectId);

    fn is_linked(&self, id: ObjectId) -> bool;

    fn object(&self, id: ObjectId) -> Option<&Object>;

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object>;

    /// 移除对象，其子对象的父级清空
    fn remove_object(&mut self, id: ObjectId) -> Option<Object>;

    /// 直接子对象，按创建顺序
    fn children(&self, id: ObjectId) -> Vec<ObjectId>;

    /// 设置父对象
    fn set_parent(&mut self, child: ObjectId, parent: ObjectId) -> Result<()> {
        if self.object(parent).is_none() {
            return Err(DrawableError::Reference(format!(
                "parent object {:?} does not exist",
                parent
            )));
        }
        let object = self.object_mut(child).ok_or_else(|| {
            DrawableError::Reference(format!("object {:?} does not exist", child))
        })?;
        object.parent = Some(parent);
        Ok(())
    }

    /// 添加修改器；骨架修改器的目标必须已链接到场景
    fn add_modifier(&mut self, id: ObjectId, modifier: Modifier) -> Result<()> {
        if let Modifier::Armature { object: target } = &modifier {
            if !self.is_linked(*target) {
                return Err(DrawableError::Reference(format!(
                    "armature modifier target {:?} is not linked to the scene",
                    target
                )));
            }
        }
        let object = self.object_mut(id).ok_or_else(|| {
            DrawableError::Reference(format!("object {:?} does not exist", id))
        })?;
        object.modifiers.push(modifier);
        Ok(())
    }
}

/// 材质与图像注册表
pub trait AssetRegistry {
    fn add_material(&mut self, material: Material) -> MaterialId;

    fn material(&self, id: MaterialId) -> Option<&Material>;

    fn material_mut(&mut self, id: MaterialId) -> Option<&mut Material>;

    fn add_image(&mut self, image: Image) -> ImageId;

    fn image(&self, id: ImageId) -> Option<&Image>;

    fn image_mut(&mut self, id: ImageId) -> Option<&mut Image>;

    fn find_image_by_path(&self, path: &Path) -> Option<ImageId>;

    fn find_image_by_name(&self, name: &str) -> Option<ImageId>;

    /// 从文件加载图像，同一路径只注册一次
    fn load_image(&mut self, path: &Path) -> Result<ImageId> {
        if let Some(existing) = self.find_image_by_path(path) {
            log::debug!("reusing image {}", path.display());
            return Ok(existing);
        }
        let image = load_image_file(path)?;
        Ok(self.add_image(image))
    }

    /// 创建生成图像
    fn new_image(&mut self, name: &str, width: u32, height: u32) -> ImageId {
        self.add_image(Image::generated(name, width, height))
    }
}

/// 同时提供场景和资源注册表的宿主
pub trait Host: SceneSink + AssetRegistry {}

impl<T: SceneSink + AssetRegistry> Host for T {}

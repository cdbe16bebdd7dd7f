//! 内存场景实现

use std::collections::HashSet;
use std::path::Path;

use crate::material::Material;

use super::{
    AssetRegistry, Image, ImageId, MaterialId, Object, ObjectId, ObjectRole, SceneSink,
};

/// 内存中的场景与资源注册表
#[derive(Default)]
pub struct MemoryScene {
    objects: Vec<Option<Object>>,
    linked: HashSet<ObjectId>,
    /// 链接顺序
    collection: Vec<ObjectId>,
    materials: Vec<Material>,
    images: Vec<Image>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前存在的对象数量
    pub fn object_count(&self) -> usize {
        self.objects.iter().flatten().count()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// 已链接对象，按链接顺序
    pub fn collection(&self) -> &[ObjectId] {
        &self.collection
    }

    /// 按角色筛选对象
    pub fn objects_with_role(&self, role: ObjectRole) -> Vec<ObjectId> {
        self.iter_objects()
            .filter(|(_, obj)| obj.role == role)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn find_object(&self, name: &str) -> Option<ObjectId> {
        self.iter_objects()
            .find(|(_, obj)| obj.name == name)
            .map(|(id, _)| id)
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    fn iter_objects(&self) -> impl Iterator<Item = (ObjectId, &Object)> {
        self.objects
            .iter()
            .enumerate()
            .filter_map(|(i, obj)| obj.as_ref().map(|obj| (ObjectId(i), obj)))
    }
}

impl SceneSink for MemoryScene {
    fn add_object(&mut self, object: Object) -> ObjectId {
        self.objects.push(Some(object));
        ObjectId(self.objects.len() - 1)
    }

    fn link_object(&mut self, id: ObjectId) {
        if self.object(id).is_some() && self.linked.insert(id) {
            self.collection.push(id);
        }
    }

    fn is_linked(&self, id: ObjectId) -> bool {
        self.linked.contains(&id)
    }

    fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.0)?.as_ref()
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(id.0)?.as_mut()
    }

    fn remove_object(&mut self, id: ObjectId) -> Option<Object> {
        let removed = self.objects.get_mut(id.0)?.take()?;
        self.linked.remove(&id);
        self.collection.retain(|&linked| linked != id);
        for obj in self.objects.iter_mut().flatten() {
            if obj.parent == Some(id) {
                obj.parent = None;
                obj.parent_bone = None;
            }
        }
        Some(removed)
    }

    fn children(&self, id: ObjectId) -> Vec<ObjectId> {
        self.iter_objects()
            .filter(|(_, obj)| obj.parent == Some(id))
            .map(|(child, _)| child)
            .collect()
    }
}

impl AssetRegistry for MemoryScene {
    fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    fn material_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id.0)
    }

    fn add_image(&mut self, image: Image) -> ImageId {
        self.images.push(image);
        ImageId(self.images.len() - 1)
    }

    fn image(&self, id: ImageId) -> Option<&Image> {
        self.images.get(id.0)
    }

    fn image_mut(&mut self, id: ImageId) -> Option<&mut Image> {
        self.images.get_mut(id.0)
    }

    fn find_image_by_path(&self, path: &Path) -> Option<ImageId> {
        self.images
            .iter()
            .position(|image| image.filepath.as_deref() == Some(path))
            .map(ImageId)
    }

    fn find_image_by_name(&self, name: &str) -> Option<ImageId> {
        self.images
            .iter()
            .position(|image| image.name == name)
            .map(ImageId)
    }
}

//! 场景对象

use std::collections::{BTreeMap, HashMap, HashSet};

use glam::{Mat4, Vec3};

use crate::records::LodLevel;

use super::{Armature, ImageId, LightData, MaterialId, Mesh, ObjectId};

/// 对象在 drawable 层级中的角色
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectRole {
    None,
    Drawable,
    DrawableModel,
    DrawableGeometry,
    Light,
    Bound,
    BoundComposite,
}

impl ObjectRole {
    /// 宿主界面中的显示名
    pub fn ui_name(self) -> &'static str {
        match self {
            ObjectRole::None => "None",
            ObjectRole::Drawable => "Drawable",
            ObjectRole::DrawableModel => "Drawable Model",
            ObjectRole::DrawableGeometry => "Drawable Geometry",
            ObjectRole::Light => "Light",
            ObjectRole::Bound => "Bound",
            ObjectRole::BoundComposite => "Bound Composite",
        }
    }
}

/// 对象数据块
#[derive(Clone, Debug)]
pub enum ObjectData {
    Empty,
    Armature(Armature),
    Mesh(Mesh),
    Light(LightData),
}

/// 骨骼权重组
#[derive(Clone, Debug, Default)]
pub struct VertexGroup {
    pub name: String,
    /// 顶点索引 → 权重
    pub weights: BTreeMap<u32, f32>,
}

impl VertexGroup {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            weights: BTreeMap::new(),
        }
    }

    /// 累加权重
    pub fn add(&mut self, vertex: u32, weight: f32) {
        *self.weights.entry(vertex).or_insert(0.0) += weight;
    }

    pub fn weight(&self, vertex: u32) -> Option<f32> {
        self.weights.get(&vertex).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstraintSpace {
    World,
    Pose,
    Local,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MixMode {
    Replace,
    BeforeFull,
    AfterFull,
}

/// 对象级约束
#[derive(Clone, Debug, PartialEq)]
pub enum ObjectConstraint {
    /// 复制目标骨骼的旋转和平移
    CopyTransforms {
        target: ObjectId,
        subtarget: String,
        mix_mode: MixMode,
        target_space: ConstraintSpace,
        owner_space: ConstraintSpace,
    },
}

/// 修改器
#[derive(Clone, Debug, PartialEq)]
pub enum Modifier {
    /// 骨架变形
    Armature { object: ObjectId },
    /// 按材质的调色板纹理生成顶点色调
    TintPalette {
        material: MaterialId,
        palette: Option<ImageId>,
    },
}

/// drawable 根对象属性
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawableProperties {
    pub lod_dist_high: f32,
    pub lod_dist_med: f32,
    pub lod_dist_low: f32,
    pub lod_dist_vlow: f32,
    pub unknown_9a: u32,
}

/// 模型对象属性
#[derive(Clone, Debug, PartialEq)]
pub struct ModelProperties {
    pub lod: LodLevel,
    pub render_mask: u32,
    pub flags: u32,
    pub unknown_1: u32,
}

/// 场景对象
#[derive(Clone, Debug)]
pub struct Object {
    pub name: String,
    pub data: ObjectData,
    pub role: ObjectRole,
    pub parent: Option<ObjectId>,
    /// 非空时以骨骼为父级
    pub parent_bone: Option<String>,
    /// 局部变换（不含 delta）
    pub matrix_basis: Mat4,
    pub delta_location: Vec3,
    pub empty_display_size: f32,
    /// 通过 [`Object::new_vertex_group`] 添加，以保持名称唯一
    pub vertex_groups: Vec<VertexGroup>,
    pub constraints: Vec<ObjectConstraint>,
    pub modifiers: Vec<Modifier>,
    pub drawable_properties: Option<DrawableProperties>,
    pub model_properties: Option<ModelProperties>,
    group_names: HashSet<String>,
    /// 基础名 → 下一个待尝试的后缀
    group_suffixes: HashMap<String, u32>,
}

impl Object {
    pub fn new(name: &str, data: ObjectData) -> Self {
        Self {
            name: name.to_string(),
            data,
            role: ObjectRole::None,
            parent: None,
            parent_bone: None,
            matrix_basis: Mat4::IDENTITY,
            delta_location: Vec3::ZERO,
            empty_display_size: 1.0,
            vertex_groups: Vec::new(),
            constraints: Vec::new(),
            modifiers: Vec::new(),
            drawable_properties: None,
            model_properties: None,
            group_names: HashSet::new(),
            group_suffixes: HashMap::new(),
        }
    }

    /// 空对象
    pub fn empty(name: &str) -> Self {
        Self::new(name, ObjectData::Empty)
    }

    pub fn location(&self) -> Vec3 {
        self.matrix_basis.w_axis.truncate()
    }

    pub fn set_location(&mut self, location: Vec3) {
        self.matrix_basis.w_axis = location.extend(1.0);
    }

    pub fn armature(&self) -> Option<&Armature> {
        match &self.data {
            ObjectData::Armature(armature) => Some(armature),
            _ => None,
        }
    }

    pub fn armature_mut(&mut self) -> Option<&mut Armature> {
        match &mut self.data {
            ObjectData::Armature(armature) => Some(armature),
            _ => None,
        }
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        match &self.data {
            ObjectData::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn light(&self) -> Option<&LightData> {
        match &self.data {
            ObjectData::Light(light) => Some(light),
            _ => None,
        }
    }

    /// 新建权重组，重名时追加 `.001` 形式的后缀，返回组索引
    pub fn new_vertex_group(&mut self, name: &str) -> usize {
        let unique = self.unique_group_name(name);
        self.group_names.insert(unique.clone());
        self.vertex_groups.push(VertexGroup::new(&unique));
        self.vertex_groups.len() - 1
    }

    pub fn vertex_group(&self, name: &str) -> Option<&VertexGroup> {
        self.vertex_groups.iter().find(|group| group.name == name)
    }

    /// 删除没有任何顶点的权重组，返回删除数量
    pub fn remove_unused_vertex_groups(&mut self) -> usize {
        let before = self.vertex_groups.len();
        let names = &mut self.group_names;
        self.vertex_groups.retain(|group| {
            if group.is_empty() {
                names.remove(&group.name);
                false
            } else {
                true
            }
        });
        before - self.vertex_groups.len()
    }

    fn unique_group_name(&mut self, name: &str) -> String {
        if !self.group_names.contains(name) {
            return name.to_string();
        }
        let suffix = self.group_suffixes.entry(name.to_string()).or_insert(1);
        loop {
            let candidate = format!("{}.{:03}", name, suffix);
            *suffix += 1;
            if !self.group_names.contains(&candidate) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_group_names_are_unique() {
        let mut obj = Object::empty("test");
        obj.new_vertex_group("UNK");
        obj.new_vertex_group("UNK");
        obj.new_vertex_group("UNK");
        let names: Vec<&str> = obj.vertex_groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["UNK", "UNK.001", "UNK.002"]);
    }

    #[test]
    fn test_many_duplicate_group_names() {
        let mut obj = Object::empty("test");
        obj.new_vertex_group("UNK.002");
        for _ in 0..256 {
            obj.new_vertex_group("UNK");
        }
        assert_eq!(obj.vertex_groups.len(), 257);
        assert_eq!(obj.vertex_groups[1].name, "UNK");
        assert_eq!(obj.vertex_groups[2].name, "UNK.001");
        // 已占用的名称被跳过
        assert_eq!(obj.vertex_groups[3].name, "UNK.003");
        assert_eq!(obj.vertex_groups[256].name, "UNK.256");
    }

    #[test]
    fn test_removed_group_name_reusable() {
        let mut obj = Object::empty("test");
        obj.new_vertex_group("spine");
        assert_eq!(obj.remove_unused_vertex_groups(), 1);
        obj.new_vertex_group("spine");
        assert_eq!(obj.vertex_groups[0].name, "spine");
    }

    #[test]
    fn test_remove_unused_vertex_groups() {
        let mut obj = Object::empty("test");
        let a = obj.new_vertex_group("a");
        obj.new_vertex_group("b");
        obj.vertex_groups[a].add(0, 0.5);
        assert_eq!(obj.remove_unused_vertex_groups(), 1);
        assert_eq!(obj.vertex_groups.len(), 1);
        assert_eq!(obj.vertex_groups[0].name, "a");
    }

    #[test]
    fn test_location_round_trip() {
        let mut obj = Object::empty("test");
        obj.set_location(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(obj.location(), Vec3::new(1.0, 2.0, 3.0));
    }
}

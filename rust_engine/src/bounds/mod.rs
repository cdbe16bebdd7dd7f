//! 碰撞边界转换接口
//!
//! 边界的具体几何由独立的边界子系统负责，这里只规定调用约定，
//! 并提供一个只建立对象层级的默认实现。

use crate::records::{Bound, BoundType};
use crate::scene::{Object, ObjectId, ObjectRole, SceneSink};
use crate::Result;

/// 边界转换器
pub trait BoundsConverter {
    /// 将边界转换为场景对象并链接；返回 None 表示该边界没有对应对象
    fn bound_to_obj<S: SceneSink + ?Sized>(
        &self,
        scene: &mut S,
        bound: &Bound,
        label: &str,
    ) -> Result<Option<ObjectId>>;
}

/// 为每个边界创建空对象，组合边界的子边界挂在组合对象下
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderBounds;

impl BoundsConverter for PlaceholderBounds {
    fn bound_to_obj<S: SceneSink + ?Sized>(
        &self,
        scene: &mut S,
        bound: &Bound,
        label: &str,
    ) -> Result<Option<ObjectId>> {
        let mut obj = Object::empty(label);
        obj.role = if bound.bound_type == BoundType::Composite {
            ObjectRole::BoundComposite
        } else {
            ObjectRole::Bound
        };
        let id = scene.add_object(obj);
        scene.link_object(id);

        for child in &bound.children {
            if let Some(child_id) = self.bound_to_obj(scene, child, child.bound_type.ui_name())? {
                scene.set_parent(child_id, id)?;
            }
        }
        Ok(Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MemoryScene;

    #[test]
    fn test_composite_hierarchy() {
        let mut scene = MemoryScene::new();
        let mut composite = Bound::new(BoundType::Composite);
        composite.children.push(Bound::new(BoundType::Box));
        composite.children.push(Bound::new(BoundType::GeometryBvh));

        let id = PlaceholderBounds
            .bound_to_obj(&mut scene, &composite, "Bound Composite")
            .unwrap()
            .unwrap();
        let obj = scene.object(id).unwrap();
        assert_eq!(obj.role, ObjectRole::BoundComposite);
        assert_eq!(obj.name, "Bound Composite");

        let children = scene.children(id);
        assert_eq!(children.len(), 2);
        assert_eq!(scene.object(children[1]).unwrap().name, "Bound GeometryBVH");
        assert!(children.iter().all(|&c| scene.is_linked(c)));
    }
}

//! 合并同一模型下的几何体对象

use glam::{Vec2, Vec4};

use crate::scene::{ColorLayer, Mesh, Object, ObjectData, ObjectId, ObjectRole, SceneSink, UvLayer};
use crate::{DrawableError, Result};

/// 将模型对象下的全部几何体合并为第一个几何体，返回合并后的对象
///
/// 材质槽按 id 去重，UV/颜色图层按序号合并（缺失的通道补零或补白），
/// 权重组按名称合并，修改器去重保留；只有全部几何体都带自定义法线时才保留法线。
pub fn join_drawable_geometries<S: SceneSink + ?Sized>(
    scene: &mut S,
    model: ObjectId,
) -> Result<Option<ObjectId>> {
    let geometries: Vec<ObjectId> = scene
        .children(model)
        .into_iter()
        .filter(|&child| {
            scene
                .object(child)
                .is_some_and(|obj| obj.role == ObjectRole::DrawableGeometry && obj.mesh().is_some())
        })
        .collect();

    let Some((&target, rest)) = geometries.split_first() else {
        return Ok(None);
    };

    let mut parts = Vec::with_capacity(rest.len());
    for &id in rest {
        if let Some(obj) = scene.remove_object(id) {
            parts.push(obj);
        }
    }

    let obj = scene.object_mut(target).ok_or_else(|| {
        DrawableError::Reference(format!("geometry object {:?} vanished", target))
    })?;
    for part in parts {
        merge_object(obj, part);
    }

    log::debug!("joined {} geometries into '{}'", rest.len() + 1, obj.name);
    Ok(Some(target))
}

fn merge_object(target: &mut Object, part: Object) {
    let vertex_offset = match &target.data {
        ObjectData::Mesh(mesh) => mesh.vertex_count() as u32,
        _ => return,
    };

    for group in part.vertex_groups {
        let index = match target.vertex_groups.iter().position(|g| g.name == group.name) {
            Some(index) => index,
            None => target.new_vertex_group(&group.name),
        };
        for (vertex, weight) in group.weights {
            target.vertex_groups[index].add(vertex + vertex_offset, weight);
        }
    }

    for modifier in part.modifiers {
        if !target.modifiers.contains(&modifier) {
            target.modifiers.push(modifier);
        }
    }

    if let (ObjectData::Mesh(mesh), ObjectData::Mesh(other)) = (&mut target.data, part.data) {
        merge_mesh(mesh, other);
    }
}

fn merge_mesh(mesh: &mut Mesh, other: Mesh) {
    let base_loops = mesh.loop_count();
    let other_loops = other.loop_count();
    let vertex_offset = mesh.vertex_count() as u32;

    merge_layers(
        &mut mesh.uv_layers,
        other.uv_layers,
        base_loops,
        other_loops,
        Vec2::ZERO,
        |i, data| UvLayer { name: format!("UVMap {}", i), data },
        |layer| &mut layer.data,
    );
    merge_layers(
        &mut mesh.color_layers,
        other.color_layers,
        base_loops,
        other_loops,
        Vec4::ONE,
        |i, data| ColorLayer { name: format!("Color {}", i), data },
        |layer| &mut layer.data,
    );

    let material_map: Vec<u32> = other
        .materials
        .iter()
        .map(|material| match mesh.materials.iter().position(|m| m == material) {
            Some(slot) => slot as u32,
            None => {
                mesh.materials.push(*material);
                (mesh.materials.len() - 1) as u32
            }
        })
        .collect();

    mesh.custom_normals = match (mesh.custom_normals.take(), other.custom_normals) {
        (Some(mut normals), Some(more)) => {
            normals.extend(more);
            Some(normals)
        }
        _ => None,
    };

    mesh.vertices.extend(other.vertices);
    mesh.faces.extend(
        other
            .faces
            .iter()
            .map(|face| face.map(|v| v + vertex_offset)),
    );
    mesh.face_smooth.extend(other.face_smooth);
    mesh.face_material.extend(
        other
            .face_material
            .iter()
            .map(|&slot| material_map.get(slot as usize).copied().unwrap_or(0)),
    );
}

/// 按序号合并图层，双方缺失的部分用 `fill` 补齐
fn merge_layers<L, T: Copy>(
    layers: &mut Vec<L>,
    others: Vec<L>,
    base_loops: usize,
    other_loops: usize,
    fill: T,
    make: impl Fn(usize, Vec<T>) -> L,
    data: impl Fn(&mut L) -> &mut Vec<T>,
) {
    let count = layers.len().max(others.len());
    let mut others = others.into_iter();
    for i in 0..count {
        if i >= layers.len() {
            layers.push(make(i, vec![fill; base_loops]));
        }
        let extra = match others.next() {
            Some(mut layer) => std::mem::take(data(&mut layer)),
            None => vec![fill; other_loops],
        };
        data(&mut layers[i]).extend(extra);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{MaterialId, MemoryScene};
    use glam::Vec3;

    fn triangle_object(scene: &mut MemoryScene, parent: ObjectId, material: usize, uv: bool) -> ObjectId {
        let mut mesh = Mesh::from_triangles(
            "Drawable Geometry",
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![[0, 1, 2]],
        )
        .unwrap();
        mesh.materials.push(MaterialId(material));
        if uv {
            crate::scene::create_uv_layer(&mut mesh, 0, &[Vec2::ZERO, Vec2::X, Vec2::Y]).unwrap();
        }
        let mut obj = Object::new("geo", ObjectData::Mesh(mesh));
        obj.role = ObjectRole::DrawableGeometry;
        let group = obj.new_vertex_group("root");
        obj.vertex_groups[group].add(0, 1.0);
        let id = scene.add_object(obj);
        scene.set_parent(id, parent).unwrap();
        id
    }

    #[test]
    fn test_join_merges_meshes() {
        let mut scene = MemoryScene::new();
        let model = scene.add_object(Object::empty("model"));
        let first = triangle_object(&mut scene, model, 0, true);
        triangle_object(&mut scene, model, 1, false);
        triangle_object(&mut scene, model, 0, true);

        let joined = join_drawable_geometries(&mut scene, model).unwrap();
        assert_eq!(joined, Some(first));
        assert_eq!(scene.children(model), vec![first]);

        let obj = scene.object(first).unwrap();
        let mesh = obj.mesh().unwrap();
        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(mesh.faces[2], [6, 7, 8]);
        assert_eq!(mesh.materials, vec![MaterialId(0), MaterialId(1)]);
        assert_eq!(mesh.face_material, vec![0, 1, 0]);
        assert_eq!(mesh.uv_layers.len(), 1);
        assert_eq!(mesh.uv_layers[0].data.len(), 9);

        let root = obj.vertex_group("root").unwrap();
        assert_eq!(root.weights.keys().copied().collect::<Vec<_>>(), vec![0, 3, 6]);
    }

    #[test]
    fn test_join_keeps_part_modifiers_once() {
        use crate::scene::{ImageId, Modifier};

        let mut scene = MemoryScene::new();
        let model = scene.add_object(Object::empty("model"));
        let rig = scene.add_object(Object::empty("rig"));
        let first = triangle_object(&mut scene, model, 0, false);
        let second = triangle_object(&mut scene, model, 1, false);
        let armature = Modifier::Armature { object: rig };
        let tint = Modifier::TintPalette {
            material: MaterialId(1),
            palette: Some(ImageId(0)),
        };
        scene.object_mut(first).unwrap().modifiers.push(armature.clone());
        let part = scene.object_mut(second).unwrap();
        part.modifiers.push(armature.clone());
        part.modifiers.push(tint.clone());

        join_drawable_geometries(&mut scene, model).unwrap();
        assert_eq!(scene.object(first).unwrap().modifiers, vec![armature, tint]);
    }

    #[test]
    fn test_join_without_geometries() {
        let mut scene = MemoryScene::new();
        let model = scene.add_object(Object::empty("model"));
        assert_eq!(join_drawable_geometries(&mut scene, model).unwrap(), None);
    }
}

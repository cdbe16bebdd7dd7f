//! 网格对象构建

use crate::records::{BlendData, BoneRecord, Geometry};
use crate::scene::{
    create_color_layer, create_uv_layer, MaterialId, Mesh, Object, ObjectData, ObjectId,
    ObjectRole, SceneSink,
};
use crate::{DrawableError, Result};

use super::buffer::{decompose_vertices, DecomposedBuffer};

/// 权重组槽位下限
pub const MIN_BONE_SLOTS: usize = 256;

/// 几何体构建所需的骨骼上下文
#[derive(Clone, Copy, Debug, Default)]
pub struct BoneContext<'a> {
    /// 骨架骨骼列表，用于命名权重组
    pub bones: Option<&'a [BoneRecord]>,
    /// 几何体局部骨骼索引 → 骨架骨骼索引
    pub bone_ids: &'a [u32],
}

/// 将平铺索引缓冲切分为三角形
pub fn triangulate_indices(indices: &[u32]) -> Result<Vec<[u32; 3]>> {
    if indices.len() % 3 != 0 {
        return Err(DrawableError::Decode(format!(
            "index buffer length {} is not divisible by 3",
            indices.len()
        )));
    }
    Ok(indices
        .chunks_exact(3)
        .map(|tri| [tri[0], tri[1], tri[2]])
        .collect())
}

/// 由几何体记录创建网格对象
pub fn geometry_to_obj<S: SceneSink + ?Sized>(
    scene: &mut S,
    geometry: &Geometry,
    material: MaterialId,
    bones: Option<&[BoneRecord]>,
    name: &str,
) -> Result<ObjectId> {
    let buffer = decompose_vertices(&geometry.vertices)?;
    let faces = triangulate_indices(&geometry.indices)?;
    let context = BoneContext {
        bones,
        bone_ids: &geometry.bone_ids,
    };
    obj_from_buffer(scene, &buffer, faces, material, context, name)
}

/// 由分解后的缓冲创建网格对象并链接到场景
pub fn obj_from_buffer<S: SceneSink + ?Sized>(
    scene: &mut S,
    buffer: &DecomposedBuffer,
    faces: Vec<[u32; 3]>,
    material: MaterialId,
    context: BoneContext<'_>,
    name: &str,
) -> Result<ObjectId> {
    let mut mesh = Mesh::from_triangles(
        ObjectRole::DrawableGeometry.ui_name(),
        buffer.positions.clone(),
        faces,
    )?;

    if buffer.has_normals() {
        mesh.set_custom_normals(buffer.normals.clone())?;
    }

    for (i, (_, coords)) in buffer.texcoords.iter().enumerate() {
        create_uv_layer(&mut mesh, i, coords)?;
    }
    for (i, (_, colors)) in buffer.colors.iter().enumerate() {
        create_color_layer(&mut mesh, i, colors)?;
    }

    mesh.materials.push(material);

    let mut obj = Object::new(name, ObjectData::Mesh(mesh));

    if let Some(blend) = &buffer.blend {
        if !blend.is_empty() {
            for group_name in bone_group_names(context) {
                obj.new_vertex_group(&group_name);
            }
            assign_blend_weights(&mut obj, blend);
            let removed = obj.remove_unused_vertex_groups();
            log::debug!(
                "'{}': {} bone groups kept, {} unused removed",
                name,
                obj.vertex_groups.len(),
                removed
            );
        }
    }

    obj.role = ObjectRole::DrawableGeometry;
    let id = scene.add_object(obj);
    scene.link_object(id);
    Ok(id)
}

/// 每个骨骼槽位的权重组名
///
/// 槽位数为 `max(256, 骨骼数)`；有重映射表时槽位先经过表转换为骨架索引，
/// 超出已命名骨骼范围的 id 以 `UNKNOWN_BONE.<id>.<表末项>` 命名。
pub fn bone_group_names(context: BoneContext<'_>) -> Vec<String> {
    let bones = context.bones.filter(|bones| !bones.is_empty());
    let bone_ids = context.bone_ids;
    let bone_count = bones.map_or(MIN_BONE_SLOTS, <[BoneRecord]>::len);
    let slot_count = bone_count.max(MIN_BONE_SLOTS);

    (0..slot_count)
        .map(|slot| {
            let bone_id = bone_ids.get(slot).map_or(slot, |&id| id as usize);
            match (bones, bone_ids.last()) {
                (Some(bones), _) if bone_id < bone_count => bones[bone_id].name.clone(),
                (_, Some(last)) => format!("UNKNOWN_BONE.{}.{}", bone_id, last),
                _ => "UNK".to_string(),
            }
        })
        .collect()
}

/// 按混合数据累加顶点权重，权重为 0 的项跳过
fn assign_blend_weights(obj: &mut Object, blend: &[BlendData]) {
    for (vertex, data) in blend.iter().enumerate() {
        for (&weight, &index) in data.weights.iter().zip(data.indices.iter()) {
            let weight = weight as f32 / 255.0;
            if weight <= 0.0 {
                continue;
            }
            match obj.vertex_groups.get_mut(index as usize) {
                Some(group) => group.add(vertex as u32, weight),
                None => log::warn!(
                    "blend index {} out of range for '{}' ({} groups)",
                    index,
                    obj.name,
                    obj.vertex_groups.len()
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Vertex;
    use crate::scene::MemoryScene;
    use glam::{Vec2, Vec3};

    fn quad_vertices() -> Vec<Vertex> {
        vec![
            Vertex::new(Vec3::new(0.0, 0.0, 0.0)),
            Vertex::new(Vec3::new(1.0, 0.0, 0.0)),
            Vertex::new(Vec3::new(1.0, 1.0, 0.0)),
            Vertex::new(Vec3::new(0.0, 1.0, 0.0)),
        ]
    }

    fn bones(names: &[&str]) -> Vec<BoneRecord> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| BoneRecord::new(name, i as i32 - 1, i as u32))
            .collect()
    }

    #[test]
    fn test_triangulate_rejects_partial_triangle() {
        assert!(triangulate_indices(&[0, 1, 2, 0]).is_err());
        assert_eq!(triangulate_indices(&[0, 1, 2, 0, 2, 3]).unwrap().len(), 2);
    }

    #[test]
    fn test_face_count_independent_of_normals() {
        let mut scene = MemoryScene::new();
        let plain = Geometry {
            vertices: quad_vertices(),
            indices: vec![0, 1, 2, 0, 2, 3],
            ..Default::default()
        };
        let mut smooth = plain.clone();
        for v in &mut smooth.vertices {
            v.normal = Some(Vec3::Z);
        }

        let a = geometry_to_obj(&mut scene, &plain, MaterialId(0), None, "a").unwrap();
        let b = geometry_to_obj(&mut scene, &smooth, MaterialId(0), None, "b").unwrap();
        let mesh_a = scene.object(a).unwrap().mesh().unwrap();
        let mesh_b = scene.object(b).unwrap().mesh().unwrap();
        assert_eq!(mesh_a.face_count(), 2);
        assert_eq!(mesh_b.face_count(), 2);
        assert!(mesh_a.custom_normals.is_none());
        assert!(mesh_b.face_smooth.iter().all(|&s| s));
    }

    #[test]
    fn test_empty_geometry_not_materialized() {
        let mut scene = MemoryScene::new();
        let empty = Geometry::default();
        let result = geometry_to_obj(&mut scene, &empty, MaterialId(0), None, "empty");
        assert!(matches!(result, Err(DrawableError::Decode(_))));
        assert_eq!(scene.object_count(), 0);
    }

    #[test]
    fn test_layers_created_per_channel() {
        let mut scene = MemoryScene::new();
        let mut geometry = Geometry {
            vertices: quad_vertices(),
            indices: vec![0, 1, 2, 0, 2, 3],
            ..Default::default()
        };
        for v in &mut geometry.vertices {
            v.texcoords.push(("texcoord0".into(), Vec2::ZERO));
            v.texcoords.push(("texcoord1".into(), Vec2::ONE));
            v.colors.push(("colour0".into(), [255, 255, 255, 255]));
        }
        let id = geometry_to_obj(&mut scene, &geometry, MaterialId(3), None, "g").unwrap();
        let obj = scene.object(id).unwrap();
        let mesh = obj.mesh().unwrap();
        assert_eq!(mesh.uv_layers.len(), 2);
        assert_eq!(mesh.color_layers.len(), 1);
        assert_eq!(mesh.materials, vec![MaterialId(3)]);
        assert_eq!(obj.role, ObjectRole::DrawableGeometry);
        assert!(scene.is_linked(id));
    }

    #[test]
    fn test_weights_accumulate_and_unused_groups_removed() {
        let mut scene = MemoryScene::new();
        let skeleton = bones(&["root", "spine", "head"]);
        let mut geometry = Geometry {
            vertices: quad_vertices(),
            indices: vec![0, 1, 2, 0, 2, 3],
            ..Default::default()
        };
        geometry.vertices[0].blend = Some(BlendData {
            weights: [255, 0, 0, 0],
            indices: [1, 0, 0, 0],
        });
        // 同一索引出现两次时权重相加
        geometry.vertices[1].blend = Some(BlendData {
            weights: [51, 51, 153, 0],
            indices: [2, 2, 1, 0],
        });
        geometry.vertices[2].blend = Some(BlendData {
            weights: [255, 0, 0, 0],
            indices: [1, 0, 0, 0],
        });
        geometry.vertices[3].blend = Some(BlendData {
            weights: [255, 0, 0, 0],
            indices: [1, 0, 0, 0],
        });

        let id = geometry_to_obj(&mut scene, &geometry, MaterialId(0), Some(&skeleton), "g")
            .unwrap();
        let obj = scene.object(id).unwrap();

        let names: Vec<&str> = obj.vertex_groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["spine", "head"]);

        let head = obj.vertex_group("head").unwrap();
        assert_eq!(head.weights.len(), 1);
        assert!((head.weight(1).unwrap() - 0.4).abs() < 1e-6);

        let spine = obj.vertex_group("spine").unwrap();
        assert_eq!(spine.weights.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert!((spine.weight(1).unwrap() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_group_names_with_remap_table() {
        let skeleton = bones(&["root", "spine", "head"]);
        let names = bone_group_names(BoneContext {
            bones: Some(&skeleton),
            bone_ids: &[2, 0, 7],
        });
        assert_eq!(names.len(), 256);
        assert_eq!(names[0], "head");
        assert_eq!(names[1], "root");
        assert_eq!(names[2], "UNKNOWN_BONE.7.7");
        // 超出重映射表的槽位按自身索引解析
        assert_eq!(names[3], "UNKNOWN_BONE.3.7");
        assert_eq!(names[255], "UNKNOWN_BONE.255.7");
    }

    #[test]
    fn test_group_names_without_bones() {
        let names = bone_group_names(BoneContext::default());
        assert_eq!(names.len(), 256);
        assert!(names.iter().all(|n| n == "UNK"));

        let many: Vec<BoneRecord> = (0..300).map(|i| BoneRecord::new(&format!("b{}", i), -1, i)).collect();
        let names = bone_group_names(BoneContext {
            bones: Some(&many),
            bone_ids: &[],
        });
        assert_eq!(names.len(), 300);
        assert_eq!(names[299], "b299");
    }
}

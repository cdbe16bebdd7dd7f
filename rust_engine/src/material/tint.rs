//! 调色板着色

use crate::scene::{Host, ImageId, MaterialId, Modifier, Object, ObjectId};
use crate::Result;

/// 几何体的材质带调色板纹理槽时添加色调修改器，返回添加数量
///
/// 需要在几何体链接并设置父级之后调用；没有调色板槽的材质不做任何处理。
pub fn apply_tint_palette<H: Host + ?Sized>(host: &mut H, geometry: ObjectId) -> Result<usize> {
    let Some(materials) = host
        .object(geometry)
        .and_then(Object::mesh)
        .map(|mesh| mesh.materials.clone())
    else {
        return Ok(0);
    };

    let tinted: Vec<(MaterialId, Option<ImageId>)> = materials
        .into_iter()
        .filter_map(|material| {
            let palette = host.material(material)?.graph.tint_palette()?;
            Some((material, palette.image))
        })
        .collect();

    for &(material, palette) in &tinted {
        host.add_modifier(geometry, Modifier::TintPalette { material, palette })?;
    }
    if !tinted.is_empty() {
        log::debug!("geometry {:?}: {} tint palette modifiers", geometry, tinted.len());
    }
    Ok(tinted.len())
}

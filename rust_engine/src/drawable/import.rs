//! 单个 drawable 文件的导入入口

use std::path::Path;

use crate::bounds::BoundsConverter;
use crate::geometry::join_drawable_geometries;
use crate::material::ShaderLibrary;
use crate::records::Drawable;
use crate::scene::{Host, ObjectId, ObjectRole};
use crate::Result;

use super::{drawable_to_obj, DrawableOptions, ImportSettings};

/// drawable XML 文件扩展名
pub const YDR_EXTENSION: &str = ".ydr.xml";

/// 文件名去掉 `.ydr.xml` 后作为对象名
pub fn drawable_name(filepath: &Path) -> String {
    let file_name = filepath
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.strip_suffix(YDR_EXTENSION) {
        Some(stem) => stem.to_string(),
        None => file_name,
    }
}

/// 导入单个已解析的 drawable 文件
pub fn import_ydr<H, L, B>(
    host: &mut H,
    library: &L,
    bounds: &B,
    drawable: &Drawable,
    filepath: &Path,
    settings: &ImportSettings,
) -> Result<ObjectId>
where
    H: Host + ?Sized,
    L: ShaderLibrary + ?Sized,
    B: BoundsConverter,
{
    let name = drawable_name(filepath);
    let root = drawable_to_obj(
        host,
        library,
        bounds,
        drawable,
        filepath,
        &name,
        &DrawableOptions::default(),
    )?;

    if settings.join_geometries {
        for child in host.children(root) {
            if host.object(child).map(|obj| obj.role) == Some(ObjectRole::DrawableModel) {
                join_drawable_geometries(host, child)?;
            }
        }
    }

    log::info!(
        "Imported drawable '{}' from {}",
        name,
        filepath.display()
    );
    Ok(root)
}

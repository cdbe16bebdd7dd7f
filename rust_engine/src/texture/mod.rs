//! 纹理文件定位和加载

mod loader;

pub use loader::{load_image_file, placeholder_image};

use std::path::{Path, PathBuf};

/// 文件名中格式后缀的长度（如 `.ydr.xml`）
pub const FORMAT_SUFFIX_LEN: usize = 8;

/// 纹理文件扩展名
pub const TEXTURE_EXTENSION: &str = "dds";

/// drawable 文件旁的纹理目录：`<dir>/<文件名去掉 8 字符后缀>`
pub fn texture_folder(filepath: &Path) -> PathBuf {
    let dir = filepath.parent().map(Path::to_path_buf).unwrap_or_default();
    let file_name = filepath
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    dir.join(strip_format_suffix(&file_name))
}

/// 去掉文件名末尾的格式后缀
pub fn strip_format_suffix(file_name: &str) -> &str {
    let cut = file_name.len().saturating_sub(FORMAT_SUFFIX_LEN);
    // 按字符边界截断，避免多字节文件名越界
    match file_name.char_indices().map(|(i, _)| i).find(|&i| i >= cut) {
        Some(end) => &file_name[..end],
        None => file_name,
    }
}

/// 纹理在纹理目录中的路径
pub fn texture_path(folder: &Path, texture_name: &str) -> PathBuf {
    folder.join(format!("{}.{}", texture_name, TEXTURE_EXTENSION))
}

/// 非内嵌纹理的外部引用路径（相对于工程文件）
pub fn external_reference(texture_name: &str) -> PathBuf {
    PathBuf::from(format!("//{}.{}", texture_name, TEXTURE_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_folder() {
        let folder = texture_folder(Path::new("/assets/cars/adder.ydr.xml"));
        assert_eq!(folder, PathBuf::from("/assets/cars/adder"));
    }

    #[test]
    fn test_strip_short_name() {
        assert_eq!(strip_format_suffix("a.xml"), "");
        assert_eq!(strip_format_suffix("prop_bin.ydr.xml"), "prop_bin");
    }

    #[test]
    fn test_texture_path() {
        let path = texture_path(Path::new("/assets/adder"), "adder_badges");
        assert_eq!(path, PathBuf::from("/assets/adder/adder_badges.dds"));
    }
}

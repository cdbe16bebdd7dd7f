//! 纹理图像加载
//!
//! 只读取图像尺寸，像素数据由宿主按需加载。

use std::path::Path;

use crate::scene::Image;
use crate::{DrawableError, Result};

/// 从文件注册图像
///
/// 文件必须存在；无法解码（如块压缩格式不受支持）时仍然注册，尺寸记为 0。
pub fn load_image_file(path: &Path) -> Result<Image> {
    if !path.is_file() {
        return Err(DrawableError::Texture(format!(
            "texture file not found: {}",
            path.display()
        )));
    }

    let (width, height) = match image::image_dimensions(path) {
        Ok(dimensions) => dimensions,
        Err(e) => {
            log::warn!("Failed to read texture {}: {}", path.display(), e);
            (0, 0)
        }
    };

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Image::from_file(&name, path.to_path_buf(), width, height))
}

/// 缺失纹理时使用的占位图像
pub fn placeholder_image(name: &str, size: u32) -> Image {
    Image::generated(name, size, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ImageSource;

    #[test]
    fn test_missing_file_is_error() {
        let result = load_image_file(Path::new("/nonexistent/texture.dds"));
        assert!(matches!(result, Err(DrawableError::Texture(_))));
    }

    #[test]
    fn test_undecodable_file_registered_with_zero_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.dds");
        std::fs::write(&path, b"not a texture").unwrap();

        let image = load_image_file(&path).unwrap();
        assert_eq!(image.name, "broken.dds");
        assert_eq!(image.source, ImageSource::File);
        assert_eq!(image.filepath.as_deref(), Some(path.as_path()));
        assert_eq!((image.width, image.height), (0, 0));
    }

    #[test]
    fn test_placeholder_size() {
        let image = placeholder_image("missing", 512);
        assert_eq!((image.width, image.height), (512, 512));
        assert_eq!(image.source, ImageSource::Generated);
    }
}

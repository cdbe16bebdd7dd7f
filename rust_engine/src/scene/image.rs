//! 图像数据块

use std::path::PathBuf;

use image::RgbaImage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// 宿主内生成
    Generated,
    /// 外部文件
    File,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorSpace {
    Srgb,
    /// 线性数据（法线贴图等）
    NonColor,
}

#[derive(Clone, Debug)]
pub struct Image {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub source: ImageSource,
    pub filepath: Option<PathBuf>,
    pub colorspace: ColorSpace,
    /// 生成图像的像素
    pub pixels: Option<RgbaImage>,
}

impl Image {
    /// 生成空白图像
    pub fn generated(name: &str, width: u32, height: u32) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
            source: ImageSource::Generated,
            filepath: None,
            colorspace: ColorSpace::Srgb,
            pixels: Some(RgbaImage::new(width, height)),
        }
    }

    /// 外部文件引用
    pub fn from_file(name: &str, path: PathBuf, width: u32, height: u32) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
            source: ImageSource::File,
            filepath: Some(path),
            colorspace: ColorSpace::Srgb,
            pixels: None,
        }
    }
}

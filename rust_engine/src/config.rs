//! 导入偏好设置
//!
//! 全局偏好对应宿主插件的用户设置，所有导入调用共享；
//! 单次导入的选项见 [`crate::drawable::ImportSettings`]。

use once_cell::sync::Lazy;
use std::sync::RwLock;

/// 灯光强度换算系数（源格式与宿主光度模型的单位差异）
pub const LIGHT_INTENSITY_FACTOR: f32 = 500.0;

/// 占位纹理的默认边长
pub const DEFAULT_PLACEHOLDER_SIZE: u32 = 512;

/// 导入偏好（扁平化，不嵌套）
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// 是否将灯光强度乘以 [`LIGHT_INTENSITY_FACTOR`]，默认 false
    pub scale_light_intensity: bool,
    /// 找不到纹理文件时创建的占位图像边长，默认 512
    pub placeholder_texture_size: u32,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            scale_light_intensity: false,
            placeholder_texture_size: DEFAULT_PLACEHOLDER_SIZE,
        }
    }
}

impl ImportConfig {
    /// 当前设置下的灯光强度系数
    pub fn light_intensity_factor(&self) -> f32 {
        if self.scale_light_intensity {
            LIGHT_INTENSITY_FACTOR
        } else {
            1.0
        }
    }
}

/// 全局配置实例
static IMPORT_CONFIG: Lazy<RwLock<ImportConfig>> =
    Lazy::new(|| RwLock::new(ImportConfig::default()));

/// 获取当前配置（只读副本）
pub fn get_config() -> ImportConfig {
    IMPORT_CONFIG
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// 设置配置
pub fn set_config(config: ImportConfig) {
    *IMPORT_CONFIG
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner()) = config;
}

/// 重置为默认配置
pub fn reset_config() {
    set_config(ImportConfig::default());
}

//! 灯光构建

mod builder;

pub use builder::{create_lights, light_to_obj, LIGHTS_GROUP_NAME};

use crate::scene::LightKind;
use crate::{DrawableError, Result};

/// 记录中的灯光类型
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightType {
    Point,
    Spot,
    Capsule,
}

impl LightType {
    /// 解析类型字符串，其他值返回 `UnsupportedEnum`
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "Point" => Ok(LightType::Point),
            "Spot" => Ok(LightType::Spot),
            "Capsule" => Ok(LightType::Capsule),
            other => Err(DrawableError::UnsupportedEnum(format!(
                "invalid light type '{}'",
                other
            ))),
        }
    }

    pub fn ui_name(self) -> &'static str {
        match self {
            LightType::Point => "Point Light",
            LightType::Spot => "Spot Light",
            LightType::Capsule => "Capsule Light",
        }
    }

    pub fn kind(self) -> LightKind {
        match self {
            LightType::Point => LightKind::Point,
            LightType::Spot => LightKind::Spot,
            LightType::Capsule => LightKind::Capsule,
        }
    }
}

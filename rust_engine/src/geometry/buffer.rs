//! 交错顶点缓冲分解

use glam::{Vec2, Vec3};

use crate::records::{BlendData, Vertex};
use crate::{DrawableError, Result};

/// 按首次出现顺序排列的具名通道
#[derive(Clone, Debug)]
pub struct ChannelMap<T> {
    channels: Vec<(String, Vec<T>)>,
}

impl<T> Default for ChannelMap<T> {
    fn default() -> Self {
        Self {
            channels: Vec::new(),
        }
    }
}

impl<T> ChannelMap<T> {
    fn push(&mut self, name: &str, value: T) {
        match self.channels.iter_mut().find(|(channel, _)| channel == name) {
            Some((_, values)) => values.push(value),
            None => self.channels.push((name.to_string(), vec![value])),
        }
    }

    /// 通道数量
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&[T]> {
        self.channels
            .iter()
            .find(|(channel, _)| channel == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.channels
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    fn check_lengths(&self, kind: &str, expected: usize) -> Result<()> {
        for (name, values) in &self.channels {
            if values.len() != expected {
                return Err(DrawableError::Decode(format!(
                    "{} channel '{}' has {} values for {} vertices",
                    kind,
                    name,
                    values.len(),
                    expected
                )));
            }
        }
        Ok(())
    }
}

/// 分解后的顶点属性
#[derive(Clone, Debug, Default)]
pub struct DecomposedBuffer {
    pub positions: Vec<Vec3>,
    /// 没有法线时为空
    pub normals: Vec<Vec3>,
    pub texcoords: ChannelMap<Vec2>,
    pub colors: ChannelMap<[u8; 4]>,
    /// 顶点带混合数据时为 Some
    pub blend: Option<Vec<BlendData>>,
}

impl DecomposedBuffer {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }
}

/// 将交错顶点拆分为独立通道
///
/// 法线、混合数据或某个具名通道只出现在部分顶点上时视为结构错误。
pub fn decompose_vertices(vertices: &[Vertex]) -> Result<DecomposedBuffer> {
    let vertex_count = vertices.len();
    let mut buffer = DecomposedBuffer {
        positions: Vec::with_capacity(vertex_count),
        ..Default::default()
    };
    let has_blend = vertices.iter().any(|v| v.blend.is_some());
    let mut blend = Vec::with_capacity(if has_blend { vertex_count } else { 0 });

    for vertex in vertices {
        buffer.positions.push(vertex.position);
        if let Some(normal) = vertex.normal {
            buffer.normals.push(normal);
        }
        for (channel, uv) in &vertex.texcoords {
            buffer.texcoords.push(channel, *uv);
        }
        for (channel, color) in &vertex.colors {
            buffer.colors.push(channel, *color);
        }
        if has_blend {
            if let Some(data) = vertex.blend {
                blend.push(data);
            }
        }
    }

    if !buffer.normals.is_empty() && buffer.normals.len() != vertex_count {
        return Err(DrawableError::Decode(format!(
            "{} of {} vertices carry a normal",
            buffer.normals.len(),
            vertex_count
        )));
    }
    if has_blend && blend.len() != vertex_count {
        return Err(DrawableError::Decode(format!(
            "{} of {} vertices carry blend data",
            blend.len(),
            vertex_count
        )));
    }
    buffer.texcoords.check_lengths("texcoord", vertex_count)?;
    buffer.colors.check_lengths("colour", vertex_count)?;

    if has_blend {
        buffer.blend = Some(blend);
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_keep_first_seen_order() {
        let vertices = vec![
            Vertex::new(Vec3::ZERO)
                .with_texcoord("texcoord1", Vec2::new(0.5, 0.5))
                .with_texcoord("texcoord0", Vec2::ZERO),
            Vertex::new(Vec3::X)
                .with_texcoord("texcoord1", Vec2::ONE)
                .with_texcoord("texcoord0", Vec2::ONE),
        ];
        let buffer = decompose_vertices(&vertices).unwrap();
        let names: Vec<&str> = buffer.texcoords.names().collect();
        assert_eq!(names, vec!["texcoord1", "texcoord0"]);
        assert_eq!(buffer.texcoords.get("texcoord0").unwrap()[1], Vec2::ONE);
        assert!(!buffer.has_normals());
        assert!(buffer.blend.is_none());
    }

    #[test]
    fn test_normals_and_blend() {
        let vertices = vec![
            Vertex::new(Vec3::ZERO)
                .with_normal(Vec3::Z)
                .with_blend([255, 0, 0, 0], [1, 0, 0, 0]),
            Vertex::new(Vec3::Y)
                .with_normal(Vec3::Z)
                .with_blend([128, 127, 0, 0], [0, 1, 0, 0]),
        ];
        let buffer = decompose_vertices(&vertices).unwrap();
        assert_eq!(buffer.normals.len(), 2);
        assert_eq!(buffer.blend.as_ref().unwrap()[1].weights, [128, 127, 0, 0]);
    }

    #[test]
    fn test_partial_normals_rejected() {
        let vertices = vec![
            Vertex::new(Vec3::ZERO).with_normal(Vec3::Z),
            Vertex::new(Vec3::X),
        ];
        assert!(matches!(
            decompose_vertices(&vertices),
            Err(DrawableError::Decode(_))
        ));
    }

    #[test]
    fn test_partial_blend_rejected() {
        let weights = [255, 0, 0, 0];
        let vertices = vec![
            Vertex::new(Vec3::ZERO),
            Vertex::new(Vec3::X).with_blend(weights, [0; 4]),
            Vertex::new(Vec3::Y).with_blend(weights, [0; 4]),
        ];
        assert!(matches!(
            decompose_vertices(&vertices),
            Err(DrawableError::Decode(_))
        ));

        let mut trailing = vertices;
        trailing.rotate_left(1);
        assert!(decompose_vertices(&trailing).is_err());
    }

    #[test]
    fn test_ragged_colour_channel_rejected() {
        let vertices = vec![
            Vertex::new(Vec3::ZERO).with_color("colour0", [255; 4]),
            Vertex::new(Vec3::X),
        ];
        assert!(matches!(
            decompose_vertices(&vertices),
            Err(DrawableError::Decode(_))
        ));
    }
}

//! 顶点缓冲分解和网格构建

mod buffer;
mod join;
mod mesh_builder;

pub use buffer::{decompose_vertices, ChannelMap, DecomposedBuffer};
pub use join::join_drawable_geometries;
pub use mesh_builder::{
    bone_group_names, geometry_to_obj, obj_from_buffer, triangulate_indices, BoneContext,
    MIN_BONE_SLOTS,
};

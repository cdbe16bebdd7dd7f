//! 骨架重建和旋转限制

mod builder;
mod limits;

pub use builder::{bone_local_matrix, skeleton_to_obj, SkeletonBuilder, BONE_TAIL_POS};
pub use limits::{build_tag_bone_map, rotation_limits_to_obj};

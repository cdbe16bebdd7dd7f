//! 碰撞边界记录（具体转换由边界子系统负责）

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundType {
    Composite,
    Box,
    Sphere,
    Capsule,
    Cylinder,
    Disc,
    Cloth,
    Geometry,
    GeometryBvh,
}

impl BoundType {
    /// 宿主界面中的显示名
    pub fn ui_name(self) -> &'static str {
        match self {
            BoundType::Composite => "Bound Composite",
            BoundType::Box => "Bound Box",
            BoundType::Sphere => "Bound Sphere",
            BoundType::Capsule => "Bound Capsule",
            BoundType::Cylinder => "Bound Cylinder",
            BoundType::Disc => "Bound Disc",
            BoundType::Cloth => "Bound Cloth",
            BoundType::Geometry => "Bound Geometry",
            BoundType::GeometryBvh => "Bound GeometryBVH",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Bound {
    pub bound_type: BoundType,
    pub children: Vec<Bound>,
}

impl Bound {
    pub fn new(bound_type: BoundType) -> Self {
        Self {
            bound_type,
            children: Vec::new(),
        }
    }
}

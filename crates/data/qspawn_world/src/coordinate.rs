use serde::{Deserialize, Serialize};

/// 方块坐标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// 上方一格,超出 i32 范围时为 None
    pub const fn above(self) -> Option<Self> {
        match self.y.checked_add(1) {
            Some(y) => Some(Self::new(self.x, y, self.z)),
            None => None,
        }
    }

    pub const fn below(self) -> Option<Self> {
        match self.y.checked_sub(1) {
            Some(y) => Some(Self::new(self.x, y, self.z)),
            None => None,
        }
    }

    /// 方块中心(传送用),y 保持不变
    pub fn block_center(self) -> (f64, f64, f64) {
        (self.x as f64 + 0.5, self.y as f64, self.z as f64 + 0.5)
    }

    /// 水平切比雪夫距离,与候选点的正方形几何一致
    pub fn horizontal_distance(self, other: Coordinate) -> i32 {
        let dx = (self.x as i64 - other.x as i64).abs();
        let dz = (self.z as i64 - other.z as i64).abs();
        dx.max(dz).min(i32::MAX as i64) as i32
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.z)
    }
}

impl From<[i32; 3]> for Coordinate {
    fn from(v: [i32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

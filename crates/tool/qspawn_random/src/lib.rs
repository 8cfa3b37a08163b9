use serde::{Deserialize, Serialize};

pub mod pos;

/// 候选点的几何形状
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpawnArea {
    /// 外层正方形减去中心边长为 2*min 的禁区
    #[default]
    Annulus,
    /// 整个外层正方形,忽略最小距离
    Square,
}

impl std::fmt::Display for SpawnArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpawnArea::Annulus => write!(f, "annulus"),
            SpawnArea::Square => write!(f, "square"),
        }
    }
}

use qspawn_config::app::qspawn_random_spawn::SearchConfig;
use qspawn_random::pos::candidate_column;
use rand::Rng;

use crate::{
    Coordinate, WorldAccess,
    safety::{SafetyFilter, Verdict, check_column},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Coordinate),
    NotFound,
}

impl SearchOutcome {
    pub fn found(self) -> Option<Coordinate> {
        match self {
            SearchOutcome::Found(pos) => Some(pos),
            SearchOutcome::NotFound => None,
        }
    }

    pub fn is_found(self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }
}

/// 在 center 周围最多尝试 `max_attempts` 次,返回第一个安全位置
///
/// 读取世界失败的候选点同样消耗一次尝试。
pub fn search<W, R>(
    world: &W,
    center: Coordinate,
    config: &SearchConfig,
    rng: &mut R,
) -> SearchOutcome
where
    W: WorldAccess + ?Sized,
    R: Rng + ?Sized,
{
    let filter = SafetyFilter::from_config(config);
    for attempt in 1..=config.max_attempts {
        let (x, z) = candidate_column(
            rng,
            config.area,
            (center.x, center.z),
            config.min_distance,
            config.max_distance,
        );
        match check_column(world, x, z, &filter) {
            Ok(Verdict::Safe(pos)) => {
                log::debug!(
                    "[随机出生点] 第 {} 次尝试找到安全位置 ({})",
                    attempt,
                    pos
                );
                return SearchOutcome::Found(pos);
            }
            Ok(Verdict::Rejected(reason)) => {
                log::debug!("[随机出生点] 候选点 ({}, {}) 被拒绝: {}", x, z, reason);
            }
            Err(e) => {
                log::debug!("[随机出生点] 候选点 ({}, {}) 读取失败,跳过: {}", x, z, e);
            }
        }
    }
    log::debug!(
        "[随机出生点] {} 次尝试均未找到安全位置,中心 ({})",
        config.max_attempts,
        center
    );
    SearchOutcome::NotFound
}

use std::collections::HashSet;

use qspawn_config::{SEA_LEVEL_THRESHOLD, app::qspawn_random_spawn::SearchConfig};

use crate::{Coordinate, WorldAccess};

/// 单列检查的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// 可以出生,坐标为玩家脚的位置
    Safe(Coordinate),
    Rejected(Rejection),
}

/// 拒绝原因,按检查顺序排列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    OutsideBorder,
    BelowSeaLevel,
    BiomeDisallowed,
    NoFooting,
    BlockBlacklisted,
    Obstructed,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Rejection::OutsideBorder => "超出世界边界",
            Rejection::BelowSeaLevel => "低于海平面",
            Rejection::BiomeDisallowed => "群系不允许",
            Rejection::NoFooting => "脚下是空气",
            Rejection::BlockBlacklisted => "脚下方块在黑名单中",
            Rejection::Obstructed => "没有两格站立空间",
        };
        f.write_str(text)
    }
}

/// 群系/方块黑名单,从配置构建一次后在整个搜索中复用
#[derive(Debug, Clone, Default)]
pub struct SafetyFilter {
    biome_blacklist: HashSet<String>,
    block_blacklist: HashSet<String>,
}

impl SafetyFilter {
    pub fn new<B, K>(biomes: B, blocks: K) -> Self
    where
        B: IntoIterator,
        B::Item: Into<String>,
        K: IntoIterator,
        K::Item: Into<String>,
    {
        Self {
            biome_blacklist: biomes.into_iter().map(Into::into).collect(),
            block_blacklist: blocks.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(
            config.biome_blacklist.iter().cloned(),
            config.block_blacklist.iter().cloned(),
        )
    }

    pub fn biome_allowed(&self, biome_id: &str) -> bool {
        !is_water_biome(biome_id) && !self.biome_blacklist.contains(biome_id)
    }

    pub fn block_allowed(&self, block_id: &str) -> bool {
        !self.block_blacklist.contains(block_id)
    }
}

/// 海洋/河流类群系始终禁止,包括模组群系(按名称后缀判断)
pub fn is_water_biome(biome_id: &str) -> bool {
    let path = biome_id.rsplit(':').next().unwrap_or(biome_id);
    path.ends_with("ocean") || path.ends_with("river")
}

/// 检查 (x, z) 这一列能否出生
///
/// 只读,不修改世界。读取失败以错误返回,由调用方决定是否跳过。
pub fn check_column<W: WorldAccess + ?Sized>(
    world: &W,
    x: i32,
    z: i32,
    filter: &SafetyFilter,
) -> anyhow::Result<Verdict> {
    world.ensure_column_loaded(x, z)?;
    let surface = world.surface_height(x, z)?;
    let feet = Coordinate::new(x, surface, z);
    let (Some(ground), Some(head)) = (feet.below(), feet.above()) else {
        anyhow::bail!("({}, {}) 的地表高度 {} 超出范围", x, z, surface);
    };

    if !world.world_border_contains(ground) {
        return Ok(Verdict::Rejected(Rejection::OutsideBorder));
    }
    if feet.y <= SEA_LEVEL_THRESHOLD {
        return Ok(Verdict::Rejected(Rejection::BelowSeaLevel));
    }
    let biome = world.biome_id_at(ground)?;
    if !filter.biome_allowed(&biome) {
        return Ok(Verdict::Rejected(Rejection::BiomeDisallowed));
    }
    if world.is_air(ground)? {
        return Ok(Verdict::Rejected(Rejection::NoFooting));
    }
    let block = world.block_id_at(ground)?;
    if !filter.block_allowed(&block) {
        return Ok(Verdict::Rejected(Rejection::BlockBlacklisted));
    }
    if !world.is_air(feet)? || !world.is_air(head)? {
        return Ok(Verdict::Rejected(Rejection::Obstructed));
    }
    Ok(Verdict::Safe(feet))
}

/// [`check_column`] 的简化版本,读取失败视为不安全
pub fn is_safe<W: WorldAccess + ?Sized>(
    world: &W,
    x: i32,
    z: i32,
    filter: &SafetyFilter,
) -> Option<Coordinate> {
    match check_column(world, x, z, filter) {
        Ok(Verdict::Safe(pos)) => Some(pos),
        Ok(Verdict::Rejected(_)) => None,
        Err(e) => {
            log::debug!("[随机出生点] 读取 ({}, {}) 失败: {}", x, z, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_biomes() {
        assert!(is_water_biome("minecraft:ocean"));
        assert!(is_water_biome("minecraft:deep_lukewarm_ocean"));
        assert!(is_water_biome("minecraft:frozen_river"));
        assert!(is_water_biome("river"));
        assert!(is_water_biome("biomesoplenty:dead_river"));
        assert!(!is_water_biome("minecraft:plains"));
        assert!(!is_water_biome("minecraft:beach"));
    }

    #[test]
    fn test_filter() {
        let filter = SafetyFilter::new(["minecraft:desert"], ["minecraft:lava"]);
        assert!(filter.biome_allowed("minecraft:plains"));
        assert!(!filter.biome_allowed("minecraft:desert"));
        assert!(!filter.biome_allowed("minecraft:ocean"));
        assert!(filter.block_allowed("minecraft:grass_block"));
        assert!(!filter.block_allowed("minecraft:lava"));
    }

    #[test]
    fn test_filter_from_default_config() {
        let filter = SafetyFilter::from_config(&SearchConfig::default());
        assert!(!filter.block_allowed("minecraft:magma_block"));
        assert!(filter.biome_allowed("minecraft:forest"));
    }
}

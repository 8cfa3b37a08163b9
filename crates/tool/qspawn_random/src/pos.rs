use rand::Rng;

use crate::SpawnArea;

/// 生成一个相对中心点的水平偏移 (dx, dz)
///
/// 两个轴都在 `[-max_distance, max_distance]` 内均匀取值。
/// `Annulus` 下若两个轴都落在禁区内(`|d| < min_distance`)则重新抽取,
/// 只要 `min_distance <= max_distance` 就一定能结束。
pub fn candidate_offset<R: Rng + ?Sized>(
    rng: &mut R,
    area: SpawnArea,
    min_distance: i32,
    max_distance: i32,
) -> (i32, i32) {
    let max_distance = max_distance.max(0);
    // 禁区不能比外圈大,否则会死循环
    let min_distance = min_distance.clamp(0, max_distance);
    loop {
        let dx = rng.gen_range(-max_distance..=max_distance);
        let dz = rng.gen_range(-max_distance..=max_distance);
        match area {
            SpawnArea::Square => return (dx, dz),
            SpawnArea::Annulus => {
                if dx.abs() >= min_distance || dz.abs() >= min_distance {
                    return (dx, dz);
                }
            }
        }
    }
}

/// 以 (center_x, center_z) 为中心生成候选列坐标
pub fn candidate_column<R: Rng + ?Sized>(
    rng: &mut R,
    area: SpawnArea,
    center: (i32, i32),
    min_distance: i32,
    max_distance: i32,
) -> (i32, i32) {
    let (dx, dz) = candidate_offset(rng, area, min_distance, max_distance);
    (center.0.saturating_add(dx), center.1.saturating_add(dz))
}

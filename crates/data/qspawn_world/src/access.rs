use crate::Coordinate;

/// 宿主提供的世界只读接口
///
/// 搜索在后台线程调用这些方法,实现方需要保证跨线程读取是安全的
/// (例如只读快照或内部加锁)。任何读取失败都只会让当前候选点作废。
pub trait WorldAccess: Send + Sync {
    /// 确保 (x, z) 所在区块已加载,可能阻塞
    fn ensure_column_loaded(&self, x: i32, z: i32) -> anyhow::Result<()>;

    /// 最高的阻挡移动且不是树叶的方块之上的第一个 y
    fn surface_height(&self, x: i32, z: i32) -> anyhow::Result<i32>;

    fn biome_id_at(&self, pos: Coordinate) -> anyhow::Result<String>;

    fn block_id_at(&self, pos: Coordinate) -> anyhow::Result<String>;

    fn is_air(&self, pos: Coordinate) -> anyhow::Result<bool>;

    fn world_border_contains(&self, pos: Coordinate) -> bool;

    fn default_spawn(&self) -> Coordinate;
}

pub const MC_VERSION: &'static str = "1.21.8"; // Minecraft游戏版本
pub const QSPAWN_VERSION: &'static str = "0.1.0a"; // 插件版本
const fn make_qspawn_name() -> &'static str {
    "QSpawn 0.1.0a"
}
pub const QSPAWN_NAME: &'static str = make_qspawn_name();
// 脚下方块的高度必须大于该值(大致为海平面)
pub const SEA_LEVEL_THRESHOLD: i32 = 63;
pub mod app;
pub mod error;
pub mod tool;

use qspawn_world::Coordinate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::SpawnMessage;

/// 游戏模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Survival,
    Creative,
    Adventure,
    Spectator,
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameMode::Survival => "survival",
            GameMode::Creative => "creative",
            GameMode::Adventure => "adventure",
            GameMode::Spectator => "spectator",
        };
        f.write_str(name)
    }
}

/// 宿主提供的玩家接口
///
/// 只允许在主线程调用,所有修改都来自主线程任务队列。
pub trait PlayerAccess: 'static {
    fn is_connected(&self, player: &Uuid) -> bool;
    fn display_name(&self, player: &Uuid) -> Option<String>;
    /// 按名称查找在线玩家
    fn find_player(&self, name: &str) -> Option<Uuid>;
    /// 0~4,与原版 op 等级一致
    fn permission_level(&self, player: &Uuid) -> u8;
    fn game_mode(&self, player: &Uuid) -> Option<GameMode>;
    fn set_game_mode(&mut self, player: &Uuid, mode: GameMode);
    /// 搜索期间的黑暗效果
    fn set_search_effect(&mut self, player: &Uuid, enabled: bool);
    fn teleport(&mut self, player: &Uuid, x: f64, y: f64, z: f64);
    fn send_message(&mut self, player: &Uuid, message: &SpawnMessage);
    /// 床或重生锚
    fn respawn_anchor(&self, player: &Uuid) -> Option<Coordinate>;

    /// 用于日志和提示,不在线时退回 uuid
    fn name_or_uuid(&self, player: &Uuid) -> String {
        self.display_name(player)
            .unwrap_or_else(|| player.to_string())
    }
}

/// 指令来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSource {
    Console,
    Player(Uuid),
}

impl CommandSource {
    pub const CONSOLE_PERMISSION_LEVEL: u8 = 4;

    pub fn player(&self) -> Option<Uuid> {
        match self {
            CommandSource::Console => None,
            CommandSource::Player(uuid) => Some(*uuid),
        }
    }

    pub fn permission_level<P: PlayerAccess + ?Sized>(&self, host: &P) -> u8 {
        match self {
            CommandSource::Console => Self::CONSOLE_PERMISSION_LEVEL,
            CommandSource::Player(uuid) => host.permission_level(uuid),
        }
    }

    /// 向指令来源反馈消息
    pub fn reply<P: PlayerAccess + ?Sized>(&self, host: &mut P, message: &SpawnMessage) {
        match self {
            CommandSource::Console => {
                // 控制台：使用日志输出
                let text = strip_format_codes(&message.text());
                for line in text.split('\n') {
                    if line.trim().is_empty() {
                        continue;
                    }
                    if message.is_failure() {
                        log::warn!("{}", line);
                    } else {
                        log::info!("{}", line);
                    }
                }
            }
            CommandSource::Player(uuid) => {
                if host.is_connected(uuid) {
                    host.send_message(uuid, message);
                }
            }
        }
    }
}

/// 去除Minecraft格式代码（§符号及其后的字符）
pub fn strip_format_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '§' {
            chars.next();
        } else {
            result.push(c);
        }
    }
    result
}

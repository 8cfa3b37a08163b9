use std::collections::HashMap;

use qspawn_spawn::{
    message::SpawnMessage,
    player::{GameMode, PlayerAccess, strip_format_codes},
};
use qspawn_world::Coordinate;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct DemoPlayer {
    pub name: String,
    pub op_level: u8,
    pub mode: GameMode,
    pub darkness: bool,
    pub pos: (f64, f64, f64),
    pub bed: Option<Coordinate>,
}

/// 控制台演示用的玩家表,只在主线程访问
#[derive(Debug, Default)]
pub struct DemoHost {
    players: HashMap<Uuid, DemoPlayer>,
}

impl DemoHost {
    /// 离线模式 uuid,同名玩家重进保持不变
    pub fn offline_uuid(name: &str) -> Uuid {
        Uuid::new_v3(&Uuid::NAMESPACE_OID, format!("OfflinePlayer:{}", name).as_bytes())
    }

    pub fn join(&mut self, name: &str, op_level: u8, spawn: Coordinate) -> Uuid {
        let uuid = Self::offline_uuid(name);
        let (x, y, z) = spawn.block_center();
        self.players.insert(
            uuid,
            DemoPlayer {
                name: name.to_string(),
                op_level,
                mode: GameMode::Survival,
                darkness: false,
                pos: (x, y, z),
                bed: None,
            },
        );
        uuid
    }

    pub fn leave(&mut self, name: &str) -> Option<DemoPlayer> {
        let uuid = self.find_player(name)?;
        self.players.remove(&uuid)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut DemoPlayer> {
        let uuid = self.find_player(name)?;
        self.players.get_mut(&uuid)
    }

    pub fn players(&self) -> impl Iterator<Item = (&Uuid, &DemoPlayer)> {
        self.players.iter()
    }
}

impl PlayerAccess for DemoHost {
    fn is_connected(&self, player: &Uuid) -> bool {
        self.players.contains_key(player)
    }

    fn display_name(&self, player: &Uuid) -> Option<String> {
        self.players.get(player).map(|p| p.name.clone())
    }

    fn find_player(&self, name: &str) -> Option<Uuid> {
        self.players
            .iter()
            .find(|(_, p)| p.name.eq_ignore_ascii_case(name))
            .map(|(uuid, _)| *uuid)
    }

    fn permission_level(&self, player: &Uuid) -> u8 {
        self.players.get(player).map(|p| p.op_level).unwrap_or(0)
    }

    fn game_mode(&self, player: &Uuid) -> Option<GameMode> {
        self.players.get(player).map(|p| p.mode)
    }

    fn set_game_mode(&mut self, player: &Uuid, mode: GameMode) {
        if let Some(p) = self.players.get_mut(player) {
            log::debug!("[玩家] {} 游戏模式 {} -> {}", p.name, p.mode, mode);
            p.mode = mode;
        }
    }

    fn set_search_effect(&mut self, player: &Uuid, enabled: bool) {
        if let Some(p) = self.players.get_mut(player) {
            p.darkness = enabled;
        }
    }

    fn teleport(&mut self, player: &Uuid, x: f64, y: f64, z: f64) {
        if let Some(p) = self.players.get_mut(player) {
            log::info!("[玩家] {} 传送到 ({:.1}, {:.1}, {:.1})", p.name, x, y, z);
            p.pos = (x, y, z);
        }
    }

    fn send_message(&mut self, player: &Uuid, message: &SpawnMessage) {
        if let Some(p) = self.players.get(player) {
            for line in strip_format_codes(&message.text()).split('\n') {
                log::info!("[聊天] -> {}: {}", p.name, line);
            }
        }
    }

    fn respawn_anchor(&self, player: &Uuid) -> Option<Coordinate> {
        self.players.get(player).and_then(|p| p.bed)
    }
}

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Condvar, Mutex},
};

use qspawn_config::app::qspawn_random_spawn::RandomSpawnConfig;
use qspawn_spawn::{
    config::ConfigWatch,
    message::SpawnMessage,
    player::{GameMode, PlayerAccess},
    service::SpawnService,
    store::MemorySpawnStore,
};
use qspawn_task::MainThreadQueue;
use qspawn_world::{Coordinate, WorldAccess};
use uuid::Uuid;

/// 平坦世界: 全部是草地平原,或全部是海洋
pub struct FlatWorld {
    surface: i32,
    ocean: bool,
    gate: Option<Arc<Gate>>,
}

impl FlatWorld {
    pub fn land() -> Self {
        Self {
            surface: 70,
            ocean: false,
            gate: None,
        }
    }

    pub fn ocean() -> Self {
        Self {
            surface: 63,
            ocean: true,
            gate: None,
        }
    }

    /// 区块加载会阻塞,直到 gate 打开
    pub fn gated(gate: Arc<Gate>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::land()
        }
    }
}

impl WorldAccess for FlatWorld {
    fn ensure_column_loaded(&self, _x: i32, _z: i32) -> anyhow::Result<()> {
        if let Some(gate) = &self.gate {
            gate.wait();
        }
        Ok(())
    }

    fn surface_height(&self, _x: i32, _z: i32) -> anyhow::Result<i32> {
        Ok(self.surface)
    }

    fn biome_id_at(&self, _pos: Coordinate) -> anyhow::Result<String> {
        Ok(if self.ocean {
            "minecraft:ocean"
        } else {
            "minecraft:plains"
        }
        .to_string())
    }

    fn block_id_at(&self, pos: Coordinate) -> anyhow::Result<String> {
        let id = if pos.y >= self.surface {
            "minecraft:air"
        } else if self.ocean {
            "minecraft:water"
        } else {
            "minecraft:grass_block"
        };
        Ok(id.to_string())
    }

    fn is_air(&self, pos: Coordinate) -> anyhow::Result<bool> {
        Ok(pos.y >= self.surface)
    }

    fn world_border_contains(&self, _pos: Coordinate) -> bool {
        true
    }

    fn default_spawn(&self) -> Coordinate {
        Coordinate::new(0, 64, 0)
    }
}

#[derive(Default)]
pub struct Gate {
    open: Mutex<bool>,
    cond: Condvar,
}

impl Gate {
    pub fn open(&self) {
        *self.open.lock().unwrap() = true;
        self.cond.notify_all();
    }

    fn wait(&self) {
        let mut open = self.open.lock().unwrap();
        while !*open {
            open = self.cond.wait(open).unwrap();
        }
    }
}

#[derive(Debug, Clone)]
pub struct FakePlayer {
    pub name: String,
    pub connected: bool,
    pub level: u8,
    pub mode: GameMode,
    pub effect: bool,
    pub pos: Option<(f64, f64, f64)>,
    pub anchor: Option<Coordinate>,
    pub messages: Vec<SpawnMessage>,
}

#[derive(Debug, Default)]
pub struct FakeHost {
    pub players: HashMap<Uuid, FakePlayer>,
}

impl FakeHost {
    pub fn join(&mut self, name: &str, level: u8) -> Uuid {
        let uuid = Uuid::new_v4();
        self.players.insert(
            uuid,
            FakePlayer {
                name: name.to_string(),
                connected: true,
                level,
                mode: GameMode::Survival,
                effect: false,
                pos: None,
                anchor: None,
                messages: Vec::new(),
            },
        );
        uuid
    }

    pub fn player(&self, uuid: &Uuid) -> &FakePlayer {
        &self.players[uuid]
    }

    pub fn player_mut(&mut self, uuid: &Uuid) -> &mut FakePlayer {
        self.players.get_mut(uuid).unwrap()
    }

    pub fn messages(&self, uuid: &Uuid) -> Vec<SpawnMessage> {
        self.player(uuid).messages.clone()
    }

    pub fn last_message(&self, uuid: &Uuid) -> Option<SpawnMessage> {
        self.player(uuid).messages.last().cloned()
    }
}

impl PlayerAccess for FakeHost {
    fn is_connected(&self, player: &Uuid) -> bool {
        self.players.get(player).is_some_and(|p| p.connected)
    }

    fn display_name(&self, player: &Uuid) -> Option<String> {
        self.players.get(player).map(|p| p.name.clone())
    }

    fn find_player(&self, name: &str) -> Option<Uuid> {
        self.players
            .iter()
            .find(|(_, p)| p.connected && p.name == name)
            .map(|(uuid, _)| *uuid)
    }

    fn permission_level(&self, player: &Uuid) -> u8 {
        self.players.get(player).map(|p| p.level).unwrap_or(0)
    }

    fn game_mode(&self, player: &Uuid) -> Option<GameMode> {
        self.players.get(player).map(|p| p.mode)
    }

    fn set_game_mode(&mut self, player: &Uuid, mode: GameMode) {
        if let Some(p) = self.players.get_mut(player) {
            p.mode = mode;
        }
    }

    fn set_search_effect(&mut self, player: &Uuid, enabled: bool) {
        if let Some(p) = self.players.get_mut(player) {
            p.effect = enabled;
        }
    }

    fn teleport(&mut self, player: &Uuid, x: f64, y: f64, z: f64) {
        if let Some(p) = self.players.get_mut(player) {
            p.pos = Some((x, y, z));
        }
    }

    fn send_message(&mut self, player: &Uuid, message: &SpawnMessage) {
        if let Some(p) = self.players.get_mut(player) {
            p.messages.push(message.clone());
        }
    }

    fn respawn_anchor(&self, player: &Uuid) -> Option<Coordinate> {
        self.players.get(player).and_then(|p| p.anchor)
    }
}

pub struct Harness {
    pub host: FakeHost,
    pub queue: MainThreadQueue<FakeHost>,
    pub service: SpawnService<FakeHost>,
    pub config: ConfigWatch,
    pub store: Arc<MemorySpawnStore>,
}

impl Harness {
    pub fn new(world: impl WorldAccess + 'static, config: RandomSpawnConfig) -> Self {
        let queue = MainThreadQueue::new();
        let store = Arc::new(MemorySpawnStore::new());
        let (service, config) =
            qspawn_spawn::run(config, Arc::new(world), queue.sender(), store.clone()).unwrap();
        Self {
            host: FakeHost::default(),
            queue,
            service,
            config,
            store,
        }
    }

    pub fn land() -> Self {
        Self::new(FlatWorld::land(), RandomSpawnConfig::default())
    }

    /// 海洋世界,5 次尝试后放弃
    pub fn ocean() -> Self {
        let mut config = RandomSpawnConfig::default();
        config.search.max_attempts = 5;
        Self::new(FlatWorld::ocean(), config)
    }

    pub fn tick(&mut self) -> usize {
        self.queue.drain_all(&mut self.host)
    }
}

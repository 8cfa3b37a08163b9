use std::sync::Arc;

use qspawn_world::{Coordinate, SearchOutcome};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::{
    message::SpawnMessage,
    orchestrator::{DispatchError, SpawnOrchestrator},
    player::PlayerAccess,
    store::SpawnStore,
};

/// 触发搜索的原因,决定成功/失败时发给玩家的消息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnReason {
    FirstJoin,
    RandomTeleport,
}

impl SpawnReason {
    fn success(self) -> SpawnMessage {
        match self {
            SpawnReason::FirstJoin => SpawnMessage::JoinSuccess,
            SpawnReason::RandomTeleport => SpawnMessage::RandomTeleportSuccess,
        }
    }

    fn fail(self) -> SpawnMessage {
        match self {
            SpawnReason::FirstJoin => SpawnMessage::JoinFail,
            SpawnReason::RandomTeleport => SpawnMessage::RandomTeleportFail,
        }
    }
}

#[derive(Debug)]
pub enum SpawnDecision {
    /// 已发起后台搜索
    Searching(JoinHandle<SearchOutcome>),
    /// 直接传送到已记录的出生点
    Teleported(Coordinate),
    /// 交给宿主默认逻辑
    Skipped,
}

impl SpawnDecision {
    pub fn is_skipped(&self) -> bool {
        matches!(self, SpawnDecision::Skipped)
    }
}

/// 玩家生命周期钩子
pub struct SpawnService<P> {
    orchestrator: SpawnOrchestrator<P>,
    store: Arc<dyn SpawnStore>,
}

impl<P: PlayerAccess> SpawnService<P> {
    pub fn new(orchestrator: SpawnOrchestrator<P>, store: Arc<dyn SpawnStore>) -> Self {
        Self {
            orchestrator,
            store,
        }
    }

    pub fn orchestrator(&self) -> &SpawnOrchestrator<P> {
        &self.orchestrator
    }

    pub fn store(&self) -> &Arc<dyn SpawnStore> {
        &self.store
    }

    /// 读取记录,出错时当作没有记录
    fn recorded_spawn(&self, player: &Uuid) -> Option<Coordinate> {
        match self.store.get(player) {
            Ok(pos) => pos,
            Err(e) => {
                log::error!("[随机出生点] 读取 {} 的出生点失败: {}", player, e);
                None
            }
        }
    }

    /// 玩家进入服务器
    ///
    /// 没有出生点记录才会搜索,老玩家保持原位置。
    pub fn on_player_join(&self, host: &mut P, player: Uuid) -> SpawnDecision {
        if self.recorded_spawn(&player).is_some() {
            return SpawnDecision::Skipped;
        }
        log::info!("[随机出生点] 新玩家 {} 加入,开始寻找出生点", host.name_or_uuid(&player));
        self.start_search(host, player, SpawnReason::FirstJoin)
    }

    /// 玩家重生
    ///
    /// 优先级: 床/重生锚 > 已记录出生点 > 重新搜索
    pub fn on_player_respawn(&self, host: &mut P, player: Uuid) -> SpawnDecision {
        if host.respawn_anchor(&player).is_some() {
            return SpawnDecision::Skipped;
        }
        if let Some(pos) = self.recorded_spawn(&player) {
            let (x, y, z) = pos.block_center();
            host.teleport(&player, x, y, z);
            host.send_message(&player, &SpawnMessage::DeathSuccess);
            return SpawnDecision::Teleported(pos);
        }
        self.start_search(host, player, SpawnReason::RandomTeleport)
    }

    /// 发起搜索,成功后传送并保存出生点
    pub fn start_search(&self, host: &mut P, player: Uuid, reason: SpawnReason) -> SpawnDecision {
        match self.search_for(host, player, Some(reason), |_, _| {}) {
            Ok(handle) => SpawnDecision::Searching(handle),
            Err(DispatchError::AlreadySearching(_)) => {
                log::debug!("[随机出生点] 玩家 {} 已在搜索中,忽略", player);
                SpawnDecision::Skipped
            }
            Err(e) => {
                log::debug!("[随机出生点] {}", e);
                SpawnDecision::Skipped
            }
        }
    }

    /// 搜索并在成功时传送、保存,结果额外交给 `after`
    ///
    /// `reason` 为空时不给玩家发任何消息,由 `after` 负责回复(指令使用)。
    pub(crate) fn search_for<F>(
        &self,
        host: &mut P,
        player: Uuid,
        reason: Option<SpawnReason>,
        after: F,
    ) -> Result<JoinHandle<SearchOutcome>, DispatchError>
    where
        F: FnOnce(&mut P, SearchOutcome) + Send + 'static,
    {
        let store = self.store.clone();
        let handle = self
            .orchestrator
            .find_and_apply(host, player, None, move |host: &mut P, outcome| {
                match outcome {
                    SearchOutcome::Found(pos) => {
                        let (x, y, z) = pos.block_center();
                        host.teleport(&player, x, y, z);
                        if let Err(e) = store.put(&player, pos) {
                            log::error!("[随机出生点] 保存 {} 的出生点失败: {}", player, e);
                        }
                        log::info!(
                            "[随机出生点] {} 的出生点: {}",
                            host.name_or_uuid(&player),
                            pos
                        );
                        if let Some(reason) = reason {
                            host.send_message(&player, &reason.success());
                        }
                    }
                    SearchOutcome::NotFound => {
                        log::warn!(
                            "[随机出生点] 未能为 {} 找到安全位置",
                            host.name_or_uuid(&player)
                        );
                        if let Some(reason) = reason {
                            host.send_message(&player, &reason.fail());
                        }
                    }
                }
                after(host, outcome);
            })?;
        if reason.is_some() {
            host.send_message(&player, &SpawnMessage::SearchStart);
        }
        Ok(handle)
    }
}

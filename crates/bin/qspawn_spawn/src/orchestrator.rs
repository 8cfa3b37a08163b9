use std::sync::Arc;

use dashmap::{DashMap, DashSet};
use qspawn_config::app::qspawn_random_spawn::SearchConfig;
use qspawn_task::QueueSender;
use qspawn_world::{Coordinate, SearchOutcome, WorldAccess, search};
use thiserror::Error;
use tokio::{
    runtime::Handle,
    sync::{Semaphore, watch},
    task::JoinHandle,
};
use uuid::Uuid;

use crate::player::{GameMode, PlayerAccess};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("玩家 {0} 已有进行中的出生点搜索")]
    AlreadySearching(Uuid),
    #[error("玩家 {0} 不在线")]
    PlayerOffline(Uuid),
}

/// 异步搜索调度器
///
/// 搜索在后台阻塞线程池执行,结果通过主线程队列交回。
/// 同一玩家同时只允许一个搜索。
pub struct SpawnOrchestrator<P> {
    world: Arc<dyn WorldAccess>,
    queue: QueueSender<P>,
    config: watch::Receiver<Arc<SearchConfig>>,
    in_flight: Arc<DashSet<Uuid>>,
    /// 锁定期间下线的玩家: 仍处于旁观模式,值是锁定前的模式
    stale_locks: Arc<DashMap<Uuid, GameMode>>,
    permits: Arc<Semaphore>,
    runtime: Handle,
}

impl<P: PlayerAccess> SpawnOrchestrator<P> {
    pub fn new(
        world: Arc<dyn WorldAccess>,
        queue: QueueSender<P>,
        config: watch::Receiver<Arc<SearchConfig>>,
        max_concurrent_searches: usize,
        runtime: Handle,
    ) -> Self {
        Self {
            world,
            queue,
            config,
            in_flight: Arc::new(DashSet::new()),
            stale_locks: Arc::new(DashMap::new()),
            permits: Arc::new(Semaphore::new(max_concurrent_searches.max(1))),
            runtime,
        }
    }

    pub fn config(&self) -> Arc<SearchConfig> {
        self.config.borrow().clone()
    }

    pub fn is_searching(&self, player: &Uuid) -> bool {
        self.in_flight.contains(player)
    }

    /// 为玩家搜索安全位置,完成后在主线程执行 `then`
    ///
    /// 必须在主线程调用。`center` 为空时使用世界出生点。
    /// 玩家在结果返回前下线时,`then` 不会被调用,也不会恢复任何状态;
    /// 锁定前的模式会保留到该玩家下一次搜索时恢复。
    pub fn find_and_apply<F>(
        &self,
        host: &P,
        player: Uuid,
        center: Option<Coordinate>,
        then: F,
    ) -> Result<JoinHandle<SearchOutcome>, DispatchError>
    where
        F: FnOnce(&mut P, SearchOutcome) + Send + 'static,
    {
        if !host.is_connected(&player) {
            return Err(DispatchError::PlayerOffline(player));
        }
        if !self.in_flight.insert(player) {
            return Err(DispatchError::AlreadySearching(player));
        }

        let config = self.config();
        let lock = config.use_state_lock;
        // 上次锁定未解除时,当前的旁观模式不是玩家自己的
        let stale = self.stale_locks.remove(&player).map(|(_, mode)| mode);
        let original_mode = stale.or_else(|| host.game_mode(&player));
        if let (Some(mode), false) = (stale, lock) {
            self.queue.enqueue(move |host: &mut P| {
                if host.is_connected(&player) {
                    host.set_search_effect(&player, false);
                    host.set_game_mode(&player, mode);
                }
            });
        }
        if lock {
            self.queue.enqueue(move |host: &mut P| {
                if host.is_connected(&player) {
                    host.set_game_mode(&player, GameMode::Spectator);
                    host.set_search_effect(&player, true);
                }
            });
        }

        let in_flight = self.in_flight.clone();
        let stale_locks = self.stale_locks.clone();
        let continuation = move |host: &mut P, outcome: SearchOutcome| {
            in_flight.remove(&player);
            if !host.is_connected(&player) {
                log::debug!("[随机出生点] 玩家 {} 已下线,丢弃搜索结果", player);
                if let (true, Some(mode)) = (lock, original_mode) {
                    stale_locks.insert(player, mode);
                }
                return;
            }
            if lock {
                host.set_search_effect(&player, false);
                if let Some(mode) = original_mode {
                    host.set_game_mode(&player, mode);
                }
            }
            then(host, outcome);
        };

        let world = self.world.clone();
        let queue = self.queue.clone();
        let permits = self.permits.clone();
        let handle = self.runtime.spawn(async move {
            let outcome = match permits.acquire_owned().await {
                Ok(_permit) => {
                    let searching = tokio::task::spawn_blocking(move || {
                        let center = center.unwrap_or_else(|| world.default_spawn());
                        let mut rng = rand::thread_rng();
                        search(world.as_ref(), center, &config, &mut rng)
                    });
                    match searching.await {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            log::error!("[随机出生点] 玩家 {} 的搜索任务异常退出: {}", player, e);
                            SearchOutcome::NotFound
                        }
                    }
                }
                Err(e) => {
                    log::error!("[随机出生点] 无法获取搜索许可: {}", e);
                    SearchOutcome::NotFound
                }
            };
            queue.enqueue(move |host: &mut P| continuation(host, outcome));
            outcome
        });
        Ok(handle)
    }
}

use std::sync::Arc;

use qspawn_config::app::qspawn_random_spawn::RandomSpawnConfig;
use qspawn_task::QueueSender;
use qspawn_world::WorldAccess;

use crate::{
    config::ConfigWatch, orchestrator::SpawnOrchestrator, player::PlayerAccess,
    service::SpawnService, store::SpawnStore,
};

pub mod command;
pub mod config;
pub mod message;
pub mod orchestrator;
pub mod player;
pub mod service;
pub mod store;

/// 组装随机出生点服务,需要在 tokio 运行时内调用
pub fn run<P: PlayerAccess>(
    config: RandomSpawnConfig,
    world: Arc<dyn WorldAccess>,
    queue: QueueSender<P>,
    store: Arc<dyn SpawnStore>,
) -> anyhow::Result<(SpawnService<P>, ConfigWatch)> {
    let runtime = tokio::runtime::Handle::try_current()
        .map_err(|e| anyhow::anyhow!("随机出生点服务需要 tokio 运行时: {}", e))?;
    let max_concurrent = config.service.max_concurrent_searches;
    let (watch, config_rx) = ConfigWatch::new(config)?;
    let orchestrator = SpawnOrchestrator::new(world, queue, config_rx, max_concurrent, runtime);
    let service = SpawnService::new(orchestrator, store);
    log::info!("[服务] 随机出生点 已启用");
    Ok((service, watch))
}

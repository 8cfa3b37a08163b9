use std::{sync::Arc, time::Duration};

use qspawn_config::{app::qspawn_random_spawn::RandomSpawnConfig, tool::AppConfigTrait};
use qspawn_spawn::store::FileSpawnStore;
use qspawn_task::MainThreadQueue;
use qspawn_world::WorldAccess;
use rand::Rng;
use tklog::{ASYNC_LOG, Format, MODE};
use tokio::io::AsyncBufReadExt;

mod console;
mod host;
mod world;

/// 20 TPS
const TICK: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ASYNC_LOG
        .set_console(true)
        .set_cutmode_by_time("./log/server.log", MODE::DAY, 30, true)
        .await
        .set_format(Format::LevelFlag | Format::Time | Format::ShortFileName)
        .uselog();

    log::info!(
        "{} (插件 {}, Minecraft {}) 启动中",
        qspawn_config::QSPAWN_NAME,
        qspawn_config::QSPAWN_VERSION,
        qspawn_config::MC_VERSION
    );
    log::info!("读取配置文件中");
    let config = RandomSpawnConfig::load_validated()?;
    log::info!("读取配置文件完成");

    let seed = rand::thread_rng().gen_range(0..u32::MAX);
    let world = Arc::new(world::NoiseWorld::new(seed));
    log::info!("[世界] 种子 {} 出生点 ({})", seed, world.default_spawn());

    let store = Arc::new(FileSpawnStore::open(&config.service.store_path)?);
    let mut queue = MainThreadQueue::new();
    let (service, config) = qspawn_spawn::run(config, world.clone(), queue.sender(), store)?;
    let mut host = host::DemoHost::default();

    // 控制台输入
    let (line_tx, mut line_rx) = tokio::sync::mpsc::unbounded_channel::<String>();
    let stdin_tx = line_tx.clone();
    tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if stdin_tx.send(line).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    log::error!("[控制台] 读取输入失败: {}", e);
                    break;
                }
            }
        }
    });
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = line_tx.send("stop".to_string());
        }
    });

    log::info!("服务器已启动,输入 help 查看命令");
    let mut ticker = tokio::time::interval(TICK);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    'server: loop {
        ticker.tick().await;
        while let Ok(line) = line_rx.try_recv() {
            let mut console = console::Console {
                host: &mut host,
                service: &service,
                config: &config,
                world: world.as_ref(),
            };
            if console.handle_line(&line) == console::Flow::Stop {
                break 'server;
            }
        }
        // 本 tick 结束,执行后台搜索交回的任务
        queue.drain_all(&mut host);
    }

    log::info!("服务器已关闭");
    Ok(())
}

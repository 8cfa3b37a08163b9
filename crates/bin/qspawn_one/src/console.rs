use qspawn_spawn::{
    command::SpawnCommand,
    config::ConfigWatch,
    player::{CommandSource, PlayerAccess},
    service::{SpawnDecision, SpawnService},
};
use qspawn_world::{Coordinate, WorldAccess};

use crate::host::DemoHost;

/// 控制台一行输入的处理结果
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

pub struct Console<'a> {
    pub host: &'a mut DemoHost,
    pub service: &'a SpawnService<DemoHost>,
    pub config: &'a ConfigWatch,
    pub world: &'a dyn WorldAccess,
}

impl Console<'_> {
    pub fn handle_line(&mut self, line: &str) -> Flow {
        let line = line.trim();
        if line.is_empty() {
            return Flow::Continue;
        }
        if SpawnCommand::matches(line) {
            self.service
                .dispatch_command(self.host, CommandSource::Console, line);
            return Flow::Continue;
        }
        let args = shlex::split(line).unwrap_or_else(|| {
            line.split_whitespace().map(|s| s.to_string()).collect()
        });
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        match args.as_slice() {
            ["stop"] | ["exit"] => {
                log::info!("收到停止命令，正在关闭服务器...");
                return Flow::Stop;
            }
            ["join", name] => self.join(name, 0),
            ["join", name, level] => match level.parse::<u8>() {
                Ok(level) => self.join(name, level.min(4)),
                Err(_) => log::warn!("[指令] 用法: join <玩家> [op等级 0-4]"),
            },
            ["leave", name] => match self.host.leave(name) {
                Some(p) => log::info!("[玩家] {} 离开了游戏", p.name),
                None => log::warn!("[指令] 找不到玩家 {}", name),
            },
            ["die", name] => self.die(name),
            ["bed", name] => self.set_bed(name, None),
            ["bed", name, x, y, z] => match (x.parse(), y.parse(), z.parse()) {
                (Ok(x), Ok(y), Ok(z)) => self.set_bed(name, Some(Coordinate::new(x, y, z))),
                _ => log::warn!("[指令] 用法: bed <玩家> [x y z]"),
            },
            ["sudo", name, rest @ ..] if !rest.is_empty() => {
                let Some(uuid) = self.host.find_player(name) else {
                    log::warn!("[指令] 找不到玩家 {}", name);
                    return Flow::Continue;
                };
                self.service
                    .dispatch_command(self.host, CommandSource::Player(uuid), &rest.join(" "));
            }
            ["list"] => self.list(),
            ["reload"] => {
                if let Err(e) = self.config.reload() {
                    log::error!("[配置] 重载失败,继续使用旧配置: {}", e);
                }
                let search = self.config.current();
                log::info!(
                    "[配置] 区域 {} 距离 {}..{} 尝试 {} 次",
                    search.area,
                    search.min_distance,
                    search.max_distance,
                    search.max_attempts
                );
            }
            ["help"] => {
                for usage in [
                    "join <玩家> [op等级]  - 玩家加入",
                    "leave <玩家>          - 玩家离开",
                    "die <玩家>            - 玩家死亡并重生",
                    "bed <玩家> [x y z]    - 设置/清除床",
                    "sudo <玩家> <指令>    - 以玩家身份执行指令",
                    "list                  - 在线玩家",
                    "reload                - 重载配置",
                    "stop                  - 停止服务器",
                    "drandomspawn ...      - 随机出生点指令",
                ] {
                    log::info!("  {}", usage);
                }
            }
            _ => log::warn!("[指令] 未知命令: {},输入 help 查看帮助", line),
        }
        Flow::Continue
    }

    fn join(&mut self, name: &str, level: u8) {
        if self.host.find_player(name).is_some() {
            log::warn!("[玩家] {} 已经在线", name);
            return;
        }
        let uuid = self.host.join(name, level, self.world.default_spawn());
        log::info!("[玩家] {} ({}) 加入了游戏", name, uuid);
        if let SpawnDecision::Skipped = self.service.on_player_join(self.host, uuid) {
            log::debug!("[玩家] {} 已有出生点,保持原位置", name);
        }
    }

    fn die(&mut self, name: &str) {
        let Some(uuid) = self.host.find_player(name) else {
            log::warn!("[指令] 找不到玩家 {}", name);
            return;
        };
        log::info!("[玩家] {} 死了", name);
        match self.service.on_player_respawn(self.host, uuid) {
            SpawnDecision::Skipped => {
                // 床/重生锚由宿主处理
                let spawn = self
                    .host
                    .respawn_anchor(&uuid)
                    .unwrap_or_else(|| self.world.default_spawn());
                let (x, y, z) = spawn.block_center();
                self.host.teleport(&uuid, x, y, z);
            }
            SpawnDecision::Teleported(_) | SpawnDecision::Searching(_) => {}
        }
    }

    fn set_bed(&mut self, name: &str, bed: Option<Coordinate>) {
        match self.host.get_mut(name) {
            Some(p) => {
                p.bed = bed;
                match bed {
                    Some(pos) => log::info!("[玩家] {} 的床设置在 {}", p.name, pos),
                    None => log::info!("[玩家] {} 的床已清除", p.name),
                }
            }
            None => log::warn!("[指令] 找不到玩家 {}", name),
        }
    }

    fn list(&self) {
        let store = self.service.store();
        let mut count = 0;
        for (uuid, p) in self.host.players() {
            count += 1;
            let spawn = match store.get(uuid) {
                Ok(Some(pos)) => pos.to_string(),
                Ok(None) => "无".to_string(),
                Err(e) => format!("读取失败: {}", e),
            };
            log::info!(
                "  {} op={} 模式={} 位置=({:.1}, {:.1}, {:.1}) 出生点={}{}",
                p.name,
                p.op_level,
                p.mode,
                p.pos.0,
                p.pos.1,
                p.pos.2,
                spawn,
                if p.darkness { " [搜索中]" } else { "" }
            );
        }
        log::info!("在线玩家: {}", count);
    }
}

use qspawn_world::{Coordinate, SearchOutcome};
use thiserror::Error;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::{
    message::SpawnMessage,
    orchestrator::DispatchError,
    player::{CommandSource, PlayerAccess},
    service::SpawnService,
};

pub const ROOT: &str = "drandomspawn";
pub const ALIASES: [&str; 1] = ["rspawn"];
/// 与原版 op 等级一致
pub const OP_LEVEL: u8 = 2;

const USAGE_ROOT: &str = "用法: /drandomspawn <random_teleport|get_spawn|set_spawn|help>";
const USAGE_SET_SPAWN: &str = "用法: /drandomspawn set_spawn <玩家> <x> <y> <z>";
const USAGE_RANDOM_TELEPORT: &str = "用法: /drandomspawn random_teleport [玩家]";
const USAGE_GET_SPAWN: &str = "用法: /drandomspawn get_spawn [玩家]";

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("你没有权限执行该指令")]
    NoPermission,
    #[error("找不到玩家 {0}")]
    PlayerNotFound(String),
    #[error("该指令只能由玩家执行,请指定目标玩家")]
    NotAPlayer,
    #[error("{0}")]
    Usage(&'static str),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error("出生点存储错误: {0}")]
    Store(anyhow::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnCommand {
    RandomTeleport { target: Option<String> },
    GetSpawn { target: Option<String> },
    SetSpawn { target: String, pos: Coordinate },
    Help,
}

impl SpawnCommand {
    /// 是否为本插件的指令(根指令或别名)
    pub fn matches(line: &str) -> bool {
        let line = line.trim_start().trim_start_matches('/');
        let head = line.split_whitespace().next().unwrap_or_default();
        head == ROOT || ALIASES.contains(&head)
    }

    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim_start().trim_start_matches('/');
        let args = shlex::split(line).unwrap_or_else(|| {
            // 引号不完整时退回空格分割
            line.split_whitespace().map(|s| s.to_string()).collect()
        });
        let mut args = args.into_iter();
        match args.next().as_deref() {
            Some(head) if head == ROOT || ALIASES.contains(&head) => {}
            _ => return Err(CommandError::Usage(USAGE_ROOT)),
        }
        let sub = args.next();
        let rest: Vec<String> = args.collect();
        match sub.as_deref() {
            None | Some("help") => Ok(SpawnCommand::Help),
            Some("random_teleport") => match rest.as_slice() {
                [] => Ok(SpawnCommand::RandomTeleport { target: None }),
                [target] => Ok(SpawnCommand::RandomTeleport {
                    target: Some(target.clone()),
                }),
                _ => Err(CommandError::Usage(USAGE_RANDOM_TELEPORT)),
            },
            Some("get_spawn") => match rest.as_slice() {
                [] => Ok(SpawnCommand::GetSpawn { target: None }),
                [target] => Ok(SpawnCommand::GetSpawn {
                    target: Some(target.clone()),
                }),
                _ => Err(CommandError::Usage(USAGE_GET_SPAWN)),
            },
            Some("set_spawn") => match rest.as_slice() {
                [target, x, y, z] => {
                    let coord = |v: &String| {
                        v.parse::<i32>()
                            .map_err(|_| CommandError::Usage(USAGE_SET_SPAWN))
                    };
                    Ok(SpawnCommand::SetSpawn {
                        target: target.clone(),
                        pos: Coordinate::new(coord(x)?, coord(y)?, coord(z)?),
                    })
                }
                _ => Err(CommandError::Usage(USAGE_SET_SPAWN)),
            },
            Some(_) => Err(CommandError::Usage(USAGE_ROOT)),
        }
    }
}

#[derive(Debug)]
pub enum CommandOutcome {
    /// 已发起搜索,结果会在之后的 tick 回复
    Searching(JoinHandle<SearchOutcome>),
    Done,
}

fn require_op<P: PlayerAccess>(host: &P, source: &CommandSource) -> Result<(), CommandError> {
    if source.permission_level(host) >= OP_LEVEL {
        Ok(())
    } else {
        Err(CommandError::NoPermission)
    }
}

/// 解析目标玩家: 省略或 `@s` 指向来源自身,其余按名称或 uuid 查找
fn resolve_target<P: PlayerAccess>(
    host: &P,
    source: &CommandSource,
    target: Option<&str>,
) -> Result<Uuid, CommandError> {
    match target {
        None | Some("@s") => source.player().ok_or(CommandError::NotAPlayer),
        Some(name) => host
            .find_player(name)
            .or_else(|| Uuid::parse_str(name).ok())
            .ok_or_else(|| CommandError::PlayerNotFound(name.to_string())),
    }
}

impl<P: PlayerAccess> SpawnService<P> {
    /// 执行一条指令,错误以红字回复给来源
    pub fn dispatch_command(&self, host: &mut P, source: CommandSource, line: &str) -> CommandOutcome {
        match self.execute_command(host, source, line) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::debug!("[指令] {} 执行失败: {}", line, e);
                source.reply(host, &SpawnMessage::CommandError(e.to_string()));
                CommandOutcome::Done
            }
        }
    }

    pub fn execute_command(
        &self,
        host: &mut P,
        source: CommandSource,
        line: &str,
    ) -> Result<CommandOutcome, CommandError> {
        match SpawnCommand::parse(line)? {
            SpawnCommand::Help => {
                source.reply(host, &SpawnMessage::Help);
                Ok(CommandOutcome::Done)
            }
            SpawnCommand::RandomTeleport { target } => {
                require_op(host, &source)?;
                let player = resolve_target(host, &source, target.as_deref())?;
                self.random_teleport(host, source, player)
            }
            SpawnCommand::GetSpawn { target } => {
                let player = resolve_target(host, &source, target.as_deref())?;
                if source.player() != Some(player) {
                    require_op(host, &source)?;
                }
                let name = host.name_or_uuid(&player);
                let message = match self.store().get(&player).map_err(CommandError::Store)? {
                    Some(pos) => SpawnMessage::GetSpawnSuccess(name, pos),
                    None => SpawnMessage::GetSpawnFail(name),
                };
                source.reply(host, &message);
                Ok(CommandOutcome::Done)
            }
            SpawnCommand::SetSpawn { target, pos } => {
                require_op(host, &source)?;
                let player = resolve_target(host, &source, Some(&target))?;
                self.store().put(&player, pos).map_err(CommandError::Store)?;
                let name = host.name_or_uuid(&player);
                log::info!("[指令] {} 的出生点被设置为 {}", name, pos);
                source.reply(host, &SpawnMessage::SetSpawnSuccess(name, pos));
                Ok(CommandOutcome::Done)
            }
        }
    }

    /// 只回复指令来源,目标玩家本身不收到消息
    fn random_teleport(
        &self,
        host: &mut P,
        source: CommandSource,
        player: Uuid,
    ) -> Result<CommandOutcome, CommandError> {
        let name = host.name_or_uuid(&player);
        let reply_name = name.clone();
        let handle = self.search_for(host, player, None, move |host: &mut P, outcome| {
            let message = if outcome.is_found() {
                SpawnMessage::SearchSuccessFor(reply_name)
            } else {
                SpawnMessage::SearchFailFor(reply_name)
            };
            source.reply(host, &message);
        })?;
        source.reply(host, &SpawnMessage::SearchStartFor(name));
        Ok(CommandOutcome::Searching(handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        assert_eq!(SpawnCommand::parse("/drandomspawn").unwrap(), SpawnCommand::Help);
        assert_eq!(SpawnCommand::parse("rspawn help").unwrap(), SpawnCommand::Help);
        assert_eq!(
            SpawnCommand::parse("drandomspawn random_teleport").unwrap(),
            SpawnCommand::RandomTeleport { target: None }
        );
        assert_eq!(
            SpawnCommand::parse("/rspawn get_spawn \"Steve\"").unwrap(),
            SpawnCommand::GetSpawn {
                target: Some("Steve".to_string())
            }
        );
        assert_eq!(
            SpawnCommand::parse("drandomspawn set_spawn Alex 10 64 -20").unwrap(),
            SpawnCommand::SetSpawn {
                target: "Alex".to_string(),
                pos: Coordinate::new(10, 64, -20)
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            SpawnCommand::parse("drandomspawn set_spawn Alex 10 sixty -20"),
            Err(CommandError::Usage(USAGE_SET_SPAWN))
        ));
        assert!(matches!(
            SpawnCommand::parse("drandomspawn set_spawn Alex"),
            Err(CommandError::Usage(USAGE_SET_SPAWN))
        ));
        assert!(matches!(
            SpawnCommand::parse("drandomspawn fly"),
            Err(CommandError::Usage(USAGE_ROOT))
        ));
        assert!(matches!(
            SpawnCommand::parse("spawn"),
            Err(CommandError::Usage(USAGE_ROOT))
        ));
    }

    #[test]
    fn test_matches() {
        assert!(SpawnCommand::matches("/rspawn get_spawn"));
        assert!(SpawnCommand::matches("drandomspawn"));
        assert!(!SpawnCommand::matches("list"));
        assert!(!SpawnCommand::matches(""));
    }
}

use qspawn_world::Coordinate;

/// 发给玩家/指令来源的消息
///
/// `key()` 是翻译键,宿主有语言文件时用它翻译;否则使用 `text()` 的默认文本。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnMessage {
    SearchStart,
    JoinSuccess,
    JoinFail,
    RandomTeleportSuccess,
    RandomTeleportFail,
    DeathSuccess,
    SearchStartFor(String),
    SearchSuccessFor(String),
    SearchFailFor(String),
    GetSpawnSuccess(String, Coordinate),
    GetSpawnFail(String),
    SetSpawnSuccess(String, Coordinate),
    Help,
    CommandError(String),
}

const KEY_PREFIX: &str = "info.drandomspawn.";

impl SpawnMessage {
    pub fn key(&self) -> String {
        let suffix = match self {
            SpawnMessage::SearchStart => "random_teleport.start",
            SpawnMessage::JoinSuccess => "join.success",
            SpawnMessage::JoinFail => "join.fail",
            SpawnMessage::RandomTeleportSuccess => "random_teleport.success",
            SpawnMessage::RandomTeleportFail => "random_teleport.fail",
            SpawnMessage::DeathSuccess => "death.success",
            SpawnMessage::SearchStartFor(_) => "random_teleport.start.for",
            SpawnMessage::SearchSuccessFor(_) => "random_teleport.success.for",
            SpawnMessage::SearchFailFor(_) => "random_teleport.fail.for",
            SpawnMessage::GetSpawnSuccess(..) => "get_spawn.success",
            SpawnMessage::GetSpawnFail(_) => "get_spawn.fail",
            SpawnMessage::SetSpawnSuccess(..) => "set_spawn.success",
            SpawnMessage::Help => "help",
            SpawnMessage::CommandError(_) => "command.error",
        };
        format!("{}{}", KEY_PREFIX, suffix)
    }

    /// 翻译参数,顺序与语言文件中的 %s 一致
    pub fn args(&self) -> Vec<String> {
        match self {
            SpawnMessage::SearchStartFor(name)
            | SpawnMessage::SearchSuccessFor(name)
            | SpawnMessage::SearchFailFor(name)
            | SpawnMessage::GetSpawnFail(name)
            | SpawnMessage::CommandError(name) => vec![name.clone()],
            SpawnMessage::GetSpawnSuccess(name, pos) | SpawnMessage::SetSpawnSuccess(name, pos) => {
                vec![
                    name.clone(),
                    pos.x.to_string(),
                    pos.y.to_string(),
                    pos.z.to_string(),
                ]
            }
            _ => vec![],
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            SpawnMessage::JoinFail
                | SpawnMessage::RandomTeleportFail
                | SpawnMessage::SearchFailFor(_)
                | SpawnMessage::GetSpawnFail(_)
                | SpawnMessage::CommandError(_)
        )
    }

    /// 默认文本(带格式代码)
    pub fn text(&self) -> String {
        match self {
            SpawnMessage::SearchStart => "§7正在为你寻找安全的出生点...".to_string(),
            SpawnMessage::JoinSuccess => "§a欢迎!已为你找到专属出生点。".to_string(),
            SpawnMessage::JoinFail => "§c未能找到安全的出生点,你将在世界出生点出生。".to_string(),
            SpawnMessage::RandomTeleportSuccess => "§a已将你传送到新的出生点。".to_string(),
            SpawnMessage::RandomTeleportFail => "§c未能找到安全的位置,请稍后再试。".to_string(),
            SpawnMessage::DeathSuccess => "§a你已在自己的出生点重生。".to_string(),
            SpawnMessage::SearchStartFor(name) => format!("§7正在为 {} 寻找安全位置...", name),
            SpawnMessage::SearchSuccessFor(name) => format!("§a已将 {} 传送到新的出生点。", name),
            SpawnMessage::SearchFailFor(name) => format!("§c未能为 {} 找到安全位置。", name),
            SpawnMessage::GetSpawnSuccess(name, pos) => {
                format!("§a{} 的出生点: §f{}", name, pos)
            }
            SpawnMessage::GetSpawnFail(name) => format!("§c{} 还没有专属出生点。", name),
            SpawnMessage::SetSpawnSuccess(name, pos) => {
                format!("§a已将 {} 的出生点设置为 §f{}", name, pos)
            }
            SpawnMessage::Help => [
                "§6====== 随机出生点 ======",
                "§f/drandomspawn random_teleport [玩家] §7- 重新随机出生点并传送",
                "§f/drandomspawn get_spawn [玩家] §7- 查看出生点",
                "§f/drandomspawn set_spawn <玩家> <x> <y> <z> §7- 设置出生点",
            ]
            .join("\n"),
            SpawnMessage::CommandError(text) => {
                if text.starts_with('§') {
                    text.clone()
                } else {
                    format!("§c{}", text)
                }
            }
        }
    }
}

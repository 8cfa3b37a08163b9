use std::path::{Path, PathBuf};

use dashmap::DashMap;
use qspawn_world::Coordinate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 玩家出生点存储
///
/// `put` 总是覆盖旧值,没有删除操作。
pub trait SpawnStore: Send + Sync {
    fn get(&self, player: &Uuid) -> anyhow::Result<Option<Coordinate>>;
    fn put(&self, player: &Uuid, pos: Coordinate) -> anyhow::Result<()>;
}

/// 内存存储,服务器重启后丢失
#[derive(Debug, Default)]
pub struct MemorySpawnStore {
    records: DashMap<Uuid, Coordinate>,
}

impl MemorySpawnStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SpawnStore for MemorySpawnStore {
    fn get(&self, player: &Uuid) -> anyhow::Result<Option<Coordinate>> {
        Ok(self.records.get(player).map(|r| *r.value()))
    }

    fn put(&self, player: &Uuid, pos: Coordinate) -> anyhow::Result<()> {
        self.records.insert(*player, pos);
        Ok(())
    }
}

/// 玩家数据文件中属于本插件的命名空间
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SpawnRecord {
    pub spawn_x: i32,
    pub spawn_y: i32,
    pub spawn_z: i32,
}

impl From<Coordinate> for SpawnRecord {
    fn from(pos: Coordinate) -> Self {
        Self {
            spawn_x: pos.x,
            spawn_y: pos.y,
            spawn_z: pos.z,
        }
    }
}

impl From<SpawnRecord> for Coordinate {
    fn from(r: SpawnRecord) -> Self {
        Coordinate::new(r.spawn_x, r.spawn_y, r.spawn_z)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PlayerSpawnFile {
    drandomspawn: SpawnRecord,
}

/// 每个玩家一个 toml 文件: `<dir>/<uuid>.toml`
#[derive(Debug)]
pub struct FileSpawnStore {
    dir: PathBuf,
    cache: DashMap<Uuid, Coordinate>,
}

impl FileSpawnStore {
    pub fn open(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            cache: DashMap::new(),
        })
    }

    fn path_of(&self, player: &Uuid) -> PathBuf {
        self.dir.join(player.to_string()).with_extension("toml")
    }
}

impl SpawnStore for FileSpawnStore {
    fn get(&self, player: &Uuid) -> anyhow::Result<Option<Coordinate>> {
        if let Some(pos) = self.cache.get(player) {
            return Ok(Some(*pos));
        }
        let path = self.path_of(player);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        let file: PlayerSpawnFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("出生点文件 {} 损坏: {}", path.display(), e))?;
        let pos = Coordinate::from(file.drandomspawn);
        self.cache.insert(*player, pos);
        Ok(Some(pos))
    }

    fn put(&self, player: &Uuid, pos: Coordinate) -> anyhow::Result<()> {
        let file = PlayerSpawnFile {
            drandomspawn: pos.into(),
        };
        let content = toml::to_string_pretty(&file)?;
        // 先写临时文件再改名,中途崩溃不会留下半个文件
        let path = self.path_of(player);
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &path)?;
        self.cache.insert(*player, pos);
        log::debug!("[随机出生点] 已保存 {} 的出生点 ({})", player, pos);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_get_after_put() {
        let store = MemorySpawnStore::new();
        let player = Uuid::new_v4();
        assert_eq!(store.get(&player).unwrap(), None);
        store.put(&player, Coordinate::new(1, 70, 2)).unwrap();
        assert_eq!(store.get(&player).unwrap(), Some(Coordinate::new(1, 70, 2)));
        // 覆盖
        store.put(&player, Coordinate::new(-5, 80, 9)).unwrap();
        assert_eq!(store.get(&player).unwrap(), Some(Coordinate::new(-5, 80, 9)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = std::env::temp_dir().join(format!("qspawn_store_{}", Uuid::new_v4()));
        let player = Uuid::new_v4();
        {
            let store = FileSpawnStore::open(&dir).unwrap();
            assert_eq!(store.get(&player).unwrap(), None);
            store.put(&player, Coordinate::new(100, 72, -300)).unwrap();
            assert_eq!(
                store.get(&player).unwrap(),
                Some(Coordinate::new(100, 72, -300))
            );
        }
        let store = FileSpawnStore::open(&dir).unwrap();
        assert_eq!(
            store.get(&player).unwrap(),
            Some(Coordinate::new(100, 72, -300))
        );

        let content = std::fs::read_to_string(dir.join(format!("{}.toml", player))).unwrap();
        assert!(content.contains("[drandomspawn]"));
        assert!(content.contains("spawn_x = 100"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_store_put_replaces_atomically() {
        let dir = std::env::temp_dir().join(format!("qspawn_store_{}", Uuid::new_v4()));
        let player = Uuid::new_v4();
        // 上次崩溃留下的半个临时文件
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("{}.toml.tmp", player)), "[drandomspawn").unwrap();

        let store = FileSpawnStore::open(&dir).unwrap();
        assert_eq!(store.get(&player).unwrap(), None);
        store.put(&player, Coordinate::new(1, 70, 1)).unwrap();
        store.put(&player, Coordinate::new(2, 71, 2)).unwrap();
        assert!(!dir.join(format!("{}.toml.tmp", player)).exists());

        let reopened = FileSpawnStore::open(&dir).unwrap();
        assert_eq!(reopened.get(&player).unwrap(), Some(Coordinate::new(2, 71, 2)));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_store_corrupt_file_is_error() {
        let dir = std::env::temp_dir().join(format!("qspawn_store_{}", Uuid::new_v4()));
        let store = FileSpawnStore::open(&dir).unwrap();
        let player = Uuid::new_v4();
        std::fs::write(dir.join(format!("{}.toml", player)), "not = [valid").unwrap();
        assert!(store.get(&player).is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }
}

use qspawn_random::SpawnArea;
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, tool::AppConfigTrait};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RandomSpawnConfig {
    pub version: i32,
    // 搜索参数
    pub search: SearchConfig,
    // 服务参数
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// 距离世界出生点的最小半径(方块)
    pub min_distance: i32,
    /// 距离世界出生点的最大半径(方块)
    pub max_distance: i32,
    /// 最大尝试次数,全部失败则留在世界出生点
    pub max_attempts: u32,
    /// 禁止出生的群系,例如 minecraft:desert
    pub biome_blacklist: Vec<String>,
    /// 禁止站在其上出生的方块,例如 minecraft:lava
    pub block_blacklist: Vec<String>,
    /// 搜索期间切换为旁观模式并附加黑暗效果
    pub use_state_lock: bool,
    /// 候选点几何形状: annulus(排除中心方形) 或 square
    pub area: SpawnArea,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    /// 同时进行的后台搜索数量上限
    pub max_concurrent_searches: usize,
    /// 玩家出生点记录的存放目录
    pub store_path: String,
}

impl Default for RandomSpawnConfig {
    fn default() -> Self {
        Self {
            version: 0,
            search: Default::default(),
            service: Default::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_distance: 500,
            max_distance: 5000,
            max_attempts: 50,
            biome_blacklist: vec![],
            block_blacklist: vec![
                "minecraft:water".to_string(),
                "minecraft:lava".to_string(),
                "minecraft:magma_block".to_string(),
                "minecraft:cactus".to_string(),
                "minecraft:sweet_berry_bush".to_string(),
            ],
            use_state_lock: true,
            area: SpawnArea::Annulus,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_concurrent_searches: 4,
            store_path: "./data/qspawn/".to_string(),
        }
    }
}

impl SearchConfig {
    pub const MIN_DISTANCE_RANGE: (i64, i64) = (0, 50_000);
    pub const MAX_DISTANCE_RANGE: (i64, i64) = (1, 50_000);
    pub const MAX_ATTEMPTS_RANGE: (i64, i64) = (1, 100);

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (lo, hi) = Self::MIN_DISTANCE_RANGE;
        ConfigError::check_range("min_distance", self.min_distance as i64, lo, hi)?;
        let (lo, hi) = Self::MAX_DISTANCE_RANGE;
        ConfigError::check_range("max_distance", self.max_distance as i64, lo, hi)?;
        let (lo, hi) = Self::MAX_ATTEMPTS_RANGE;
        ConfigError::check_range("max_attempts", self.max_attempts as i64, lo, hi)?;
        if self.min_distance > self.max_distance {
            return Err(ConfigError::InvalidDistance {
                min: self.min_distance,
                max: self.max_distance,
            });
        }
        Ok(())
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_range(
            "max_concurrent_searches",
            self.max_concurrent_searches as i64,
            1,
            64,
        )
    }
}

impl AppConfigTrait for RandomSpawnConfig {
    const PATH: &'static str = "./config/qspawn/";
    const NAME: &'static str = "config";

    fn validate(&self) -> Result<(), ConfigError> {
        self.search.validate()?;
        self.service.validate()?;
        log::debug!(
            "[配置] 出生半径 {}..={} 尝试次数 {}",
            self.search.min_distance,
            self.search.max_distance,
            self.search.max_attempts
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = RandomSpawnConfig::default();
        assert!(AppConfigTrait::validate(&config).is_ok());
        assert_eq!(config.search.area, SpawnArea::Annulus);
        assert!(config.search.use_state_lock);
    }

    #[test]
    fn test_min_greater_than_max_rejected() {
        let content = r#"
            version = 0
            [search]
            min_distance = 500
            max_distance = 100
        "#;
        match RandomSpawnConfig::parse(content) {
            Err(ConfigError::InvalidDistance { min, max }) => {
                assert_eq!(min, 500);
                assert_eq!(max, 100);
            }
            other => panic!("应当返回 InvalidDistance, 实际: {:?}", other),
        }
    }

    #[test]
    fn test_equal_distances_allowed() {
        let content = r#"
            version = 0
            [search]
            min_distance = 300
            max_distance = 300
        "#;
        let config = RandomSpawnConfig::parse(content).expect("min == max 是合法配置");
        assert_eq!(config.search.min_distance, 300);
        assert_eq!(config.search.max_attempts, 50);
    }

    #[test]
    fn test_out_of_range() {
        let mut config = RandomSpawnConfig::default();
        config.search.max_attempts = 0;
        assert!(matches!(
            AppConfigTrait::validate(&config),
            Err(ConfigError::OutOfRange { field: "max_attempts", .. })
        ));

        let mut config = RandomSpawnConfig::default();
        config.search.max_distance = 60_000;
        assert!(matches!(
            AppConfigTrait::validate(&config),
            Err(ConfigError::OutOfRange { field: "max_distance", .. })
        ));

        let mut config = RandomSpawnConfig::default();
        config.service.max_concurrent_searches = 0;
        assert!(AppConfigTrait::validate(&config).is_err());
    }

    #[test]
    fn test_parse_full_file() {
        let content = r#"
            version = 1
            [search]
            min_distance = 10
            max_distance = 20
            max_attempts = 5
            biome_blacklist = ["minecraft:desert"]
            block_blacklist = []
            use_state_lock = false
            area = "square"
            [service]
            max_concurrent_searches = 2
            store_path = "./tmp/"
        "#;
        let config = RandomSpawnConfig::parse(content).unwrap();
        assert_eq!(config.version, 1);
        assert_eq!(config.search.area, SpawnArea::Square);
        assert_eq!(config.search.biome_blacklist, vec!["minecraft:desert"]);
        assert!(config.search.block_blacklist.is_empty());
        assert!(!config.search.use_state_lock);
        assert_eq!(config.service.max_concurrent_searches, 2);
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let config = RandomSpawnConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = RandomSpawnConfig::parse(&text).unwrap();
        assert_eq!(parsed.search, config.search);
        assert_eq!(parsed.service, config.service);
    }
}

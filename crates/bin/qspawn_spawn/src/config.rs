use std::sync::Arc;

use qspawn_config::{
    app::qspawn_random_spawn::{RandomSpawnConfig, SearchConfig},
    error::ConfigError,
    tool::AppConfigTrait,
};
use tokio::sync::watch;

/// 搜索配置的发布端
///
/// 每次后台搜索开始时读取一次快照,重载只影响之后发起的搜索。
#[derive(Debug)]
pub struct ConfigWatch {
    api: watch::Sender<Arc<SearchConfig>>,
    max_concurrent_searches: usize,
}

impl ConfigWatch {
    pub fn new(
        config: RandomSpawnConfig,
    ) -> Result<(Self, watch::Receiver<Arc<SearchConfig>>), ConfigError> {
        config.validate()?;
        let (api, receiver) = watch::channel(Arc::new(config.search));
        Ok((
            Self {
                api,
                max_concurrent_searches: config.service.max_concurrent_searches,
            },
            receiver,
        ))
    }

    pub fn current(&self) -> Arc<SearchConfig> {
        self.api.borrow().clone()
    }

    /// 校验通过才替换,失败时保留旧配置
    pub fn apply(&self, config: RandomSpawnConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if config.service.max_concurrent_searches != self.max_concurrent_searches {
            log::warn!("[配置] max_concurrent_searches 需要重启服务器才能生效");
        }
        self.api.send_replace(Arc::new(config.search));
        log::info!("[配置] 随机出生点配置已重载");
        Ok(())
    }

    /// 从磁盘重新读取配置文件
    pub fn reload(&self) -> anyhow::Result<()> {
        let config = RandomSpawnConfig::load_or_create_default()?;
        self.apply(config)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_reload_keeps_old_config() {
        let (watch, rx) = ConfigWatch::new(RandomSpawnConfig::default()).unwrap();
        let mut bad = RandomSpawnConfig::default();
        bad.search.min_distance = 500;
        bad.search.max_distance = 100;
        assert!(matches!(
            watch.apply(bad),
            Err(ConfigError::InvalidDistance { min: 500, max: 100 })
        ));
        assert_eq!(rx.borrow().max_distance, 5000);

        let mut good = RandomSpawnConfig::default();
        good.search.max_distance = 800;
        watch.apply(good).unwrap();
        assert_eq!(rx.borrow().max_distance, 800);
        assert_eq!(watch.current().max_distance, 800);
    }

    #[test]
    fn test_invalid_initial_config_fails_fast() {
        let mut bad = RandomSpawnConfig::default();
        bad.search.min_distance = 500;
        bad.search.max_distance = 100;
        assert!(ConfigWatch::new(bad).is_err());
    }
}

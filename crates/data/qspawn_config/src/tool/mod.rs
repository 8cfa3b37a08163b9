use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// Tool 目录旨在简化配置文件管理,而非全量
pub trait AppConfigTrait: Serialize + for<'de> Deserialize<'de> + Default {
    const PATH: &'static str;
    const NAME: &'static str;

    fn config_path() -> std::path::PathBuf {
        std::path::Path::new(Self::PATH)
            .join(Self::NAME)
            .with_extension("toml")
    }

    /// 校验配置,默认不做任何检查
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    fn load_or_create_default() -> anyhow::Result<Self> {
        // 默认实现：尝试从文件加载，如果失败则创建默认配置并保存
        let path = Self::config_path();
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// 加载并校验,校验失败时直接返回错误,不做任何修正
    fn load_validated() -> anyhow::Result<Self> {
        let config = Self::load_or_create_default()?;
        config.validate()?;
        Ok(config)
    }

    /// 从字符串解析并校验(重载与测试使用)
    fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path();
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(())
    }
}

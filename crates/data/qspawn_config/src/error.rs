use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置错误: min_distance ({min}) 不能大于 max_distance ({max})")]
    InvalidDistance { min: i32, max: i32 },
    #[error("配置错误: {field} = {value} 超出允许范围 [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("读写配置文件失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("解析配置文件失败: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("序列化配置失败: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    /// 范围检查,闭区间
    pub fn check_range(
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    ) -> Result<(), ConfigError> {
        if value < min || value > max {
            return Err(ConfigError::OutOfRange {
                field,
                value,
                min,
                max,
            });
        }
        Ok(())
    }
}

use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// 会话记忆保留轮数上限
pub const MAX_MEMORY_MESSAGES: usize = 10;

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 合并顺序：
    /// 1. 开发环境默认值
    /// 2. ./config.toml
    /// 3. 环境变量（COURTSIDE_ 前缀，`__` 表示嵌套）
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::load_from(default_config_path())
    }

    /// 从指定路径加载配置
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig, figment::Error> {
        Figment::from(Serialized::defaults(AppConfig::development()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("COURTSIDE_").split("__"))
            .extract()
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        for (name, value) in [
            ("classifier.context_threshold", config.classifier.context_threshold),
            ("classifier.llm_threshold", config.classifier.llm_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigValidationError::InvalidThreshold(name.to_string()));
            }
        }

        if config.experiment.enabled {
            if config.experiment.variants.is_empty() {
                return Err(ConfigValidationError::NoVariants);
            }
            for variant in &config.experiment.variants {
                if !(0.0..=1.0).contains(&variant.llm_threshold) {
                    return Err(ConfigValidationError::InvalidThreshold(format!(
                        "experiment.variants.{}",
                        variant.name
                    )));
                }
            }
        }

        if !(1..=MAX_MEMORY_MESSAGES).contains(&config.memory.max_messages) {
            return Err(ConfigValidationError::InvalidMemoryCap(config.memory.max_messages));
        }

        if config.cache.classification_ttl_secs == 0 || config.memory.ttl_secs == 0 {
            return Err(ConfigValidationError::InvalidTtl);
        }

        if config.llm.provider == "openai"
            && config.llm.api_key.as_deref().map_or(true, str::is_empty)
        {
            return Err(ConfigValidationError::MissingCredentials(
                config.llm.provider.clone(),
            ));
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("阈值无效，必须位于 [0, 1]: {0}")]
    InvalidThreshold(String),

    #[error("实验已启用但未配置任何分组")]
    NoVariants,

    #[error("会话记忆轮数无效，必须位于 [1, 10]: {0}")]
    InvalidMemoryCap(usize),

    #[error("TTL 无效，必须大于 0")]
    InvalidTtl,

    #[error("语言模型服务缺少凭据: {0}")]
    MissingCredentials(String),
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_development() {
        assert!(ConfigLoader::validate(&AppConfig::development()).is_ok());
    }

    #[test]
    fn test_validate_missing_credentials() {
        let mut config = AppConfig::development();
        config.llm.provider = "openai".into();
        config.llm.api_key = None;

        let err = ConfigLoader::validate(&config).unwrap_err();
        assert!(matches!(err, ConfigValidationError::MissingCredentials(_)));
    }

    #[test]
    fn test_validate_threshold_range() {
        let mut config = AppConfig::development();
        config.classifier.llm_threshold = 1.5;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_validate_memory_cap() {
        let mut config = AppConfig::development();
        for cap in [0, 11] {
            config.memory.max_messages = cap;
            assert!(matches!(
                ConfigLoader::validate(&config),
                Err(ConfigValidationError::InvalidMemoryCap(c)) if c == cap
            ));
        }
        config.memory.max_messages = MAX_MEMORY_MESSAGES;
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        figment::Jail::expect_with(|_jail| {
            let config = ConfigLoader::load_from("missing.toml")?;
            assert_eq!(config.app_name, "courtside");
            assert_eq!(config.cache.classification_ttl_secs, 300);
            Ok(())
        });
    }

    #[test]
    fn test_load_file_and_env_override() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    environment = "staging"

                    [classifier]
                    llm_threshold = 0.65
                "#,
            )?;
            jail.set_env("COURTSIDE_SERVER__PORT", "9090");

            let config = ConfigLoader::load()?;
            assert_eq!(config.environment, "staging");
            assert!((config.classifier.llm_threshold - 0.65).abs() < f32::EPSILON);
            assert_eq!(config.server.port, 9090);
            Ok(())
        });
    }
}

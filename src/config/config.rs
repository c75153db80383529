use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
    /// 请求超时（秒）
    pub request_timeout: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式（JSON）
    pub structured: bool,
    /// 日志文件目录，为空时输出到标准输出
    pub log_dir: Option<PathBuf>,
    /// 日志文件名前缀
    pub file_prefix: String,
}

/// 本地回退策略的先后顺序
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FallbackOrder {
    /// 先按实体构成推断，再按关键词
    #[default]
    EntityFirst,
    /// 先按关键词，再按实体构成推断
    KeywordFirst,
}

/// 分类器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// 低于该置信度时启用上下文推断
    pub context_threshold: f32,
    /// 低于该置信度时调用语言模型（未分配实验组时使用）
    pub llm_threshold: f32,
    /// 语言模型不可用时的本地回退顺序
    pub fallback_order: FallbackOrder,
    /// 查询最大长度（字符）
    pub max_query_length: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            context_threshold: 0.7,
            llm_threshold: 0.6,
            fallback_order: FallbackOrder::EntityFirst,
            max_query_length: 500,
        }
    }
}

/// 语言模型服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// 后端类型: "openai"、"ollama" 或 "disabled"
    pub provider: String,
    /// 服务地址
    pub base_url: String,
    /// API 密钥（openai 必填）
    pub api_key: Option<String>,
    /// 模型名称
    pub model: String,
    /// 请求超时（毫秒）
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "disabled".into(),
            base_url: "http://localhost:11434".into(),
            api_key: None,
            model: "qwen2.5:1.5b-instruct".into(),
            timeout_ms: 2500,
        }
    }
}

/// 缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// 存储后端: "memory" 或 "redis"
    pub backend: String,
    /// Redis 地址
    pub redis_url: String,
    /// 分类结果 TTL（秒）
    pub classification_ttl_secs: u64,
    /// 触发过期清扫的条目数量
    pub high_water_mark: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: "memory".into(),
            redis_url: "redis://localhost:6379".into(),
            classification_ttl_secs: 300,
            high_water_mark: 10_000,
        }
    }
}

/// 对话记忆配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// 会话记忆 TTL（秒）
    pub ttl_secs: u64,
    /// 保留的最大消息数
    pub max_messages: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 1800,
            max_messages: 10,
        }
    }
}

/// 单个实验分组
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThresholdVariant {
    /// 分组名称（同时作为缓存键后缀）
    pub name: String,
    /// 该分组调用语言模型的置信度阈值
    pub llm_threshold: f32,
}

/// A/B 实验配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// 是否启用
    pub enabled: bool,
    /// 实验分组
    pub variants: Vec<ThresholdVariant>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            variants: vec![
                ThresholdVariant {
                    name: "control".into(),
                    llm_threshold: 0.6,
                },
                ThresholdVariant {
                    name: "strict".into(),
                    llm_threshold: 0.7,
                },
            ],
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 分类器配置
    pub classifier: ClassifierConfig,
    /// 语言模型配置
    pub llm: LlmConfig,
    /// 缓存配置
    pub cache: CacheConfig,
    /// 对话记忆配置
    pub memory: MemoryConfig,
    /// 实验配置
    pub experiment: ExperimentConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
                request_timeout: 30,
            },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
                file_prefix: "courtside.log".into(),
            },
            classifier: ClassifierConfig::default(),
            llm: LlmConfig::default(),
            cache: CacheConfig::default(),
            memory: MemoryConfig::default(),
            experiment: ExperimentConfig::default(),
            app_name: "courtside".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config.logging.log_dir = Some(PathBuf::from("./logs"));
        config.llm.provider = "openai".into();
        config.llm.base_url = "https://api.openai.com/v1".into();
        config.llm.model = "gpt-4o-mini".into();
        config.cache.backend = "redis".into();
        config.experiment.enabled = true;
        config
    }
}

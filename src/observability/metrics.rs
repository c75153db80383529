//! Prometheus 指标
//!
//! 每个 `EngineMetrics` 拥有独立的 Registry，测试之间互不干扰。

use std::time::Duration;

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};

use crate::error::{AppError, Result};
use crate::models::classification::ClassificationStage;

/// 查询理解引擎指标
pub struct EngineMetrics {
    registry: Registry,
    understand_total: IntCounterVec,
    stage_total: IntCounterVec,
    llm_calls_total: IntCounterVec,
    cache_lookups_total: IntCounterVec,
    understand_latency: Histogram,
}

impl EngineMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let understand_total = IntCounterVec::new(
            Opts::new("courtside_understand_total", "Understand requests by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(understand_total.clone()))?;

        let stage_total = IntCounterVec::new(
            Opts::new("courtside_classification_stage_total", "Classifications by producing stage"),
            &["stage"],
        )?;
        registry.register(Box::new(stage_total.clone()))?;

        let llm_calls_total = IntCounterVec::new(
            Opts::new("courtside_llm_calls_total", "Language model calls by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(llm_calls_total.clone()))?;

        let cache_lookups_total = IntCounterVec::new(
            Opts::new("courtside_cache_lookups_total", "Classification cache lookups"),
            &["result"],
        )?;
        registry.register(Box::new(cache_lookups_total.clone()))?;

        let understand_latency = Histogram::with_opts(
            HistogramOpts::new("courtside_understand_duration_seconds", "End-to-end understand latency")
                .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 2.5, 5.0]),
        )?;
        registry.register(Box::new(understand_latency.clone()))?;

        Ok(Self {
            registry,
            understand_total,
            stage_total,
            llm_calls_total,
            cache_lookups_total,
            understand_latency,
        })
    }

    /// 记录请求结果：classified / clarification / cache_hit
    pub fn record_outcome(&self, outcome: &str) {
        self.understand_total.with_label_values(&[outcome]).inc();
    }

    pub fn record_stage(&self, stage: ClassificationStage) {
        self.stage_total.with_label_values(&[stage.as_str()]).inc();
    }

    /// 记录语言模型调用结果
    pub fn record_llm(&self, outcome: &str) {
        self.llm_calls_total.with_label_values(&[outcome]).inc();
    }

    pub fn record_cache(&self, hit: bool) {
        let label = if hit { "hit" } else { "miss" };
        self.cache_lookups_total.with_label_values(&[label]).inc();
    }

    pub fn observe_latency(&self, elapsed: Duration) {
        self.understand_latency.observe(elapsed.as_secs_f64());
    }

    /// 某个结果的请求计数
    pub fn outcome_count(&self, outcome: &str) -> u64 {
        self.understand_total.with_label_values(&[outcome]).get()
    }

    /// 某个结果的语言模型调用计数
    pub fn llm_count(&self, outcome: &str) -> u64 {
        self.llm_calls_total.with_label_values(&[outcome]).get()
    }

    /// 生成 Prometheus 文本格式
    pub fn gather(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| AppError::Internal(e.to_string()))
    }
}

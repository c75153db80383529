//! 可观测性模块
//!
//! 提供 Prometheus 指标、结构化日志和健康检查。

pub mod metrics;

pub use metrics::EngineMetrics;

use async_trait::async_trait;
use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::config::LoggingConfig;

const MAX_HEALTH_CHECKS: usize = 10;

// ===== Health Check =====

/// 健康检查状态
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: f64,
    pub checks: Vec<HealthCheck>,
}

/// 单个健康检查项
#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    pub message: Option<String>,
    pub latency_ms: Option<u64>,
}

/// 健康检查结果
#[derive(Debug, Clone)]
pub struct HealthCheckResult {
    pub name: String,
    pub healthy: bool,
    pub message: String,
    pub latency_ms: u64,
}

fn status_label(healthy: bool) -> String {
    let label = if healthy { "healthy" } else { "unhealthy" };
    label.to_string()
}

/// 依赖检查，每次健康/就绪请求时执行
#[async_trait]
pub trait DependencyCheck: Send + Sync {
    async fn check(&self) -> HealthCheckResult;
}

/// 可观测性状态
#[derive(Clone)]
pub struct ObservabilityState {
    pub metrics: Arc<EngineMetrics>,
    pub health_checks: Arc<Mutex<Vec<HealthCheckResult>>>,
    dependencies: Vec<Arc<dyn DependencyCheck>>,
    pub start_time: DateTime<Utc>,
    pub version: String,
}

impl ObservabilityState {
    pub fn new(version: String, metrics: Arc<EngineMetrics>) -> Self {
        Self {
            metrics,
            health_checks: Arc::new(Mutex::new(Vec::new())),
            dependencies: Vec::new(),
            start_time: Utc::now(),
            version,
        }
    }

    /// 注册依赖检查
    pub fn with_dependency(mut self, dependency: Arc<dyn DependencyCheck>) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// 重新执行所有依赖检查并记录结果
    pub async fn refresh(&self) {
        for dependency in &self.dependencies {
            let result = dependency.check().await;
            if !result.healthy {
                tracing::warn!("Health check {} failed: {}", result.name, result.message);
            }
            self.add_health_check(result).await;
        }
    }

    /// 添加健康检查结果（同名检查覆盖旧结果）
    pub async fn add_health_check(&self, result: HealthCheckResult) {
        let mut checks = self.health_checks.lock().await;
        checks.retain(|c| c.name != result.name);
        checks.push(result);
        if checks.len() > MAX_HEALTH_CHECKS {
            checks.remove(0);
        }
    }

    /// 获取应用正常运行时间
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.start_time).num_seconds() as f64
    }
}

// ===== Health Check Handlers =====

/// 获取完整健康状态
pub async fn health_check(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    state.refresh().await;
    let checks = state.health_checks.lock().await;
    let all_healthy = checks.iter().all(|c| c.healthy);

    let health_status = HealthStatus {
        status: status_label(all_healthy),
        timestamp: Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.uptime_seconds(),
        checks: checks
            .iter()
            .map(|c| HealthCheck {
                name: c.name.clone(),
                status: status_label(c.healthy),
                message: Some(c.message.clone()),
                latency_ms: Some(c.latency_ms),
            })
            .collect(),
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(health_status))
}

/// 简单存活检查
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// 就绪检查（检查依赖服务）
pub async fn readiness(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    state.refresh().await;
    let checks = state.health_checks.lock().await;
    if checks.iter().all(|c| c.healthy) {
        (StatusCode::OK, "Ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Not Ready")
    }
}

/// Prometheus 指标端点
pub async fn metrics(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    match state.metrics.gather() {
        Ok(output) => (StatusCode::OK, output),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// 版本信息端点
pub async fn version(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "version": state.version,
        "uptime_seconds": state.uptime_seconds(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// 创建可观测性路由
pub fn create_observability_router(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .route("/metrics", get(metrics))
        .route("/version", get(version))
        .with_state(state)
}

// ===== Structured Logging =====

/// 初始化结构化日志
///
/// `RUST_LOG` 优先于配置中的级别；配置了 `log_dir` 时按天滚动写入文件，
/// 返回的 guard 必须在进程生命周期内保持存活。
pub fn init_tracing(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (writer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, &config.file_prefix);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(writer);

    let installed = if config.structured {
        builder.json().try_init()
    } else {
        builder.with_line_number(true).try_init()
    };
    if let Err(e) = installed {
        eprintln!("tracing subscriber already installed: {}", e);
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn state() -> Arc<ObservabilityState> {
        Arc::new(ObservabilityState::new(
            "0.1.0".to_string(),
            Arc::new(EngineMetrics::new().unwrap()),
        ))
    }

    #[tokio::test]
    async fn test_liveness() {
        let response = create_observability_router(state())
            .oneshot(Request::builder().uri("/health/live").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_follows_checks() {
        let state = state();
        state
            .add_health_check(HealthCheckResult {
                name: "classification_cache".into(),
                healthy: false,
                message: "connection refused".into(),
                latency_ms: 3,
            })
            .await;

        let router = create_observability_router(state.clone());
        let response = router
            .clone()
            .oneshot(Request::builder().uri("/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        state
            .add_health_check(HealthCheckResult {
                name: "classification_cache".into(),
                healthy: true,
                message: "memory".into(),
                latency_ms: 0,
            })
            .await;
        let response = router
            .oneshot(Request::builder().uri("/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.health_checks.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let state = state();
        state.metrics.record_outcome("classified");
        let response = create_observability_router(state)
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

// ==========================================
// 生产工单预测风险引擎 - 核心库
// ==========================================
// 系统定位: 决策支持核心 (风险评分/完工预测/异常检测)
// 边界: 取数/持久化/HTTP/界面由外部宿主负责,
//       本库只对内存实体做纯函数计算
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 引擎参数
pub mod config;

// 错误类型
pub mod error;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AlertSeverity, AnomalyType, IssueSeverity, JobStatus, RiskReason};

// 领域实体
pub use domain::{AnomalyAlert, Issue, Job, JobSnapshot, PredictionResult, WorkCenterMetric};

// 引擎
pub use engine::{
    AnomalyDetector, CompletionForecaster, ImmediateIssueDetector, JobEvaluation, JobTelemetry,
    PredictionOrchestrator, RiskScore, RiskScorer,
};

// 配置与错误
pub use config::{AnomalyParams, EngineParams, ForecastParams};
pub use error::{EngineError, EngineResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "生产工单预测风险引擎";

// ==========================================
// 预编译检查
// ==========================================

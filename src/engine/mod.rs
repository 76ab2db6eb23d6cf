// ==========================================
// 生产工单预测风险引擎 - 引擎层
// ==========================================
// 依据: Predictive_Engine_Specs_v0.2.md - 1~6. 引擎体系
// ==========================================
// 职责: 实现预测/评分/检测规则,纯函数无 I/O
// 红线: Engine 不读存储不读时钟, 所有规则必须输出 reason
// ==========================================

pub mod anomaly;
pub mod forecast;
pub mod issues;
pub mod orchestrator;
pub mod risk;
pub mod stats;

// 重导出核心引擎
pub use anomaly::AnomalyDetector;
pub use forecast::CompletionForecaster;
pub use issues::ImmediateIssueDetector;
pub use orchestrator::{JobEvaluation, JobTelemetry, PredictionOrchestrator};
pub use risk::{RiskScore, RiskScorer};

// ==========================================
// 生产工单预测风险引擎 - 领域模型层
// ==========================================
// 依据: Predictive_Engine_Specs_v0.2.md - 主实体定义
// ==========================================
// 职责: 定义领域实体、类型、基础业务规则
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod alert;
pub mod forecast;
pub mod job;
pub mod types;
pub mod work_center;

// 重导出核心类型
pub use alert::{AnomalyAlert, Issue};
pub use forecast::{PredictionResult, METHOD_VELOCITY};
pub use job::{Job, JobSnapshot};
pub use types::{AlertSeverity, AnomalyType, IssueSeverity, JobStatus, RiskReason};
pub use work_center::WorkCenterMetric;

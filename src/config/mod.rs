// ==========================================
// 生产工单预测风险引擎 - 配置层
// ==========================================
// 依据: Predictive_Engine_Specs_v0.2.md - 5. 配置项全集
// ==========================================
// 职责: 引擎参数管理 (默认值 + 校验)
// ==========================================

pub mod engine_params;

// 重导出核心配置类型
pub use engine_params::{defaults, AnomalyParams, EngineParams, ForecastParams};

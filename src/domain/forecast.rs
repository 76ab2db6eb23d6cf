// ==========================================
// 生产工单预测风险引擎 - 完工预测领域模型
// ==========================================
// 依据: Predictive_Engine_Specs_v0.2.md - 2. Completion Forecaster
// ==========================================
// 职责: 预测结果实体 (引擎纯输出,不持久化)
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 预测方法标识: 基于进度速度的线性外推
pub const METHOD_VELOCITY: &str = "velocity";

// ==========================================
// PredictionResult - 完工预测结果
// ==========================================
// confidence_score ∈ [0,1]; basis 为人类可读解释,
// 供审计/界面展示,不做机器解析
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub method: String,                                  // 预测方法
    pub predicted_completion_date: Option<DateTime<Utc>>, // 预计完工时间
    pub predicted_lateness_days: i64,                    // 预计逾期天数 (≥0)
    pub confidence_score: f64,                           // 置信度 [0,1]
    pub basis: String,                                   // 计算依据 (可解释性)
}

impl PredictionResult {
    /// 工单已完工 (剩余工作量 ≤ 0)
    pub fn already_complete(as_of: DateTime<Utc>) -> Self {
        Self {
            method: METHOD_VELOCITY.to_string(),
            predicted_completion_date: Some(as_of),
            predicted_lateness_days: 0,
            confidence_score: 1.0,
            basis: "Already complete (no remaining work)".to_string(),
        }
    }

    /// 数据不足,无法预测 (降级为低置信度,不报错)
    pub fn degraded(confidence_score: f64, basis: impl Into<String>) -> Self {
        Self {
            method: METHOD_VELOCITY.to_string(),
            predicted_completion_date: None,
            predicted_lateness_days: 0,
            confidence_score,
            basis: basis.into(),
        }
    }
}

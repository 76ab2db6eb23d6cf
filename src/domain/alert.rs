// ==========================================
// 生产工单预测风险引擎 - 预警领域模型
// ==========================================
// 依据: Predictive_Engine_Specs_v0.2.md - 3/4. 预警输出
// ==========================================
// 职责: 异常预警与即时问题实体 (引擎纯输出)
// 红线: 引擎不做跨调用去重,预警生命周期由调用方管理
// ==========================================

use crate::domain::types::{AlertSeverity, AnomalyType, IssueSeverity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// AnomalyAlert - 工作中心异常预警
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyAlert {
    pub alert_type: AnomalyType,   // 异常类型
    pub work_center: String,       // 工作中心代码
    pub severity: AlertSeverity,   // 严重度
    pub message: String,           // 预警消息 (可解释性)

    // ===== 检测依据 =====
    pub metric_value: f64,         // 最新观测值
    pub historical_baseline: f64,  // 历史基线 (窗口均值)
    pub deviation_percent: f64,    // 偏离百分比

    // ===== 元数据 =====
    pub detected_at: DateTime<Utc>, // 检测基准时间 (由调用方传入)
}

// ==========================================
// Issue - 即时问题
// ==========================================
// 快速规则检查输出,用于实时/低成本评估场景
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub issue: String,           // 问题描述
    pub severity: IssueSeverity, // 严重度
}

impl Issue {
    /// 构造严重问题
    pub fn critical(issue: impl Into<String>) -> Self {
        Self {
            issue: issue.into(),
            severity: IssueSeverity::Critical,
        }
    }

    /// 构造警告问题
    pub fn warning(issue: impl Into<String>) -> Self {
        Self {
            issue: issue.into(),
            severity: IssueSeverity::Warning,
        }
    }
}

// ==========================================
// 生产工单预测风险引擎 - 工单领域模型
// ==========================================
// 依据: Predictive_Engine_Specs_v0.2.md - 主实体定义
// ==========================================
// 职责: 工单与进度快照实体,基础业务规则
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

use crate::domain::types::{JobStatus, RiskReason};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 一天的秒数,用于带小数的天数换算
pub(crate) const SECONDS_PER_DAY: f64 = 86_400.0;

// ==========================================
// Job - 生产工单
// ==========================================
// 由导入/存储层持有;引擎只读取并计算派生字段
// (risk_score, risk_reason),不负责持久化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub job_id: String,                     // 工单号
    pub due_date: Option<DateTime<Utc>>,    // 交期 (上游解析失败时为 None)
    pub status: JobStatus,                  // 工单状态
    pub remaining_work: f64,                // 剩余工作量 (小时)

    // ===== 派生字段 (由引擎计算) =====
    pub risk_score: i32,                    // 风险评分 [0,100]
    pub risk_reason: Option<RiskReason>,    // 风险原因
}

impl Job {
    /// 距交期天数 (向下取整)
    ///
    /// # 返回
    /// - `Some(n)`: n < 0 表示已超期 n 天
    /// - `None`: 交期缺失 (上游解析失败),视为"无紧急信号"
    pub fn days_until_due(&self, as_of: DateTime<Utc>) -> Option<i64> {
        let due = self.due_date?;
        let days = (due - as_of).num_seconds() as f64 / SECONDS_PER_DAY;
        Some(days.floor() as i64)
    }

    /// 剩余工作量 (负值钳制为 0)
    ///
    /// 上游数据质量问题不在引擎侧报错,钳制后继续计算
    pub fn remaining_work_clamped(&self) -> f64 {
        if self.remaining_work.is_finite() && self.remaining_work > 0.0 {
            self.remaining_work
        } else {
            0.0
        }
    }
}

// ==========================================
// JobSnapshot - 工单进度快照
// ==========================================
// 由外部定时记录器 (约15分钟一次) 写入,写入后不可变
// 多条快照按 snapshot_date 构成时间序列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub snapshot_date: DateTime<Utc>, // 快照时间
    pub hours_to_go: f64,             // 剩余工时
    pub qty_completed: f64,           // 已完成数量
    pub status: String,               // 快照时工单状态 (原始字符串)
}

impl JobSnapshot {
    /// 两个快照之间的天数 (带小数)
    pub fn days_since(&self, earlier: &JobSnapshot) -> f64 {
        (self.snapshot_date - earlier.snapshot_date).num_seconds() as f64 / SECONDS_PER_DAY
    }

    /// 两个快照之间完成的工时 (earlier → self)
    pub fn hours_completed_since(&self, earlier: &JobSnapshot) -> f64 {
        earlier.hours_to_go - self.hours_to_go
    }
}

// ==========================================
// 生产工单预测风险引擎 - 风险评分引擎
// ==========================================
// 依据: Predictive_Engine_Specs_v0.2.md - 1. Risk Scorer
// ==========================================
// 职责: 交期紧迫度 + 产能压力 → 综合风险评分 [0,100]
// 输入: 工单 + 评估基准时间 + 可用产能 (可选)
// 输出: 风险评分 + 风险原因 (可解释)
// 红线: 无错误通道,交期缺失降级为"无紧急信号"
// ==========================================

use crate::domain::job::Job;
use crate::domain::types::RiskReason;
use chrono::{DateTime, Utc};
use serde_json::json;

// ==========================================
// 评分常量
// ==========================================

/// 交期紧迫度阶梯: (距交期天数上限, 得分)
/// 命中第一个满足 days ≤ 上限 的档位
const DUE_SCORE_LADDER: [(i64, i32); 5] = [(0, 60), (3, 50), (7, 40), (14, 25), (30, 10)];

/// 产能压力得分上限
const CAPACITY_SCORE_CAP: i32 = 40;

/// 产能压力斜率: 每超载 100% 加 40 分
const CAPACITY_SCORE_SLOPE: f64 = 40.0;

// ==========================================
// RiskScore - 评分结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RiskScore {
    pub value: i32,         // 综合评分 [0,100]
    pub reason: RiskReason, // 主导原因
    pub detail: String,     // 评分明细 (JSON, 可解释性)
}

// ==========================================
// RiskScorer - 风险评分引擎
// ==========================================
#[derive(Debug)]
pub struct RiskScorer {
    // 无状态引擎,不需要注入依赖
}

impl RiskScorer {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算综合风险评分
    ///
    /// # 参数
    /// - `job`: 工单
    /// - `as_of`: 评估基准时间 (引擎内不读系统时钟)
    /// - `available_capacity`: 可用产能 (工时); None 或 ≤0 时不计产能压力
    ///
    /// # 返回
    /// 评分 [0,100],总是返回数值,不报错
    pub fn score(&self, job: &Job, as_of: DateTime<Utc>, available_capacity: Option<f64>) -> i32 {
        self.assess(job, as_of, available_capacity).value
    }

    /// 计算综合风险评分并输出原因
    ///
    /// # 规则
    /// - 交期紧迫度与产能压力独立封顶后相加,整体钳制到 [0,100]
    /// - 原因优先级: 已超期 > 产能过载 > 临近交期 > 正常
    pub fn assess(
        &self,
        job: &Job,
        as_of: DateTime<Utc>,
        available_capacity: Option<f64>,
    ) -> RiskScore {
        let days_until_due = job.days_until_due(as_of);

        let due_score = Self::due_score(days_until_due);
        let capacity_score = Self::capacity_score(job.remaining_work_clamped(), available_capacity);

        let value = (due_score + capacity_score).clamp(0, 100);

        // 原因判定 (优先级递减)
        let reason = match days_until_due {
            Some(d) if d <= 0 => RiskReason::PastDue,
            _ if capacity_score > 0 => RiskReason::CapacityOverload,
            _ if due_score > 0 => RiskReason::DueSoon,
            _ => RiskReason::OnTrack,
        };

        let detail = json!({
            "score": value,
            "reason": reason.to_string(),
            "due_score": due_score,
            "capacity_score": capacity_score,
            "days_until_due": days_until_due,
            "remaining_work": job.remaining_work_clamped(),
            "available_capacity": available_capacity,
        })
        .to_string();

        RiskScore {
            value,
            reason,
            detail,
        }
    }

    // ==========================================
    // 子评分 (依据 Predictive_Engine_Specs 1.1/1.2)
    // ==========================================

    /// 交期紧迫度得分 (阶梯函数)
    ///
    /// # 边界
    /// - 交期缺失 (上游解析失败) → 0 分,视为无紧急信号而非错误
    fn due_score(days_until_due: Option<i64>) -> i32 {
        let days = match days_until_due {
            Some(d) => d,
            None => return 0,
        };

        for (limit, score) in DUE_SCORE_LADDER {
            if days <= limit {
                return score;
            }
        }
        0
    }

    /// 产能压力得分
    ///
    /// # 规则
    /// - 仅当 available_capacity > 0 时计算
    /// - load_ratio = remaining_work / available_capacity
    /// - 负载不超产能不扣分,超载后按比例加分,封顶 40
    fn capacity_score(remaining_work: f64, available_capacity: Option<f64>) -> i32 {
        let capacity = match available_capacity {
            Some(c) if c > 0.0 && c.is_finite() => c,
            _ => return 0,
        };

        let load_ratio = remaining_work / capacity;
        let raw = ((load_ratio - 1.0) * CAPACITY_SCORE_SLOPE).round() as i64;

        (raw.clamp(0, CAPACITY_SCORE_CAP as i64)) as i32
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new()
    }
}

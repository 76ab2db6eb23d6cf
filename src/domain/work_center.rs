// ==========================================
// 生产工单预测风险引擎 - 工作中心领域模型
// ==========================================
// 依据: Predictive_Engine_Specs_v0.2.md - 主实体定义
// ==========================================
// 职责: 工作中心周期性指标实体
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// WorkCenterMetric - 工作中心指标
// ==========================================
// 每个工作中心一条时间序列,由外部定时记录器写入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkCenterMetric {
    pub metric_date: DateTime<Utc>, // 采集时间

    // ===== 性能指标 =====
    pub throughput: f64,  // 产出速率 (完成量/单位时间)
    pub queue_depth: i32, // 排队深度 (件)
    pub scrap_rate: f64,  // 废品率 [0,1]
}

impl WorkCenterMetric {
    /// 产出速率是否为有效观测值
    ///
    /// 0 视为缺失: 未记录任何完成的采集周期与漏采不可区分
    pub fn has_throughput_reading(&self) -> bool {
        self.throughput.is_finite() && self.throughput > 0.0
    }

    /// 废品率是否为有效观测值 (0 是有意义的取值)
    pub fn has_scrap_reading(&self) -> bool {
        self.scrap_rate.is_finite() && self.scrap_rate >= 0.0
    }
}

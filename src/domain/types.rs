// ==========================================
// 生产工单预测风险引擎 - 领域类型定义
// ==========================================
// 依据: Predictive_Engine_Specs_v0.2.md - 0. 类型体系
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 工单状态 (Job Status)
// ==========================================
// 由上游 ERP 导入层规范化,序列化格式与数据库一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Open,       // 已开立
    InProgress, // 加工中
    OnHold,     // 暂停
    Late,       // 已逾期
    Closed,     // 已完工
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Open => write!(f, "OPEN"),
            JobStatus::InProgress => write!(f, "IN_PROGRESS"),
            JobStatus::OnHold => write!(f, "ON_HOLD"),
            JobStatus::Late => write!(f, "LATE"),
            JobStatus::Closed => write!(f, "CLOSED"),
        }
    }
}

impl JobStatus {
    /// 从字符串解析工单状态 (宽松匹配,未知值回退为 Open)
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().replace('-', "_").as_str() {
            "OPEN" => JobStatus::Open,
            "IN_PROGRESS" => JobStatus::InProgress,
            "ON_HOLD" => JobStatus::OnHold,
            "LATE" => JobStatus::Late,
            "CLOSED" => JobStatus::Closed,
            _ => JobStatus::Open, // 默认值
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            JobStatus::Open => "OPEN",
            JobStatus::InProgress => "IN_PROGRESS",
            JobStatus::OnHold => "ON_HOLD",
            JobStatus::Late => "LATE",
            JobStatus::Closed => "CLOSED",
        }
    }
}

// ==========================================
// 风险原因 (Risk Reason)
// ==========================================
// 依据: Predictive_Engine_Specs 1. Risk Scorer
// 红线: 每个评分必须输出可解释的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskReason {
    PastDue,          // 已超期
    CapacityOverload, // 产能过载
    DueSoon,          // 临近交期
    OnTrack,          // 正常
}

impl fmt::Display for RiskReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskReason::PastDue => write!(f, "PAST_DUE"),
            RiskReason::CapacityOverload => write!(f, "CAPACITY_OVERLOAD"),
            RiskReason::DueSoon => write!(f, "DUE_SOON"),
            RiskReason::OnTrack => write!(f, "ON_TRACK"),
        }
    }
}

impl RiskReason {
    /// 从字符串解析风险原因
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "PAST_DUE" => RiskReason::PastDue,
            "CAPACITY_OVERLOAD" => RiskReason::CapacityOverload,
            "DUE_SOON" => RiskReason::DueSoon,
            _ => RiskReason::OnTrack, // 默认值
        }
    }
}

// ==========================================
// 异常类型 (Anomaly Type)
// ==========================================
// 依据: Predictive_Engine_Specs 3. Anomaly Detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyType {
    Slowdown,       // 产出放缓
    QueueBuildup,   // 队列积压
    UnusualPattern, // 异常模式 (废品率)
}

impl fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalyType::Slowdown => write!(f, "SLOWDOWN"),
            AnomalyType::QueueBuildup => write!(f, "QUEUE_BUILDUP"),
            AnomalyType::UnusualPattern => write!(f, "UNUSUAL_PATTERN"),
        }
    }
}

// ==========================================
// 预警严重度 (Alert Severity)
// ==========================================
// 顺序: Low < Medium < High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertSeverity {
    Low,    // 提示
    Medium, // 关注
    High,   // 紧急
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Low => write!(f, "LOW"),
            AlertSeverity::Medium => write!(f, "MEDIUM"),
            AlertSeverity::High => write!(f, "HIGH"),
        }
    }
}

// ==========================================
// 问题严重度 (Issue Severity)
// ==========================================
// 依据: Predictive_Engine_Specs 4. Immediate Issue Detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueSeverity {
    Warning,  // 警告
    Critical, // 严重
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueSeverity::Warning => write!(f, "WARNING"),
            IssueSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

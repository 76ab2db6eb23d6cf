// ==========================================
// 生产工单预测风险引擎 - 即时问题检测引擎
// ==========================================
// 依据: Predictive_Engine_Specs_v0.2.md - 4. Immediate Issue Detector
// ==========================================
// 职责: 低成本确定性规则检查 (停滞/已逾期/临期压量)
// 输入: 工单 + 最新/前一快照 (最多两条,不需要完整历史)
// 输出: Issue 列表 (可同时命中多条,不去重)
// 说明: 适用于实时场景,不做速度建模
// ==========================================

use crate::domain::alert::Issue;
use crate::domain::job::{Job, JobSnapshot};
use crate::domain::types::JobStatus;
use chrono::{DateTime, Utc};

// ==========================================
// 规则阈值
// ==========================================

/// 停滞判定: 两快照最小间隔 (天)
const STALL_MIN_GAP_DAYS: f64 = 1.0;

/// 停滞判定: 低于此完成工时视为无进度
const STALL_PROGRESS_EPSILON_HOURS: f64 = 0.5;

/// 临期判定: 交期窗口 (天)
const EXPIRY_WINDOW_DAYS: i64 = 3;

/// 临期判定: 高于此剩余工时才报问题
const EXPIRY_MIN_REMAINING_HOURS: f64 = 10.0;

// ==========================================
// ImmediateIssueDetector - 即时问题检测引擎
// ==========================================
#[derive(Debug)]
pub struct ImmediateIssueDetector {
    // 无状态引擎,不需要注入依赖
}

impl ImmediateIssueDetector {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 检测工单即时问题
    ///
    /// # 参数
    /// - `job`: 工单
    /// - `latest`: 最新快照 (可缺失)
    /// - `previous`: 前一快照 (可缺失)
    /// - `as_of`: 评估基准时间
    ///
    /// # 规则 (互相独立,可同时命中)
    /// 1) 停滞: 两快照间隔 ≥1 天且完成工时 < 0.5
    /// 2) 已逾期: 工单状态为 LATE
    /// 3) 临期压量: 0 < 距交期 ≤3 天且剩余工时 > 10
    pub fn detect_issues(
        &self,
        job: &Job,
        latest: Option<&JobSnapshot>,
        previous: Option<&JobSnapshot>,
        as_of: DateTime<Utc>,
    ) -> Vec<Issue> {
        let mut issues = Vec::new();

        // 规则1: 停滞
        if let (Some(latest), Some(previous)) = (latest, previous) {
            let days_between = latest.days_since(previous);
            let hours_completed = latest.hours_completed_since(previous);

            if days_between >= STALL_MIN_GAP_DAYS
                && hours_completed < STALL_PROGRESS_EPSILON_HOURS
            {
                issues.push(Issue::critical(format!(
                    "No progress in {:.1} days - job stalled?",
                    days_between
                )));
            }
        }

        // 规则2: 已逾期
        if job.status == JobStatus::Late {
            let due_text = job
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "unknown".to_string());
            issues.push(Issue::critical(format!(
                "Job is already late (due {})",
                due_text
            )));
        }

        // 规则3: 临期压量
        if let Some(days_until_due) = job.days_until_due(as_of) {
            if days_until_due > 0
                && days_until_due <= EXPIRY_WINDOW_DAYS
                && job.remaining_work_clamped() > EXPIRY_MIN_REMAINING_HOURS
            {
                issues.push(Issue::critical(format!(
                    "Due in {} days with {:.1} hours of work remaining",
                    days_until_due,
                    job.remaining_work_clamped()
                )));
            }
        }

        issues
    }
}

impl Default for ImmediateIssueDetector {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::IssueSeverity;
    use chrono::{Duration, TimeZone};

    /// 基准时间: 2024-02-20 00:00 UTC
    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 20, 0, 0, 0).unwrap()
    }

    /// 创建基础工单模板
    fn base_job() -> Job {
        Job {
            job_id: "WO-3001".to_string(),
            due_date: Some(as_of() + Duration::days(30)),
            status: JobStatus::InProgress,
            remaining_work: 20.0,
            risk_score: 0,
            risk_reason: None,
        }
    }

    /// 创建进度快照
    fn snapshot(date: DateTime<Utc>, hours_to_go: f64) -> JobSnapshot {
        JobSnapshot {
            snapshot_date: date,
            hours_to_go,
            qty_completed: 0.0,
            status: "IN_PROGRESS".to_string(),
        }
    }

    // ==========================================
    // 规则1: 停滞
    // ==========================================

    #[test]
    fn test_stalled_job_detected() {
        // 场景: 相隔1天的两快照剩余工时相同 → 停滞
        let engine = ImmediateIssueDetector::new();
        let previous = snapshot(as_of() - Duration::days(1), 50.0);
        let latest = snapshot(as_of(), 50.0);

        let issues = engine.detect_issues(&base_job(), Some(&latest), Some(&previous), as_of());

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, IssueSeverity::Critical);
        assert!(issues[0].issue.contains("stalled"), "问题描述应包含停滞提示");
    }

    #[test]
    fn test_short_gap_not_stalled() {
        // 间隔 < 1 天 → 不判停滞 (快照周期内无进度属正常)
        let engine = ImmediateIssueDetector::new();
        let previous = snapshot(as_of() - Duration::hours(6), 50.0);
        let latest = snapshot(as_of(), 50.0);

        let issues = engine.detect_issues(&base_job(), Some(&latest), Some(&previous), as_of());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_progressing_job_not_stalled() {
        // 有进度 → 不判停滞
        let engine = ImmediateIssueDetector::new();
        let previous = snapshot(as_of() - Duration::days(1), 50.0);
        let latest = snapshot(as_of(), 44.0);

        let issues = engine.detect_issues(&base_job(), Some(&latest), Some(&previous), as_of());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_missing_snapshots_skip_stall_check() {
        // 缺快照 → 跳过停滞检查,不报错
        let engine = ImmediateIssueDetector::new();
        let latest = snapshot(as_of(), 50.0);

        assert!(engine
            .detect_issues(&base_job(), Some(&latest), None, as_of())
            .is_empty());
        assert!(engine
            .detect_issues(&base_job(), None, None, as_of())
            .is_empty());
    }

    // ==========================================
    // 规则2: 已逾期
    // ==========================================

    #[test]
    fn test_late_status_detected() {
        let engine = ImmediateIssueDetector::new();
        let mut job = base_job();
        job.status = JobStatus::Late;
        job.due_date = Some(as_of() - Duration::days(5));

        let issues = engine.detect_issues(&job, None, None, as_of());

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, IssueSeverity::Critical);
        assert!(issues[0].issue.contains("already late"));
        assert!(issues[0].issue.contains("2024-02-15"), "应引用交期");
    }

    #[test]
    fn test_late_status_without_due_date() {
        // 状态为 LATE 但交期缺失 → 仍报问题,引用 unknown
        let engine = ImmediateIssueDetector::new();
        let mut job = base_job();
        job.status = JobStatus::Late;
        job.due_date = None;

        let issues = engine.detect_issues(&job, None, None, as_of());
        assert_eq!(issues.len(), 1);
        assert!(issues[0].issue.contains("unknown"));
    }

    // ==========================================
    // 规则3: 临期压量
    // ==========================================

    #[test]
    fn test_expiring_soon_with_work_remaining() {
        let engine = ImmediateIssueDetector::new();
        let mut job = base_job();
        job.due_date = Some(as_of() + Duration::days(2));
        job.remaining_work = 18.0;

        let issues = engine.detect_issues(&job, None, None, as_of());

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, IssueSeverity::Critical);
        assert!(issues[0].issue.contains("2 days"));
        assert!(issues[0].issue.contains("18.0 hours"));
    }

    #[test]
    fn test_expiring_soon_little_work_ok() {
        // 剩余工时 ≤ 10 → 临期但可完成,不报
        let engine = ImmediateIssueDetector::new();
        let mut job = base_job();
        job.due_date = Some(as_of() + Duration::days(2));
        job.remaining_work = 8.0;

        assert!(engine.detect_issues(&job, None, None, as_of()).is_empty());
    }

    #[test]
    fn test_past_due_not_expiring_soon() {
        // 距交期 ≤ 0 → 不属于临期规则 (由逾期状态规则负责)
        let engine = ImmediateIssueDetector::new();
        let mut job = base_job();
        job.due_date = Some(as_of() - Duration::days(1));
        job.remaining_work = 50.0;

        assert!(engine.detect_issues(&job, None, None, as_of()).is_empty());
    }

    #[test]
    fn test_boundary_exactly_three_days() {
        // 边界: 正好3天 → 包含在内
        let engine = ImmediateIssueDetector::new();
        let mut job = base_job();
        job.due_date = Some(as_of() + Duration::days(3));
        job.remaining_work = 11.0;

        assert_eq!(engine.detect_issues(&job, None, None, as_of()).len(), 1);
    }

    // ==========================================
    // 组合场景
    // ==========================================

    #[test]
    fn test_multiple_issues_fire_together() {
        // 停滞 + 已逾期可同时命中,不去重
        let engine = ImmediateIssueDetector::new();
        let mut job = base_job();
        job.status = JobStatus::Late;
        job.due_date = Some(as_of() - Duration::days(2));

        let previous = snapshot(as_of() - Duration::days(2), 50.0);
        let latest = snapshot(as_of(), 49.9);

        let issues = engine.detect_issues(&job, Some(&latest), Some(&previous), as_of());

        assert_eq!(issues.len(), 2, "停滞与逾期应同时报出");
        assert!(issues.iter().any(|i| i.issue.contains("stalled")));
        assert!(issues.iter().any(|i| i.issue.contains("already late")));
    }
}

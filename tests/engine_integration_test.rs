// ==========================================
// 评估编排器端到端集成测试
// ==========================================
// 测试目标: 验证四引擎经编排器的组合行为
// 覆盖范围: 批量评估排序/预测联动/异常扫描/确定性
// ==========================================

use chrono::{DateTime, Duration, TimeZone, Utc};
use workorder_risk_engine::domain::types::{AnomalyType, IssueSeverity, JobStatus, RiskReason};
use workorder_risk_engine::domain::{Job, JobSnapshot, WorkCenterMetric};
use workorder_risk_engine::{EngineParams, JobTelemetry, PredictionOrchestrator};

// ==========================================
// 测试辅助函数
// ==========================================

/// 基准时间: 2024-02-20 12:00 UTC
fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 20, 12, 0, 0).unwrap()
}

/// 创建测试用的工单
fn create_test_job(
    job_id: &str,
    status: JobStatus,
    due_in_days: i64,
    remaining_work: f64,
) -> Job {
    Job {
        job_id: job_id.to_string(),
        due_date: Some(as_of() + Duration::days(due_in_days)),
        status,
        remaining_work,
        risk_score: 0,
        risk_reason: None,
    }
}

/// 创建稳定推进的快照序列 (每天 velocity 工时)
fn steady_snapshots(start_hours: f64, velocity: f64, days: i64) -> Vec<JobSnapshot> {
    (0..days)
        .map(|i| JobSnapshot {
            snapshot_date: as_of() - Duration::days(days - i),
            hours_to_go: start_hours - velocity * i as f64,
            qty_completed: velocity * i as f64,
            status: "IN_PROGRESS".to_string(),
        })
        .collect()
}

/// 创建测试用的工作中心指标
fn create_test_metric(days_back: i64, throughput: f64, queue_depth: i32) -> WorkCenterMetric {
    WorkCenterMetric {
        metric_date: as_of() - Duration::days(days_back),
        throughput,
        queue_depth,
        scrap_rate: 0.02,
    }
}

// ==========================================
// 测试用例 1: 批量评估 - 全景场景
// ==========================================

#[test]
fn test_batch_evaluation_end_to_end() {
    println!("\n=== 测试：批量评估全景 ===");

    let orchestrator = PredictionOrchestrator::new();

    // 工单A: 已逾期 + 停滞 (高风险)
    let stalled_snapshots = vec![
        JobSnapshot {
            snapshot_date: as_of() - Duration::days(2),
            hours_to_go: 40.0,
            qty_completed: 10.0,
            status: "LATE".to_string(),
        },
        JobSnapshot {
            snapshot_date: as_of() - Duration::days(1),
            hours_to_go: 40.0,
            qty_completed: 10.0,
            status: "LATE".to_string(),
        },
    ];
    let late_job = JobTelemetry {
        job: create_test_job("WO-LATE", JobStatus::Late, -3, 40.0),
        snapshots: stalled_snapshots,
        available_capacity: None,
    };

    // 工单B: 产能过载 (中高风险)
    let overloaded_job = JobTelemetry {
        job: create_test_job("WO-OVERLOAD", JobStatus::InProgress, 15, 50.0),
        snapshots: steady_snapshots(60.0, 2.0, 6),
        available_capacity: Some(20.0),
    };

    // 工单C: 稳定推进 (低风险)
    let healthy_job = JobTelemetry {
        job: create_test_job("WO-HEALTHY", JobStatus::InProgress, 60, 10.0),
        snapshots: steady_snapshots(40.0, 5.0, 6),
        available_capacity: Some(100.0),
    };

    let inputs = vec![healthy_job, late_job, overloaded_job];
    let evaluations = orchestrator.evaluate_jobs(&inputs, as_of());

    // 排序契约: 风险降序
    let ids: Vec<&str> = evaluations.iter().map(|e| e.job_id.as_str()).collect();
    assert_eq!(ids, vec!["WO-OVERLOAD", "WO-LATE", "WO-HEALTHY"], "应按风险降序");

    // 工单A: 逾期原因 + 停滞/逾期问题
    let late_eval = evaluations.iter().find(|e| e.job_id == "WO-LATE").unwrap();
    assert_eq!(late_eval.risk_reason, RiskReason::PastDue);
    assert_eq!(late_eval.risk_score, 60);
    assert!(late_eval
        .issues
        .iter()
        .any(|i| i.issue.contains("stalled") && i.severity == IssueSeverity::Critical));
    assert!(late_eval.issues.iter().any(|i| i.issue.contains("already late")));
    assert!(late_eval.forecast.basis.contains("No progress detected"));

    // 工单B: 产能过载原因, 65分 (25交期 + 40产能封顶)
    let overload_eval = evaluations.iter().find(|e| e.job_id == "WO-OVERLOAD").unwrap();
    assert_eq!(overload_eval.risk_reason, RiskReason::CapacityOverload);
    assert_eq!(overload_eval.risk_score, 65);
    assert!(overload_eval.forecast.basis.contains("hrs/day"));

    // 工单C: 正常, 无问题, 预测置信度高
    let healthy_eval = evaluations.iter().find(|e| e.job_id == "WO-HEALTHY").unwrap();
    assert_eq!(healthy_eval.risk_score, 0);
    assert_eq!(healthy_eval.risk_reason, RiskReason::OnTrack);
    assert!(healthy_eval.issues.is_empty());
    assert!(healthy_eval.forecast.confidence_score > 0.7);
    assert_eq!(healthy_eval.forecast.predicted_lateness_days, 0);
}

// ==========================================
// 测试用例 2: 评分明细可解释
// ==========================================

#[test]
fn test_risk_detail_is_structured() {
    println!("\n=== 测试：评分明细 JSON ===");

    let orchestrator = PredictionOrchestrator::new();
    let input = JobTelemetry {
        job: create_test_job("WO-DETAIL", JobStatus::InProgress, 5, 30.0),
        snapshots: Vec::new(),
        available_capacity: Some(10.0),
    };

    let evaluation = orchestrator.evaluate_job(&input, as_of());

    let detail: serde_json::Value = serde_json::from_str(&evaluation.risk_detail).unwrap();
    assert_eq!(detail["score"], evaluation.risk_score);
    assert_eq!(detail["reason"], evaluation.risk_reason.to_string());
}

// ==========================================
// 测试用例 3: 工作中心批量扫描
// ==========================================

#[test]
fn test_work_center_scan() {
    println!("\n=== 测试：工作中心扫描 ===");

    let mut params = EngineParams::default();
    params.anomaly.std_dev_threshold = 1.0;
    let orchestrator = PredictionOrchestrator::with_params(params).unwrap();

    // WC-A: 产出崩跌; WC-B: 正常; WC-C: 数据不足
    let series = vec![
        (
            "WC-A".to_string(),
            vec![
                create_test_metric(30, 100.0, 5),
                create_test_metric(20, 95.0, 5),
                create_test_metric(10, 90.0, 5),
                create_test_metric(5, 50.0, 5),
            ],
        ),
        (
            "WC-B".to_string(),
            vec![
                create_test_metric(4, 100.0, 5),
                create_test_metric(3, 101.0, 5),
                create_test_metric(2, 99.0, 5),
                create_test_metric(1, 100.5, 5),
            ],
        ),
        ("WC-C".to_string(), vec![create_test_metric(1, 10.0, 50)]),
    ];

    let alerts = orchestrator.scan_work_centers(&series, as_of());

    assert_eq!(alerts.len(), 1, "仅 WC-A 应报警: {:?}", alerts);
    assert_eq!(alerts[0].work_center, "WC-A");
    assert_eq!(alerts[0].alert_type, AnomalyType::Slowdown);
}

// ==========================================
// 测试用例 4: 确定性 (纯函数律)
// ==========================================

#[test]
fn test_repeated_evaluation_is_identical() {
    println!("\n=== 测试：重复评估确定性 ===");

    let orchestrator = PredictionOrchestrator::new();
    let inputs = vec![
        JobTelemetry {
            job: create_test_job("WO-X", JobStatus::InProgress, 4, 25.0),
            snapshots: steady_snapshots(50.0, 3.0, 5),
            available_capacity: Some(20.0),
        },
        JobTelemetry {
            job: create_test_job("WO-Y", JobStatus::Late, -2, 5.0),
            snapshots: Vec::new(),
            available_capacity: None,
        },
    ];

    let a = orchestrator.evaluate_jobs(&inputs, as_of());
    let b = orchestrator.evaluate_jobs(&inputs, as_of());
    assert_eq!(a, b, "相同输入与基准时间应产生逐位一致的输出");
}

// ==========================================
// 测试用例 5: 参数校验
// ==========================================

#[test]
fn test_invalid_params_rejected() {
    println!("\n=== 测试：参数校验 ===");

    let mut params = EngineParams::default();
    params.forecast.lookback_days = -1;

    let err = PredictionOrchestrator::with_params(params).unwrap_err();
    assert!(err.to_string().contains("lookback_days"), "错误应指明字段");
}

// ==========================================
// 生产工单预测风险引擎 - 评估编排器
// ==========================================
// 依据: Predictive_Engine_Specs_v0.2.md - 6. 调用契约
// ==========================================
// 职责: 按批次驱动四个引擎,宿主层只做取数/展示
// 输入: 工单遥测包 + 工作中心指标序列 + 评估基准时间
// 输出: JobEvaluation 列表 (按风险评分降序) / 预警列表
// 红线: 编排器与引擎均为纯函数,不读存储不读时钟;
//       取数节奏/取消/限流由外部调度器负责
// ==========================================

use crate::config::EngineParams;
use crate::domain::alert::{AnomalyAlert, Issue};
use crate::domain::forecast::PredictionResult;
use crate::domain::job::{Job, JobSnapshot};
use crate::domain::types::RiskReason;
use crate::domain::work_center::WorkCenterMetric;
use crate::engine::anomaly::AnomalyDetector;
use crate::engine::forecast::CompletionForecaster;
use crate::engine::issues::ImmediateIssueDetector;
use crate::engine::risk::RiskScorer;
use crate::error::EngineResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

// ==========================================
// JobTelemetry - 工单遥测输入包
// ==========================================
// 由外部调度器从存储物化 (快照通常取最近 7-30 天)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobTelemetry {
    pub job: Job,                        // 工单
    pub snapshots: Vec<JobSnapshot>,     // 进度快照序列
    pub available_capacity: Option<f64>, // 可用产能 (工时)
}

// ==========================================
// JobEvaluation - 单工单评估结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobEvaluation {
    pub job_id: String,              // 工单号
    pub risk_score: i32,             // 风险评分 [0,100]
    pub risk_reason: RiskReason,     // 风险原因
    pub risk_detail: String,         // 评分明细 (JSON)
    pub forecast: PredictionResult,  // 完工预测
    pub issues: Vec<Issue>,          // 即时问题
}

// ==========================================
// PredictionOrchestrator - 评估编排器
// ==========================================
#[derive(Debug)]
pub struct PredictionOrchestrator {
    params: EngineParams,
    risk_scorer: RiskScorer,
    forecaster: CompletionForecaster,
    issue_detector: ImmediateIssueDetector,
    anomaly_detector: AnomalyDetector,
}

impl PredictionOrchestrator {
    /// 使用默认参数构造
    pub fn new() -> Self {
        // 默认参数恒为合法,无需校验
        Self {
            params: EngineParams::default(),
            risk_scorer: RiskScorer::new(),
            forecaster: CompletionForecaster::new(),
            issue_detector: ImmediateIssueDetector::new(),
            anomaly_detector: AnomalyDetector::new(),
        }
    }

    /// 使用自定义参数构造 (参数在此处一次性校验)
    pub fn with_params(params: EngineParams) -> EngineResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            risk_scorer: RiskScorer::new(),
            forecaster: CompletionForecaster::new(),
            issue_detector: ImmediateIssueDetector::new(),
            anomaly_detector: AnomalyDetector::new(),
        })
    }

    /// 当前生效参数
    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 评估单个工单 (风险评分 + 完工预测 + 即时问题)
    ///
    /// 即时问题检查取时间序最后两条快照
    pub fn evaluate_job(&self, telemetry: &JobTelemetry, as_of: DateTime<Utc>) -> JobEvaluation {
        let job = &telemetry.job;

        let risk = self
            .risk_scorer
            .assess(job, as_of, telemetry.available_capacity);

        let forecast = self.forecaster.forecast(
            job,
            &telemetry.snapshots,
            as_of,
            self.params.forecast.lookback_days,
        );

        let (latest, previous) = Self::last_two_snapshots(&telemetry.snapshots);
        let issues = self.issue_detector.detect_issues(job, latest, previous, as_of);

        JobEvaluation {
            job_id: job.job_id.clone(),
            risk_score: risk.value,
            risk_reason: risk.reason,
            risk_detail: risk.detail,
            forecast,
            issues,
        }
    }

    /// 批量评估工单,按风险评分降序返回
    ///
    /// 各工单评估互相独立,调用方可自行并行切分
    #[instrument(skip(self, inputs), fields(count = inputs.len()))]
    pub fn evaluate_jobs(
        &self,
        inputs: &[JobTelemetry],
        as_of: DateTime<Utc>,
    ) -> Vec<JobEvaluation> {
        let mut evaluations: Vec<JobEvaluation> = inputs
            .iter()
            .map(|telemetry| self.evaluate_job(telemetry, as_of))
            .collect();

        // 列表视图契约: 风险评分降序; 同分按工单号保证确定性
        evaluations.sort_by(|a, b| {
            b.risk_score
                .cmp(&a.risk_score)
                .then_with(|| a.job_id.cmp(&b.job_id))
        });

        evaluations
    }

    /// 批量扫描工作中心异常
    #[instrument(skip(self, series), fields(count = series.len()))]
    pub fn scan_work_centers(
        &self,
        series: &[(String, Vec<WorkCenterMetric>)],
        as_of: DateTime<Utc>,
    ) -> Vec<AnomalyAlert> {
        series
            .iter()
            .flat_map(|(work_center_id, metrics)| {
                self.anomaly_detector.detect(
                    work_center_id,
                    metrics,
                    as_of,
                    self.params.anomaly.lookback_days,
                    self.params.anomaly.std_dev_threshold,
                )
            })
            .collect()
    }

    // ==========================================
    // 内部工具
    // ==========================================

    /// 取时间序最后两条快照 (latest, previous)
    fn last_two_snapshots(snapshots: &[JobSnapshot]) -> (Option<&JobSnapshot>, Option<&JobSnapshot>) {
        let mut ordered: Vec<&JobSnapshot> = snapshots.iter().collect();
        ordered.sort_by_key(|s| s.snapshot_date);

        let latest = ordered.last().copied();
        let previous = ordered.len().checked_sub(2).map(|i| ordered[i]);
        (latest, previous)
    }
}

impl Default for PredictionOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

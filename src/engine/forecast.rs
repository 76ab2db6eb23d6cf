// ==========================================
// 生产工单预测风险引擎 - 完工预测引擎
// ==========================================
// 依据: Predictive_Engine_Specs_v0.2.md - 2. Completion Forecaster
// ==========================================
// 职责: 由近期进度速度线性外推完工时间
// 输入: 工单 + 进度快照序列 + 评估基准时间
// 输出: PredictionResult (预计完工/逾期/置信度/依据)
// 红线: 数据不足降级为低置信度,不报错;
//       除法前必须守卫分母
// ==========================================
// 选型说明: 离散工时的短窗口 (≤7天) 进度接近线性,
// 采用速度外推而非曲线拟合;置信度用逐日速度的
// 变异系数惩罚波动,无需回归模型
// ==========================================

use crate::domain::forecast::PredictionResult;
use crate::domain::job::{Job, JobSnapshot, SECONDS_PER_DAY};
use crate::engine::stats;
use chrono::{DateTime, Duration, Utc};
use tracing::instrument;

// ==========================================
// 判定常量
// ==========================================

/// 视为"有实质进度"的最小完成工时
const MIN_MEANINGFUL_PROGRESS_HOURS: f64 = 0.1;

/// 逐日速度样本 ≥2 时启用变异系数置信模型
const MIN_PAIRWISE_VELOCITIES: usize = 2;

/// 变异系数置信模型的下限
/// 保留 0.5 下限: 下游界面阈值依赖此行为
const CV_CONFIDENCE_FLOOR: f64 = 0.5;

/// 逐日速度样本不足时的默认置信度
const DEFAULT_CONFIDENCE: f64 = 0.8;

// ==========================================
// CompletionForecaster - 完工预测引擎
// ==========================================
#[derive(Debug)]
pub struct CompletionForecaster {
    // 无状态引擎,不需要注入依赖
}

impl CompletionForecaster {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 预测工单完工时间
    ///
    /// # 参数
    /// - `job`: 工单
    /// - `snapshots`: 进度快照 (顺序不限,引擎防御性排序)
    /// - `as_of`: 评估基准时间 (引擎内不读系统时钟)
    /// - `lookback_days`: 回看窗口 (天)
    ///
    /// # 规则 (顺序判定,命中即返回)
    /// 1) 剩余工作量 ≤ 0 → 已完工, 置信度 1.0
    /// 2) 窗口内快照 < 2 → 置信度 0.3, 无预测日期
    /// 3) 首末快照时间差为 0 → 置信度 0.2
    /// 4) 完成工时 < 0.1 → 无进度, 置信度 0.4
    /// 5) 速度 ≤ 0 → 同无进度
    /// 6) 外推完工时间, 逾期天数 = max(0, ceil(完工-交期));
    ///    外推超出时间类型可表示范围时降级, 置信度 0.4
    /// 7) 置信度 = max(0.5, 1 - min(CV, 1)), 样本不足时 0.8
    #[instrument(skip(self, job, snapshots), fields(job_id = %job.job_id, snapshots = snapshots.len()))]
    pub fn forecast(
        &self,
        job: &Job,
        snapshots: &[JobSnapshot],
        as_of: DateTime<Utc>,
        lookback_days: i64,
    ) -> PredictionResult {
        let remaining_work = job.remaining_work_clamped();

        // 规则1: 已完工
        if remaining_work <= 0.0 {
            return PredictionResult::already_complete(as_of);
        }

        // 规则2: 回看窗口过滤 (window_start, as_of] + 防御性排序
        let window_start = as_of - Duration::days(lookback_days);
        let mut window: Vec<&JobSnapshot> = snapshots
            .iter()
            .filter(|s| s.snapshot_date > window_start && s.snapshot_date <= as_of)
            .collect();
        window.sort_by_key(|s| s.snapshot_date);

        if window.len() < 2 {
            return PredictionResult::degraded(
                0.3,
                format!(
                    "Insufficient historical data ({} snapshots in {}-day window)",
                    window.len(),
                    lookback_days
                ),
            );
        }

        let first = window[0];
        let last = window[window.len() - 1];

        // 规则3: 时间差为0 (同刻快照)
        let days_between = last.days_since(first);
        if days_between <= 0.0 {
            return PredictionResult::degraded(
                0.2,
                "Snapshots too close together to measure velocity",
            );
        }

        // 规则4: 无实质进度
        let hours_completed = last.hours_completed_since(first);
        if hours_completed < MIN_MEANINGFUL_PROGRESS_HOURS {
            return PredictionResult::degraded(
                0.4,
                format!("No progress detected over {:.1} days", days_between),
            );
        }

        // 规则5: 速度守卫 (除法分母已在规则3保证 > 0)
        let velocity_per_day = hours_completed / days_between;
        if velocity_per_day <= 0.0 {
            return PredictionResult::degraded(
                0.4,
                format!("No progress detected over {:.1} days", days_between),
            );
        }

        // 规则6: 线性外推
        // 剩余量远超速度时秒数会越出 Duration/DateTime 的可表示范围,
        // 越界降级返回而不是恐慌
        let days_to_completion = remaining_work / velocity_per_day;
        let predicted_completion = match Duration::try_seconds(
            (days_to_completion * SECONDS_PER_DAY) as i64,
        )
        .and_then(|horizon| as_of.checked_add_signed(horizon))
        {
            Some(date) => date,
            None => {
                return PredictionResult::degraded(
                    0.4,
                    format!(
                        "Projected completion beyond forecastable range at {:.2} hrs/day",
                        velocity_per_day
                    ),
                );
            }
        };

        let predicted_lateness_days = match job.due_date {
            Some(due) => {
                let late_days =
                    (predicted_completion - due).num_seconds() as f64 / SECONDS_PER_DAY;
                (late_days.ceil() as i64).max(0)
            }
            // 交期缺失 → 无逾期信号
            None => 0,
        };

        // 规则7: 置信度
        let confidence_score = Self::confidence_from_window(&window);

        PredictionResult {
            method: crate::domain::forecast::METHOD_VELOCITY.to_string(),
            predicted_completion_date: Some(predicted_completion),
            predicted_lateness_days,
            confidence_score,
            basis: format!(
                "Velocity {:.2} hrs/day over {} snapshots spanning {:.1} days",
                velocity_per_day,
                window.len(),
                days_between
            ),
        }
    }

    // ==========================================
    // 置信度模型 (依据 Predictive_Engine_Specs 2.3)
    // ==========================================

    /// 由窗口内相邻快照的逐日速度计算置信度
    ///
    /// # 规则
    /// - 相邻快照两两计算速度,时间差为0的对跳过
    /// - 样本 ≥2: max(0.5, 1 - min(CV, 1)); 均值 ≤0 时 CV=1
    /// - 样本不足: 默认 0.8
    fn confidence_from_window(window: &[&JobSnapshot]) -> f64 {
        let mut pairwise_velocities = Vec::with_capacity(window.len().saturating_sub(1));

        for pair in window.windows(2) {
            let dt = pair[1].days_since(pair[0]);
            if dt > 0.0 {
                pairwise_velocities.push(pair[1].hours_completed_since(pair[0]) / dt);
            }
        }

        if pairwise_velocities.len() >= MIN_PAIRWISE_VELOCITIES {
            let cv = stats::coefficient_of_variation(&pairwise_velocities);
            (1.0 - cv.min(1.0)).max(CV_CONFIDENCE_FLOOR)
        } else {
            DEFAULT_CONFIDENCE
        }
    }
}

impl Default for CompletionForecaster {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 生产工单预测风险引擎 - 工作中心异常检测引擎
// ==========================================
// 依据: Predictive_Engine_Specs_v0.2.md - 3. Anomaly Detector
// ==========================================
// 职责: 对产出/队列/废品率做滚动基线阈值检测
// 输入: 工作中心指标序列 + 评估基准时间
// 输出: AnomalyAlert 列表 (0-3 条,互相独立)
// 红线: 数据点 < 3 的检查静默跳过 (冷启动不误报);
//       引擎不做跨调用去重
// ==========================================

use crate::domain::alert::AnomalyAlert;
use crate::domain::types::{AlertSeverity, AnomalyType};
use crate::domain::work_center::WorkCenterMetric;
use crate::engine::stats;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, instrument};

// ==========================================
// 检测阈值
// ==========================================

/// 每项检查的最小有效数据点数
const MIN_DATA_POINTS: usize = 3;

/// 队列趋势确认窗口: 末尾最多取5个点
const QUEUE_TREND_WINDOW: usize = 5;

/// 产出放缓: 偏离超过此百分比升级为 High
const SLOWDOWN_HIGH_DEVIATION_PCT: f64 = 30.0;

/// 队列积压: 偏离超过此百分比升级为 High
const QUEUE_HIGH_DEVIATION_PCT: f64 = 50.0;

/// 废品率: 绝对值超过此阈值升级为 High
const SCRAP_HIGH_ABSOLUTE: f64 = 0.10;

// ==========================================
// AnomalyDetector - 异常检测引擎
// ==========================================
#[derive(Debug)]
pub struct AnomalyDetector {
    // 无状态引擎,不需要注入依赖
}

impl AnomalyDetector {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 检测单个工作中心的异常指标
    ///
    /// # 参数
    /// - `work_center_id`: 工作中心代码
    /// - `metrics`: 指标序列 (顺序不限,引擎防御性排序)
    /// - `as_of`: 评估基准时间 (引擎内不读系统时钟)
    /// - `lookback_days`: 回看窗口 (天)
    /// - `std_dev_threshold`: 标准差阈值
    ///
    /// # 返回
    /// 0-3 条预警,三项检查互相独立
    #[instrument(skip(self, metrics), fields(work_center = %work_center_id, metrics = metrics.len()))]
    pub fn detect(
        &self,
        work_center_id: &str,
        metrics: &[WorkCenterMetric],
        as_of: DateTime<Utc>,
        lookback_days: i64,
        std_dev_threshold: f64,
    ) -> Vec<AnomalyAlert> {
        // 回看窗口过滤 + 防御性排序
        let window_start = as_of - Duration::days(lookback_days);
        let mut window: Vec<&WorkCenterMetric> = metrics
            .iter()
            .filter(|m| m.metric_date > window_start)
            .collect();
        window.sort_by_key(|m| m.metric_date);

        let mut alerts = Vec::new();

        if let Some(alert) = self.check_slowdown(work_center_id, &window, as_of, std_dev_threshold)
        {
            alerts.push(alert);
        }
        if let Some(alert) =
            self.check_queue_buildup(work_center_id, &window, as_of, std_dev_threshold)
        {
            alerts.push(alert);
        }
        if let Some(alert) =
            self.check_scrap_pattern(work_center_id, &window, as_of, std_dev_threshold)
        {
            alerts.push(alert);
        }

        for alert in &alerts {
            debug!(
                work_center = %alert.work_center,
                alert_type = %alert.alert_type,
                severity = %alert.severity,
                deviation_percent = alert.deviation_percent,
                "anomaly detected"
            );
        }

        alerts
    }

    // ==========================================
    // 检查1: 产出放缓 (Slowdown)
    // ==========================================

    /// 产出速率低于基线
    ///
    /// # 规则
    /// - 0/非数值视为漏采,过滤后需 ≥3 点
    /// - latest < mean - t·σ 且 σ > 0 时触发
    /// - 偏离 > 30% → High, 否则 Medium
    fn check_slowdown(
        &self,
        work_center_id: &str,
        window: &[&WorkCenterMetric],
        as_of: DateTime<Utc>,
        std_dev_threshold: f64,
    ) -> Option<AnomalyAlert> {
        let series: Vec<f64> = window
            .iter()
            .filter(|m| m.has_throughput_reading())
            .map(|m| m.throughput)
            .collect();

        if series.len() < MIN_DATA_POINTS {
            return None;
        }

        let latest = *series.last().expect("series 非空");
        let baseline = stats::mean(&series);
        let sigma = stats::std_dev(&series);

        if sigma <= 0.0 || latest >= baseline - std_dev_threshold * sigma {
            return None;
        }

        let deviation_percent = (baseline - latest) / baseline * 100.0;
        let severity = if deviation_percent > SLOWDOWN_HIGH_DEVIATION_PCT {
            AlertSeverity::High
        } else {
            AlertSeverity::Medium
        };

        Some(AnomalyAlert {
            alert_type: AnomalyType::Slowdown,
            work_center: work_center_id.to_string(),
            severity,
            message: format!(
                "Throughput slowdown on {}: latest {:.1} vs baseline {:.1} ({:.0}% below normal)",
                work_center_id, latest, baseline, deviation_percent
            ),
            metric_value: latest,
            historical_baseline: baseline,
            deviation_percent,
            detected_at: as_of,
        })
    }

    // ==========================================
    // 检查2: 队列积压 (Queue Buildup)
    // ==========================================

    /// 队列深度高于基线且持续上行
    ///
    /// # 规则
    /// - latest > mean + t·σ 且末尾 ≤5 点单调不降时触发
    ///   (趋势门: 已在回落的单点尖峰不报警)
    /// - 偏离 > 50% → High, 否则 Medium; 基线为0时偏离按100%计
    fn check_queue_buildup(
        &self,
        work_center_id: &str,
        window: &[&WorkCenterMetric],
        as_of: DateTime<Utc>,
        std_dev_threshold: f64,
    ) -> Option<AnomalyAlert> {
        let series: Vec<f64> = window.iter().map(|m| m.queue_depth as f64).collect();

        if series.len() < MIN_DATA_POINTS {
            return None;
        }

        let latest = *series.last().expect("series 非空");
        let baseline = stats::mean(&series);
        let sigma = stats::std_dev(&series);

        if latest <= baseline + std_dev_threshold * sigma {
            return None;
        }

        // 趋势门: 末尾 ≤5 点必须单调不降
        let tail_start = series.len().saturating_sub(QUEUE_TREND_WINDOW);
        let tail = &series[tail_start..];
        if tail.windows(2).any(|pair| pair[1] < pair[0]) {
            return None;
        }

        let deviation_percent = if baseline > 0.0 {
            (latest - baseline) / baseline * 100.0
        } else {
            100.0
        };
        let severity = if deviation_percent > QUEUE_HIGH_DEVIATION_PCT {
            AlertSeverity::High
        } else {
            AlertSeverity::Medium
        };

        Some(AnomalyAlert {
            alert_type: AnomalyType::QueueBuildup,
            work_center: work_center_id.to_string(),
            severity,
            message: format!(
                "Queue building up on {}: depth {:.0} vs baseline {:.1} ({:.0}% above normal)",
                work_center_id, latest, baseline, deviation_percent
            ),
            metric_value: latest,
            historical_baseline: baseline,
            deviation_percent,
            detected_at: as_of,
        })
    }

    // ==========================================
    // 检查3: 异常模式 (废品率)
    // ==========================================

    /// 废品率高于基线
    ///
    /// # 规则
    /// - 非数值过滤后需 ≥3 点 (0 是有效观测)
    /// - latest > mean + t·σ 时触发
    /// - 绝对值 > 10% → High, 否则 Medium
    fn check_scrap_pattern(
        &self,
        work_center_id: &str,
        window: &[&WorkCenterMetric],
        as_of: DateTime<Utc>,
        std_dev_threshold: f64,
    ) -> Option<AnomalyAlert> {
        let series: Vec<f64> = window
            .iter()
            .filter(|m| m.has_scrap_reading())
            .map(|m| m.scrap_rate)
            .collect();

        if series.len() < MIN_DATA_POINTS {
            return None;
        }

        let latest = *series.last().expect("series 非空");
        let baseline = stats::mean(&series);
        let sigma = stats::std_dev(&series);

        if latest <= baseline + std_dev_threshold * sigma {
            return None;
        }

        let deviation_percent = if baseline > 0.0 {
            (latest - baseline) / baseline * 100.0
        } else {
            100.0
        };
        let severity = if latest > SCRAP_HIGH_ABSOLUTE {
            AlertSeverity::High
        } else {
            AlertSeverity::Medium
        };

        Some(AnomalyAlert {
            alert_type: AnomalyType::UnusualPattern,
            work_center: work_center_id.to_string(),
            severity,
            message: format!(
                "Unusual scrap rate on {}: {:.1}% vs baseline {:.1}%",
                work_center_id,
                latest * 100.0,
                baseline * 100.0
            ),
            metric_value: latest,
            historical_baseline: baseline,
            deviation_percent,
            detected_at: as_of,
        })
    }
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new()
    }
}

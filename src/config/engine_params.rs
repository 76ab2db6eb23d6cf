// ==========================================
// 生产工单预测风险引擎 - 引擎参数配置
// ==========================================
// 依据: Predictive_Engine_Specs_v0.2.md - 5. 配置项全集
// ==========================================
// 职责: 引擎可调参数及默认值/校验
// 说明: 参数由宿主层填充 (配置表/环境),引擎不读存储
// ==========================================

use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

// ==========================================
// 默认参数
// ==========================================
pub mod defaults {
    /// 完工预测回看窗口 (天)
    pub const FORECAST_LOOKBACK_DAYS: i64 = 7;

    /// 异常检测回看窗口 (天)
    pub const ANOMALY_LOOKBACK_DAYS: i64 = 30;

    /// 异常检测标准差阈值
    pub const ANOMALY_STD_DEV_THRESHOLD: f64 = 2.0;
}

// ==========================================
// ForecastParams - 完工预测参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastParams {
    pub lookback_days: i64, // 回看窗口 (天)
}

impl Default for ForecastParams {
    fn default() -> Self {
        Self {
            lookback_days: defaults::FORECAST_LOOKBACK_DAYS,
        }
    }
}

// ==========================================
// AnomalyParams - 异常检测参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyParams {
    pub lookback_days: i64,     // 回看窗口 (天)
    pub std_dev_threshold: f64, // 标准差阈值
}

impl Default for AnomalyParams {
    fn default() -> Self {
        Self {
            lookback_days: defaults::ANOMALY_LOOKBACK_DAYS,
            std_dev_threshold: defaults::ANOMALY_STD_DEV_THRESHOLD,
        }
    }
}

// ==========================================
// EngineParams - 参数全集
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineParams {
    pub forecast: ForecastParams,
    pub anomaly: AnomalyParams,
}

impl EngineParams {
    /// 校验参数合法性
    ///
    /// # 规则
    /// - 回看窗口 ≥ 1 天
    /// - 标准差阈值为有限正数
    pub fn validate(&self) -> EngineResult<()> {
        if self.forecast.lookback_days < 1 {
            return Err(EngineError::FieldValueError {
                field: "forecast.lookback_days".to_string(),
                message: format!("必须 ≥ 1 天, 实际 {}", self.forecast.lookback_days),
            });
        }

        if self.anomaly.lookback_days < 1 {
            return Err(EngineError::FieldValueError {
                field: "anomaly.lookback_days".to_string(),
                message: format!("必须 ≥ 1 天, 实际 {}", self.anomaly.lookback_days),
            });
        }

        if !self.anomaly.std_dev_threshold.is_finite() || self.anomaly.std_dev_threshold <= 0.0 {
            return Err(EngineError::FieldValueError {
                field: "anomaly.std_dev_threshold".to_string(),
                message: format!("必须为有限正数, 实际 {}", self.anomaly.std_dev_threshold),
            });
        }

        Ok(())
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = EngineParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.forecast.lookback_days, 7);
        assert_eq!(params.anomaly.lookback_days, 30);
        assert_eq!(params.anomaly.std_dev_threshold, 2.0);
    }

    #[test]
    fn test_invalid_lookback_rejected() {
        let mut params = EngineParams::default();
        params.forecast.lookback_days = 0;

        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("forecast.lookback_days"), "错误应指明字段");
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let mut params = EngineParams::default();
        params.anomaly.std_dev_threshold = 0.0;
        assert!(params.validate().is_err());

        params.anomaly.std_dev_threshold = f64::NAN;
        assert!(params.validate().is_err());
    }
}

// ==========================================
// 生产工单预测风险引擎 - 统计工具
// ==========================================
// 依据: Predictive_Engine_Specs_v0.2.md - 0.3 统计约定
// ==========================================
// 职责: 预测/异常检测共用的均值、标准差、变异系数
// 约定: 标准差取总体口径 (除以 n),窗口即关注的总体
// ==========================================

/// 算术平均值 (空序列返回 0)
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// 总体标准差 (空序列返回 0)
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// 变异系数 (stddev / mean)
///
/// # 边界
/// - 均值 ≤ 0 → 返回 1.0 (视为完全不一致,置信度落到下限)
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let m = mean(values);
    if m <= 0.0 {
        return 1.0;
    }
    std_dev(values) / m
}

// ==========================================
// 生产工单预测风险引擎 - 日志系统
// ==========================================
// 工具: tracing + tracing-subscriber (EnvFilter)
// 说明: 初始化由宿主进程调用一次;引擎内部只打
//       结构化事件,不关心输出端
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 默认日志级别 (可被 RUST_LOG 覆盖)
const DEFAULT_LOG_LEVEL: &str = "info";

// ==========================================
// 输出格式
// ==========================================

/// 日志输出格式
///
/// 人读场景用 `Text`;接入日志采集管道时用 `Json`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// 从字符串解析输出格式 (宽松匹配,未知值回退为 Text)
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "JSON" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

// ==========================================
// 初始化入口
// ==========================================

/// 初始化日志系统 (文本格式)
///
/// # 环境变量
/// - RUST_LOG: 级别过滤器,默认 info
///   例如: RUST_LOG=debug 或 RUST_LOG=workorder_risk_engine=trace
///
/// # 示例
/// ```no_run
/// use workorder_risk_engine::logging;
/// logging::init();
/// ```
pub fn init() {
    init_with_format(LogFormat::Text);
}

/// 按指定输出格式初始化日志系统
///
/// 事件携带 target/文件/行号,便于定位引擎规则命中点
pub fn init_with_format(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// 初始化测试环境的日志系统
///
/// debug 级别 + 测试捕获输出;重复调用不报错
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

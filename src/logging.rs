// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别
// 输出: WARN/ERROR → stderr，其余 → stdout
// ==========================================

use std::fmt;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::fmt::writer::{MakeWriter, MakeWriterExt, OrElse, WithMaxLevel};
use tracing_subscriber::{fmt as subscriber_fmt, EnvFilter};

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("未知日志格式: {}（可选 text/json）", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// 按级别分流的输出目标：WARN/ERROR → errors，其余 → progress
pub fn level_routed<E, O>(errors: E, progress: O) -> OrElse<WithMaxLevel<E>, O>
where
    E: for<'a> MakeWriter<'a> + 'static,
    O: for<'a> MakeWriter<'a> + 'static,
{
    errors.with_max_level(Level::WARN).or_else(progress)
}

/// 按指定格式初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=debug 或 RUST_LOG=tabular_normalizer=trace
///
/// # 示例
/// ```no_run
/// use tabular_normalizer::logging::{self, LogFormat};
/// logging::init_with_format(LogFormat::Text);
/// ```
pub fn init_with_format(format: LogFormat) {
    // 从环境变量读取日志级别，默认为 info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // 告警与错误写 stderr，进度信息写 stdout
    let writer = level_routed(std::io::stderr, std::io::stdout);

    match format {
        LogFormat::Text => subscriber_fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_target(true)
            .with_thread_ids(false)
            .with_line_number(true)
            .init(),
        LogFormat::Json => subscriber_fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(writer)
            .init(),
    }
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = subscriber_fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// 日志级别，显示等于或高于所选级别的消息
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
    /// 最详细
    Debug,
    Notice,
    Warning,
    Error,
    /// 不输出任何内容
    Silent,
}

impl LogLevel {
    pub fn filter_directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Notice => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
            LogLevel::Silent => "off",
        }
    }

    /// 是否向 xdelta3 传递 `-v`
    pub fn is_verbose(self) -> bool {
        self <= LogLevel::Notice
    }

    pub fn is_silent(self) -> bool {
        self == LogLevel::Silent
    }
}

/// 初始化全局日志输出
pub fn init_logging(level: LogLevel) {
    let filter = EnvFilter::try_new(level.filter_directive())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
}

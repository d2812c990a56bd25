use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// 为批量发布生成可分发的补丁
#[derive(Parser)]
#[command(name = "batchpatch", version)]
#[command(about = "为批量发布的番剧文件生成可分发的二进制差异补丁", long_about = None)]
pub struct Cli {
    /// 日志级别，显示等于或高于该级别的消息
    #[arg(short, long, value_enum, default_value_t = LogLevel::Notice, global = true)]
    pub loglevel: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 对比新旧目录，生成补丁、应用脚本和清单
    Create {
        /// 旧文件目录
        #[arg(short, long, value_name = "DIRECTORY")]
        old: PathBuf,
        /// 新文件目录
        #[arg(short, long, value_name = "DIRECTORY")]
        new: PathBuf,
        /// 输出目录，默认在当前目录下创建带时间戳的子目录
        #[arg(short, long, value_name = "DIRECTORY")]
        target: Option<PathBuf>,
        /// xdelta3 可执行文件位置，默认在程序所在目录查找
        #[arg(short = 'x', long, env = "BATCHPATCH_XDELTA", value_name = "PATH")]
        xdelta: Option<PathBuf>,
        /// 额外将输出目录打包为 tar.gz
        #[arg(long, value_name = "FILE")]
        archive: Option<PathBuf>,
    },
    /// 只显示配对结果，不生成补丁
    Plan {
        /// 旧文件目录
        #[arg(short, long, value_name = "DIRECTORY")]
        old: PathBuf,
        /// 新文件目录
        #[arg(short, long, value_name = "DIRECTORY")]
        new: PathBuf,
    },
    /// 显示文件名的分解结果
    Parse {
        /// 文件名
        #[arg(required = true)]
        names: Vec<String>,
    },
}

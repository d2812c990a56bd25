use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 批处理开始前的环境检查错误
#[derive(Debug, Error)]
pub enum PrerequisiteError {
    #[error("{role}目录不存在或不是目录: {path:?}")]
    MissingDirectory { role: &'static str, path: PathBuf },

    #[error("输出路径已存在且不是目录: {0:?}")]
    TargetNotDirectory(PathBuf),

    #[error("无法创建输出目录: {path:?}")]
    CreateTarget {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("找不到 xdelta3 可执行文件: {0:?}，请下载或自行编译后放到该位置，或使用 --xdelta 指定")]
    XdeltaMissing(PathBuf),

    #[error("xdelta3 没有执行权限: {0:?}")]
    XdeltaNotExecutable(PathBuf),
}

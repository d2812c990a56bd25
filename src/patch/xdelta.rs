use anyhow::{Context, Result, bail};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

use crate::logging::LogLevel;
use crate::pairing::PatchJob;

/// 外部 xdelta3 程序
#[derive(Debug, Clone)]
pub struct Xdelta {
    executable: PathBuf,
    log_level: LogLevel,
}

impl Xdelta {
    pub fn new(executable: impl Into<PathBuf>, log_level: LogLevel) -> Self {
        Self {
            executable: executable.into(),
            log_level,
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// 可执行文件名，写入应用脚本时使用
    pub fn file_name(&self) -> String {
        self.executable
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(default_executable_name)
    }

    /// 生成补丁的参数：`-e -9 -s <旧> <新> <输出>`
    pub fn encode_args(&self, source: &Path, target: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-e".into()];
        if self.log_level.is_verbose() {
            args.push("-v".into());
        } else if self.log_level.is_silent() {
            args.push("-q".into());
        }
        args.extend([
            "-9".into(),
            "-s".into(),
            source.into(),
            target.into(),
            output.into(),
        ]);
        args
    }

    /// 为一个任务生成补丁，返回补丁路径
    pub fn encode(&self, job: &PatchJob, target_dir: &Path) -> Result<PathBuf> {
        let output = target_dir.join(job.patch_name());
        let args = self.encode_args(
            &job.source().source_path,
            &job.target().source_path,
            &output,
        );

        debug!(
            "启动子进程: {} {}",
            self.executable.display(),
            args.iter()
                .map(|arg| arg.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let status = Command::new(&self.executable)
            .args(&args)
            .status()
            .with_context(|| format!("无法启动 xdelta3: {:?}", self.executable))?;

        if !status.success() {
            bail!("xdelta3 返回非零值 ({})，补丁可能生成失败", status);
        }

        Ok(output)
    }
}

pub fn default_executable_name() -> String {
    format!("xdelta3{}", std::env::consts::EXE_SUFFIX)
}

/// 默认在程序所在目录查找 xdelta3
pub fn default_xdelta_location() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_default()
        .join(default_executable_name())
}

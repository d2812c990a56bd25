use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::archive::create_tar_gz;
use super::manifest::{Manifest, write_manifest};
use super::script::write_apply_script;
use super::xdelta::Xdelta;
use crate::error::PrerequisiteError;
use crate::logging::LogLevel;
use crate::pairing::{PatchJob, PatchPlan, resolve_patch_jobs};
use crate::utils::{is_executable, list_directory};

/// 一次批处理的参数
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub old_dir: PathBuf,
    pub new_dir: PathBuf,
    pub target_dir: PathBuf,
    pub xdelta: PathBuf,
    /// 额外打包输出目录
    pub archive: Option<PathBuf>,
    pub log_level: LogLevel,
}

/// 批处理结果
#[derive(Debug, Default)]
pub struct BatchReport {
    pub plan: PatchPlan,
    pub created: Vec<PatchJob>,
    pub failed: Vec<(PatchJob, String)>,
    pub script: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub archive: Option<PathBuf>,
}

impl BatchReport {
    pub fn summary(&self) -> String {
        format!(
            "成功: {} 个补丁, 失败: {} 个",
            self.created.len(),
            self.failed.len()
        )
    }
}

/// 检查新旧目录、输出目录和 xdelta3，必要时创建输出目录
pub fn check_prerequisites(options: &BatchOptions) -> Result<(), PrerequisiteError> {
    debug!("检查运行条件");

    require_source_directories(&options.old_dir, &options.new_dir)?;

    if !options.xdelta.is_file() {
        return Err(PrerequisiteError::XdeltaMissing(options.xdelta.clone()));
    }
    if !is_executable(&options.xdelta) {
        return Err(PrerequisiteError::XdeltaNotExecutable(options.xdelta.clone()));
    }

    let target = &options.target_dir;
    if !target.is_dir() {
        if target.exists() {
            return Err(PrerequisiteError::TargetNotDirectory(target.clone()));
        }
        info!("创建输出目录: {}", target.display());
        fs::create_dir_all(target).map_err(|source| PrerequisiteError::CreateTarget {
            path: target.clone(),
            source,
        })?;
    }

    debug!("运行条件检查通过");
    Ok(())
}

/// 确认新旧文件目录都存在
pub fn require_source_directories(old_dir: &Path, new_dir: &Path) -> Result<(), PrerequisiteError> {
    for (role, path) in [("旧文件", old_dir), ("新文件", new_dir)] {
        if !path.is_dir() {
            return Err(PrerequisiteError::MissingDirectory {
                role,
                path: path.to_path_buf(),
            });
        }
        debug!("找到{}目录: {}", role, path.display());
    }
    Ok(())
}

/// 列出两个目录并配对
pub fn plan_directories(old_dir: &Path, new_dir: &Path) -> Result<PatchPlan> {
    debug!("查找可配对的文件");
    let old_files = list_directory(old_dir)?;
    let new_files = list_directory(new_dir)?;

    let plan = resolve_patch_jobs(&old_files, &new_files);
    debug!("{}", plan.resolution.summary());
    Ok(plan)
}

/// 批量生成补丁、应用脚本和清单
pub fn create_patches(options: &BatchOptions) -> Result<BatchReport> {
    check_prerequisites(options)?;

    let plan = plan_directories(&options.old_dir, &options.new_dir)?;
    if plan.is_empty() {
        info!("没有需要生成补丁的文件");
        return Ok(BatchReport {
            plan,
            ..Default::default()
        });
    }

    let xdelta = Xdelta::new(&options.xdelta, options.log_level);
    let mut report = BatchReport::default();

    debug!("为 {} 对文件生成补丁", plan.jobs().len());
    for job in plan.jobs() {
        info!(
            "生成补丁: {} -> {}",
            job.source().file_name(),
            job.target().file_name()
        );
        match xdelta.encode(job, &options.target_dir) {
            Ok(_) => report.created.push(job.clone()),
            Err(err) => {
                warn!("补丁生成失败: {}: {:#}", job.patch_name(), err);
                report.failed.push((job.clone(), format!("{:#}", err)));
            }
        }
    }

    if report.created.is_empty() {
        warn!("所有补丁均生成失败，不生成应用脚本");
        report.plan = plan;
        return Ok(report);
    }

    debug!("生成 Windows 应用脚本");
    report.script = Some(write_apply_script(
        &options.target_dir,
        &report.created,
        &xdelta.file_name(),
    )?);

    copy_executable(&xdelta, &options.target_dir)?;

    let manifest = Manifest::from_jobs(&report.created)?;
    debug!("写入清单: {}", manifest.summary());
    report.manifest = Some(write_manifest(&options.target_dir, &manifest)?);

    if let Some(archive) = &options.archive {
        info!("正在打包: {}", archive.display());
        create_tar_gz(&options.target_dir, archive)?;
        report.archive = Some(archive.clone());
    }

    report.plan = plan;
    info!("完成. {}", report.summary());
    Ok(report)
}

fn copy_executable(xdelta: &Xdelta, target_dir: &Path) -> Result<()> {
    let dest = target_dir.join(xdelta.file_name());
    if dest.exists() && dest.canonicalize()? == xdelta.executable().canonicalize()? {
        debug!("xdelta3 已在输出目录中: {}", dest.display());
        return Ok(());
    }
    debug!("复制 xdelta3 到输出目录: {}", dest.display());
    fs::copy(xdelta.executable(), &dest)
        .with_context(|| format!("无法复制 xdelta3 到 {:?}", dest))?;
    Ok(())
}

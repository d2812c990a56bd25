use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::pairing::PatchJob;
use crate::utils::{HashResult, compute_file_hash};
use crate::{PROG_NAME, PROG_VERSION};

pub const MANIFEST_NAME: &str = "manifest.toml";

/// 补丁目录清单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub metadata: Metadata,
    #[serde(default)]
    pub patches: Vec<PatchEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub generator: String,
    pub generator_version: String,
    pub created_at: String,
}

impl Metadata {
    pub fn new() -> Self {
        Self {
            generator: PROG_NAME.to_string(),
            generator_version: PROG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new()
    }
}

/// 单个补丁及其新旧文件的校验和
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchEntry {
    pub patch: String,
    pub source: String,
    pub target: String,
    pub source_version: u32,
    pub target_version: u32,
    pub source_sha256: HashResult,
    pub target_sha256: HashResult,
}

impl PatchEntry {
    pub fn from_job(job: &PatchJob) -> Result<Self> {
        let source = job.source();
        let target = job.target();
        Ok(Self {
            patch: job.patch_name().to_string(),
            source: source.file_name(),
            target: target.file_name(),
            source_version: source.version,
            target_version: target.version,
            source_sha256: compute_file_hash(&source.source_path)?,
            target_sha256: compute_file_hash(&target.source_path)?,
        })
    }
}

impl Manifest {
    pub fn from_jobs(jobs: &[PatchJob]) -> Result<Self> {
        let patches = jobs
            .iter()
            .map(PatchEntry::from_job)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            metadata: Metadata::new(),
            patches,
        })
    }

    pub fn summary(&self) -> String {
        format!(
            "{} 个补丁, 生成于 {}",
            self.patches.len(),
            self.metadata.created_at
        )
    }
}

pub fn write_manifest(target_dir: &Path, manifest: &Manifest) -> Result<PathBuf> {
    let path = target_dir.join(MANIFEST_NAME);
    let content = toml::to_string_pretty(manifest)?;
    fs::write(&path, content).with_context(|| format!("无法写入清单: {:?}", path))?;
    Ok(path)
}

pub fn load_manifest(target_dir: &Path) -> Result<Manifest> {
    let path = target_dir.join(MANIFEST_NAME);
    let content =
        fs::read_to_string(&path).with_context(|| format!("无法读取 {}", MANIFEST_NAME))?;
    let manifest: Manifest =
        toml::from_str(&content).with_context(|| format!("无法解析 {}", MANIFEST_NAME))?;
    Ok(manifest)
}

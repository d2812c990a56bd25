//! 文件名分解与新旧文件配对
//!
//! 两个目录列表 → 文件名分解 → 分组索引 → 配对 → 补丁任务列表。
//! 整个过程是纯计算，不做任何 I/O。

mod index;
mod naming;
mod record;
mod resolve;

use std::path::{Path, PathBuf};

pub use index::{GroupingIndex, IndexedListing, build_index, index_listing};
pub use naming::{PATCH_EXTENSION, neutralize, patch_stem};
pub use record::{FilenameRecord, IdentityKey, decompose};
pub use resolve::{PatchJob, Resolution, resolve};

/// 一次配对的完整结果
#[derive(Debug, Default, Clone)]
pub struct PatchPlan {
    pub resolution: Resolution,
    pub skipped_old: Vec<PathBuf>,
    pub skipped_new: Vec<PathBuf>,
}

impl PatchPlan {
    pub fn jobs(&self) -> &[PatchJob] {
        &self.resolution.jobs
    }

    pub fn is_empty(&self) -> bool {
        self.resolution.jobs.is_empty()
    }
}

/// 根据新旧两个目录列表生成补丁任务
pub fn resolve_patch_jobs<O, N, P, Q>(old_listing: O, new_listing: N) -> PatchPlan
where
    O: IntoIterator<Item = P>,
    N: IntoIterator<Item = Q>,
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let old = index_listing(old_listing);
    let new = index_listing(new_listing);

    PatchPlan {
        resolution: resolve(&old.index, &new.index),
        skipped_old: old.skipped,
        skipped_new: new.skipped,
    }
}

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use tracing::{debug, info, warn};

use super::index::GroupingIndex;
use super::naming::{patch_file_name, patch_stem};
use super::record::{FilenameRecord, IdentityKey};

/// 一对待生成补丁的新旧文件
///
/// 只由 [`resolve`] 创建，创建后不可修改。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchJob {
    old: FilenameRecord,
    new: FilenameRecord,
    patch_name: String,
}

impl PatchJob {
    /// 旧版本文件
    pub fn source(&self) -> &FilenameRecord {
        &self.old
    }

    /// 新版本文件
    pub fn target(&self) -> &FilenameRecord {
        &self.new
    }

    /// 补丁输出文件名，在同一批任务中唯一
    pub fn patch_name(&self) -> &str {
        &self.patch_name
    }
}

impl fmt::Display for PatchJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({})",
            self.old.file_name(),
            self.new.file_name(),
            self.patch_name
        )
    }
}

/// 配对结果及诊断信息
#[derive(Debug, Default, Clone)]
pub struct Resolution {
    pub jobs: Vec<PatchJob>,
    /// 只存在于旧目录的分组
    pub unmatched_old: BTreeSet<IdentityKey>,
    /// 只存在于新目录的分组
    pub unmatched_new: BTreeSet<IdentityKey>,
    /// 某一侧存在相同版本的多个文件
    pub ambiguous: BTreeSet<IdentityKey>,
    /// 两侧最高版本相同，无需更新
    pub unchanged: BTreeSet<IdentityKey>,
}

impl Resolution {
    pub fn summary(&self) -> String {
        format!(
            "补丁: {} 个, 无需更新: {} 组, 仅旧目录: {} 组, 仅新目录: {} 组, 有歧义: {} 组",
            self.jobs.len(),
            self.unchanged.len(),
            self.unmatched_old.len(),
            self.unmatched_new.len(),
            self.ambiguous.len()
        )
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Old,
    New,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Old => write!(f, "旧目录"),
            Side::New => write!(f, "新目录"),
        }
    }
}

/// 对两个目录索引进行配对
pub fn resolve(old_index: &GroupingIndex, new_index: &GroupingIndex) -> Resolution {
    let mut resolution = Resolution::default();
    let mut pairs = Vec::new();

    for (key, old_bucket) in old_index {
        let Some(new_bucket) = new_index.get(key) else {
            info!("新目录中没有对应文件，忽略: {}", key);
            resolution.unmatched_old.insert(key.clone());
            continue;
        };

        let (old, new) = match (
            select_highest(old_bucket, key, Side::Old),
            select_highest(new_bucket, key, Side::New),
        ) {
            (Some(old), Some(new)) => (old, new),
            _ => {
                resolution.ambiguous.insert(key.clone());
                continue;
            }
        };

        if old.version == new.version {
            debug!("{} 新旧版本均为 {}，无需更新", key, new.version);
            resolution.unchanged.insert(key.clone());
            continue;
        }

        pairs.push((old.clone(), new.clone()));
    }

    for key in new_index.keys() {
        if !old_index.contains_key(key) {
            info!("旧目录中没有对应文件，忽略: {}", key);
            resolution.unmatched_new.insert(key.clone());
        }
    }

    pairs.sort_by(|(a, _), (b, _)| a.source_path.cmp(&b.source_path));
    resolution.jobs = assign_patch_names(pairs);

    for job in &resolution.jobs {
        debug!("加入队列: {}", job);
    }

    resolution
}

/// 选出分组中的最高版本，存在重复版本时返回 `None`
fn select_highest<'a>(
    bucket: &'a [FilenameRecord],
    key: &IdentityKey,
    side: Side,
) -> Option<&'a FilenameRecord> {
    let mut seen = HashSet::new();
    for record in bucket {
        if !seen.insert(record.version) {
            warn!(
                "{}中 {} 存在多个版本 {} 的文件，跳过该组",
                side, key, record.version
            );
            return None;
        }
    }
    bucket.iter().max_by_key(|record| record.version)
}

fn assign_patch_names(pairs: Vec<(FilenameRecord, FilenameRecord)>) -> Vec<PatchJob> {
    let mut used = HashSet::new();

    pairs
        .into_iter()
        .map(|(old, new)| {
            let stem = patch_stem(&old, &new);
            let mut patch_name = patch_file_name(&stem);
            let mut suffix = 2;
            while !used.insert(patch_name.clone()) {
                patch_name = patch_file_name(&format!("{}_{}", stem, suffix));
                suffix += 1;
            }
            PatchJob {
                old,
                new,
                patch_name,
            }
        })
        .collect()
}

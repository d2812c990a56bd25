use std::collections::BTreeMap;
use std::collections::btree_map;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::record::{FilenameRecord, IdentityKey};

/// 按 [`IdentityKey`] 分组的目录索引
///
/// 同一分组内保持插入顺序，不按版本去重。
#[derive(Debug, Default, Clone)]
pub struct GroupingIndex {
    buckets: BTreeMap<IdentityKey, Vec<FilenameRecord>>,
}

impl GroupingIndex {
    pub fn get(&self, key: &IdentityKey) -> Option<&[FilenameRecord]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &IdentityKey) -> bool {
        self.buckets.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &IdentityKey> {
        self.buckets.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, IdentityKey, Vec<FilenameRecord>> {
        self.buckets.iter()
    }

    /// 分组数量
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// 所有分组中的文件总数
    pub fn record_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

impl FromIterator<FilenameRecord> for GroupingIndex {
    fn from_iter<I: IntoIterator<Item = FilenameRecord>>(records: I) -> Self {
        let mut buckets: BTreeMap<IdentityKey, Vec<FilenameRecord>> = BTreeMap::new();
        for record in records {
            buckets.entry(record.identity_key()).or_default().push(record);
        }
        Self { buckets }
    }
}

impl<'a> IntoIterator for &'a GroupingIndex {
    type Item = (&'a IdentityKey, &'a Vec<FilenameRecord>);
    type IntoIter = btree_map::Iter<'a, IdentityKey, Vec<FilenameRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// 构建分组索引
pub fn build_index<I>(records: I) -> GroupingIndex
where
    I: IntoIterator<Item = FilenameRecord>,
{
    records.into_iter().collect()
}

/// 一个目录列表的索引结果
#[derive(Debug, Default, Clone)]
pub struct IndexedListing {
    pub index: GroupingIndex,
    /// 文件名不符合语法而被跳过的路径
    pub skipped: Vec<PathBuf>,
}

/// 分解目录列表中的每个文件名并建立索引
pub fn index_listing<I, P>(paths: I) -> IndexedListing
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for path in paths {
        let path = path.as_ref();
        match FilenameRecord::from_path(path) {
            Some(record) => {
                debug!(
                    "识别文件: {} (组 {:?}, 标题 {}, 集数 {:?}, 版本 {}, 附加 {:?}, 扩展名 {})",
                    path.display(),
                    record.group,
                    record.main_name,
                    record.episode,
                    record.version,
                    record.qualifiers,
                    record.extension
                );
                records.push(record);
            }
            None => {
                debug!("文件名无法识别，跳过: {}", path.display());
                skipped.push(path.to_path_buf());
            }
        }
    }

    let index = build_index(records);
    if index.is_empty() {
        debug!("目录中没有可识别的文件");
    }

    IndexedListing { index, skipped }
}

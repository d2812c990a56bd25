use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::record::FilenameRecord;

pub const PATCH_EXTENSION: &str = "vcdiff";

/// 转换为只含 `[a-z0-9_-]` 的字符串
///
/// 先做 NFKD 分解并去掉组合附加符号，`Café` 得到 `cafe`。
pub fn neutralize(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '_' | '-' => c,
            _ => '_',
        })
        .collect()
}

/// 补丁文件名主干，不含扩展名
///
/// `标题[_附加信息首词][_集数]_v旧v新`
pub fn patch_stem(old: &FilenameRecord, new: &FilenameRecord) -> String {
    let mut parts = vec![neutralize(&old.main_name)];
    if let Some(first) = old
        .qualifiers
        .as_deref()
        .and_then(|q| q.split_whitespace().next())
    {
        parts.push(neutralize(first));
    }
    if let Some(episode) = &old.episode {
        parts.push(neutralize(episode));
    }
    format!("{}_v{}v{}", parts.join("_"), old.version, new.version)
}

pub fn patch_file_name(stem: &str) -> String {
    format!("{}.{}", stem, PATCH_EXTENSION)
}

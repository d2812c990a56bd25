use regex::{Captures, Regex};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// 发布文件名的固定语法
///
/// `[组名] 主标题 - 集数v版本 (附加信息) [CRC].扩展名`，除主标题和扩展名外均可省略。
static FILENAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^
        (?:\[(?P<group>[^\]]+)\]\s*)?
        (?P<name>.+?)
        (?:
            [\ ]-[\ ](?P<episode>[[:alnum:]]+?)(?:[\ ]?v(?P<episode_version>[0-9]+))?
          | [\ ]v(?P<version>[0-9]+)
        )?
        (?:[\ ]?\((?P<qualifiers>[^)]*)\))?
        (?:[\ ]?\[(?P<hash>[[:xdigit:]]{8})\])?
        (?:\.[^.\s]+)*?
        \.(?P<extension>[^.]+)
        $",
    )
    .expect("filename pattern is valid")
});

/// 种子文件不参与配对
const IGNORED_EXTENSION: &str = "torrent";

/// 文件名分解结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameRecord {
    pub group: Option<String>,
    pub main_name: String,
    pub episode: Option<String>,
    /// 文件名中没有版本号时为 1
    pub version: u32,
    pub qualifiers: Option<String>,
    pub hash: Option<String>,
    pub extension: String,
    pub source_path: PathBuf,
}

/// 除版本号、校验值和路径外的字段，决定两个文件是否为同一内容的不同版本
///
/// 扩展名按 ASCII 小写保存，因此 `.MKV` 与 `.mkv` 视为同一类型。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey {
    pub group: Option<String>,
    pub main_name: String,
    pub episode: Option<String>,
    pub qualifiers: Option<String>,
    pub extension: String,
}

/// 分解文件名，不匹配语法时返回 `None`
///
/// `source_path` 设为文件名本身；需要保留完整路径时使用 [`FilenameRecord::from_path`]。
pub fn decompose(filename: &str) -> Option<FilenameRecord> {
    decompose_with_path(filename, PathBuf::from(filename))
}

fn decompose_with_path(filename: &str, source_path: PathBuf) -> Option<FilenameRecord> {
    let caps = FILENAME_PATTERN.captures(filename)?;

    let extension = caps.name("extension")?.as_str();
    if extension.eq_ignore_ascii_case(IGNORED_EXTENSION) {
        return None;
    }

    let main_name = caps.name("name")?.as_str().trim_end();
    if main_name.is_empty() {
        return None;
    }

    let version = match caps
        .name("episode_version")
        .or_else(|| caps.name("version"))
    {
        Some(digits) => digits.as_str().parse::<u32>().ok().filter(|v| *v >= 1)?,
        None => 1,
    };

    Some(FilenameRecord {
        group: optional(&caps, "group"),
        main_name: main_name.to_string(),
        episode: optional(&caps, "episode"),
        version,
        qualifiers: optional(&caps, "qualifiers"),
        hash: optional(&caps, "hash"),
        extension: extension.to_string(),
        source_path,
    })
}

fn optional(caps: &Captures<'_>, name: &str) -> Option<String> {
    caps.name(name).map(|m| m.as_str().to_string())
}

impl FilenameRecord {
    /// 分解路径的文件名部分，非 UTF-8 文件名视为不匹配
    pub fn from_path(path: &Path) -> Option<Self> {
        let filename = path.file_name()?.to_str()?;
        decompose_with_path(filename, path.to_path_buf())
    }

    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            group: self.group.clone(),
            main_name: self.main_name.clone(),
            episode: self.episode.clone(),
            qualifiers: self.qualifiers.clone(),
            extension: self.extension.to_ascii_lowercase(),
        }
    }

    /// 源文件的文件名，用于日志和脚本
    pub fn file_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.compose())
    }

    /// 按固定语法重新拼出文件名，版本为 1 时省略版本号
    pub fn compose(&self) -> String {
        let mut name = String::new();
        if let Some(group) = &self.group {
            name.push_str(&format!("[{}] ", group));
        }
        name.push_str(&self.main_name);
        match &self.episode {
            Some(episode) => {
                name.push_str(" - ");
                name.push_str(episode);
                if self.version > 1 {
                    name.push_str(&format!("v{}", self.version));
                }
            }
            None if self.version > 1 => name.push_str(&format!(" v{}", self.version)),
            None => {}
        }
        if let Some(qualifiers) = &self.qualifiers {
            name.push_str(&format!(" ({})", qualifiers));
        }
        if let Some(hash) = &self.hash {
            name.push_str(&format!(" [{}]", hash));
        }
        name.push('.');
        name.push_str(&self.extension);
        name
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [
            self.group.as_deref(),
            Some(self.main_name.as_str()),
            self.episode.as_deref(),
            self.qualifiers.as_deref(),
            Some(self.extension.as_str()),
        ]
        .into_iter()
        .flatten()
        .collect();
        write!(f, "{}", parts.join("/"))
    }
}

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io;
use std::path::Path;

/// 十六进制的 SHA256 值
pub type HashResult = String;

/// 计算文件的 SHA256 校验和，写入清单供用户核对补丁前后的文件
pub fn compute_file_hash(path: &Path) -> Result<HashResult> {
    let mut file = File::open(path).with_context(|| format!("无法打开文件: {:?}", path))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).with_context(|| format!("无法读取文件: {:?}", path))?;
    Ok(hex::encode(hasher.finalize()))
}

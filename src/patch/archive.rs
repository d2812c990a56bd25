use anyhow::{Context, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tar::Builder;
use walkdir::WalkDir;

/// 将输出目录打包为 tar.gz，包内使用相对路径
pub fn create_tar_gz(source_dir: &Path, output: &Path) -> Result<()> {
    let file = File::create(output).with_context(|| format!("无法创建压缩包: {:?}", output))?;
    let encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    let mut tar_builder = Builder::new(encoder);

    // 压缩包本身可能位于输出目录中
    let output = output.canonicalize()?;

    for entry in WalkDir::new(source_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        let relative_path = path.strip_prefix(source_dir)?;

        if path.is_file() {
            if path.canonicalize()? == output {
                continue;
            }
            tar_builder.append_path_with_name(path, relative_path)?;
        } else if path.is_dir() && path != source_dir {
            tar_builder.append_dir(relative_path, path)?;
        }
    }

    let mut writer = tar_builder.into_inner()?.finish()?;
    writer.flush()?;
    Ok(())
}

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::create::{plan_directories, require_source_directories};
use crate::pairing::{FilenameRecord, IdentityKey, PatchPlan, decompose};

/// 显示两个目录的配对结果，不生成补丁
pub fn show_plan(old_dir: &Path, new_dir: &Path) -> Result<PatchPlan> {
    require_source_directories(old_dir, new_dir)?;
    let plan = plan_directories(old_dir, new_dir)?;
    let resolution = &plan.resolution;

    println!("旧目录: {}", old_dir.display());
    println!("新目录: {}\n", new_dir.display());

    if !resolution.jobs.is_empty() {
        println!("=== 补丁 ({}) ===", resolution.jobs.len());
        for job in &resolution.jobs {
            println!(
                "  * {} (v{}) -> {} (v{})",
                job.source().file_name(),
                job.source().version,
                job.target().file_name(),
                job.target().version
            );
            println!("    {}", job.patch_name());
        }
        println!();
    }

    print_keys("无需更新", "=", &resolution.unchanged);
    print_keys("仅旧目录", "-", &resolution.unmatched_old);
    print_keys("仅新目录", "+", &resolution.unmatched_new);
    print_keys("有歧义", "!", &resolution.ambiguous);
    print_paths("无法识别", &plan.skipped_old, &plan.skipped_new);

    println!("{}", resolution.summary());
    Ok(plan)
}

fn print_keys<'a>(title: &str, symbol: &str, keys: impl IntoIterator<Item = &'a IdentityKey>) {
    let keys: Vec<_> = keys.into_iter().collect();
    if keys.is_empty() {
        return;
    }
    println!("=== {} ({}) ===", title, keys.len());
    for key in keys {
        println!("  {} {}", symbol, key);
    }
    println!();
}

fn print_paths(title: &str, old: &[PathBuf], new: &[PathBuf]) {
    if old.is_empty() && new.is_empty() {
        return;
    }
    println!("=== {} ({}) ===", title, old.len() + new.len());
    for path in old.iter().chain(new) {
        println!("  ? {}", path.display());
    }
    println!();
}

/// 显示文件名的分解结果
pub fn show_decomposition(names: &[String]) -> Vec<Option<FilenameRecord>> {
    names
        .iter()
        .map(|name| {
            let record = decompose(name);
            match &record {
                Some(record) => {
                    println!("{}", name);
                    println!("  组名:   {}", record.group.as_deref().unwrap_or("-"));
                    println!("  标题:   {}", record.main_name);
                    println!("  集数:   {}", record.episode.as_deref().unwrap_or("-"));
                    println!("  版本:   {}", record.version);
                    println!("  附加:   {}", record.qualifiers.as_deref().unwrap_or("-"));
                    println!("  校验:   {}", record.hash.as_deref().unwrap_or("-"));
                    println!("  扩展名: {}", record.extension);
                    println!("  分组键: {}", record.identity_key());
                }
                None => println!("{}\n  无法识别", name),
            }
            record
        })
        .collect()
}

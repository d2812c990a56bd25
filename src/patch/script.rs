use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::pairing::PatchJob;
use crate::{PROG_NAME, PROG_VERSION};

pub const SCRIPT_NAME: &str = "apply.cmd";

static CMD_SPECIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\[\]()^<>|])").expect("cmd escape pattern is valid"));

/// 转义 `echo` 输出中的 cmd 特殊字符
pub fn cmd_escape(text: &str) -> String {
    CMD_SPECIAL.replace_all(text, "^$1").into_owned()
}

/// 生成 Windows 应用脚本内容，行尾为 CRLF
pub fn render_apply_script(jobs: &[PatchJob], xdelta_name: &str, generated_at: &str) -> String {
    let mut lines: Vec<String> = vec![
        "@echo off".into(),
        "chcp 65001 > nul".into(),
        String::new(),
        format!("REM Generated by {} version {}", PROG_NAME, PROG_VERSION),
        format!("REM on {}", generated_at),
        String::new(),
        "setlocal".into(),
        "set pnum=0".into(),
        "set nnum=0".into(),
        "set fnum=0".into(),
        String::new(),
        format!("IF NOT EXIST \"{}\" (", xdelta_name),
        "  echo The xdelta executable was not found! It is required for this script to work!"
            .into(),
        "  pause".into(),
        "  exit /b 1".into(),
        ")".into(),
        String::new(),
    ];

    for job in jobs {
        let old = job.source().file_name();
        let new = job.target().file_name();
        let old_esc = cmd_escape(&old);
        let new_esc = cmd_escape(&new);
        let patch = job.patch_name();

        lines.extend([
            format!("IF EXIST \"{}\" (", old),
            format!("  IF NOT EXIST \"{}\" (", new),
            format!("    echo Patching {}...", old_esc),
            "    set /a pnum+=1".into(),
            format!(
                "    \"{}\" -d -v -s \"{}\" \"{}\" \"{}\" || (",
                xdelta_name, old, patch, new
            ),
            format!("      echo Patching {} failed!", old_esc),
            "      set /a pnum-=1".into(),
            "      set /a fnum+=1".into(),
            "    )".into(),
            "  ) ELSE (".into(),
            format!("    echo {} already exists, skipping...", new_esc),
            "    set /a nnum+=1".into(),
            "  )".into(),
            ") ELSE (".into(),
            format!("  echo {} not present in folder, skipping...", old_esc),
            "  set /a nnum+=1".into(),
            ")".into(),
        ]);
    }

    lines.push(
        "echo Finished, with %pnum% files patched, %nnum% skipped and %fnum% failed.".into(),
    );
    lines.push("pause".into());

    let mut script = lines.join("\r\n");
    script.push_str("\r\n");
    script
}

/// 在输出目录写入 `apply.cmd`
pub fn write_apply_script(target_dir: &Path, jobs: &[PatchJob], xdelta_name: &str) -> Result<PathBuf> {
    let generated_at = chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S %z")
        .to_string();
    let content = render_apply_script(jobs, xdelta_name, &generated_at);

    let path = target_dir.join(SCRIPT_NAME);
    fs::write(&path, content).with_context(|| format!("无法写入应用脚本: {:?}", path))?;
    Ok(path)
}

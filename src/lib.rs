//! # BatchPatch
//!
//! 为批量发布的番剧文件生成可分发的二进制差异补丁
//!
//! ## 功能
//!
//! - 按固定语法分解发布文件名（组名、标题、集数、版本、附加信息、CRC、扩展名）
//! - 在新旧两个目录之间配对同一内容的不同版本
//! - 调用 xdelta3 生成补丁，并生成供用户使用的 `apply.cmd` 和 `manifest.toml`
//!
//! ## 使用示例
//!
//! ```
//! use batch_patch::pairing::resolve_patch_jobs;
//!
//! let plan = resolve_patch_jobs(
//!     ["old/[Grp] Show - 01 (720p).mkv"],
//!     ["new/[Grp] Show - 01v2 (720p).mkv"],
//! );
//! assert_eq!(plan.jobs().len(), 1);
//! assert_eq!(plan.jobs()[0].patch_name(), "show_720p_01_v1v2.vcdiff");
//! ```

pub mod cli;
pub mod error;
pub mod logging;
pub mod pairing;
pub mod patch;
pub mod utils;

pub const PROG_NAME: &str = "BatchPatch";
pub const PROG_VERSION: &str = env!("CARGO_PKG_VERSION");

// 重新导出常用类型
pub use pairing::{FilenameRecord, IdentityKey, PatchJob, PatchPlan, Resolution};
pub use pairing::{decompose, resolve_patch_jobs};
pub use patch::{BatchOptions, BatchReport, create_patches, show_plan};

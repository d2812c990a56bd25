mod archive;
mod create;
mod manifest;
mod plan;
mod script;
mod xdelta;

pub use archive::create_tar_gz;
pub use create::{
    BatchOptions, BatchReport, check_prerequisites, create_patches, plan_directories,
    require_source_directories,
};
pub use manifest::{MANIFEST_NAME, Manifest, Metadata, PatchEntry, load_manifest, write_manifest};
pub use plan::{show_decomposition, show_plan};
pub use script::{SCRIPT_NAME, cmd_escape, render_apply_script, write_apply_script};
pub use xdelta::{Xdelta, default_executable_name, default_xdelta_location};

mod fs;
mod hash;

pub use fs::{is_executable, list_directory};
pub use hash::{HashResult, compute_file_hash};

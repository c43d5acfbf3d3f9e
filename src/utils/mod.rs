pub mod fs;
pub mod process;

pub use fs::{commit_all, current_project_root, dist_files, find_project_root, remove_build_artifacts};
pub use process::{run_all, run_each, Invocation, RecordingRunner, Runner, SystemRunner};

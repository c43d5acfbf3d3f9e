pub mod bump_version;
pub mod ci;
pub mod publish;
pub mod show;
pub mod steps;
pub mod sync;
pub mod tasks;
pub mod validate;

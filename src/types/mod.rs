pub mod config;
pub mod error;
pub mod metadata;

pub use config::{ProjectConfig, Style};
pub use error::Error;
pub use metadata::MetadataRecord;

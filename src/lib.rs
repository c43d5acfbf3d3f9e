//! pkgtask - development tasks for a Python package
//!
//! This library keeps a package's version and requirements consistent across
//! `pyproject.toml`, the package `__init__.py`, the README and
//! `.bumpversion.cfg`, and sequences the external tools used to lint, test,
//! build and publish it.
//!
//! # Examples
//!
//! ## Bumping version
//!
//! ```
//! use pkgtask::bump_version::{bump_version, parse_version, BumpLevel};
//!
//! let current = parse_version("1.2.3").unwrap();
//! let new = bump_version(&BumpLevel::Minor, &current).unwrap();
//! assert_eq!(new.to_string(), "1.3.0");
//! ```
//!
//! ## Syncing metadata
//!
//! ```no_run
//! use pkgtask::{metadata, types::ProjectConfig};
//! use std::path::Path;
//!
//! let config = ProjectConfig::load(Path::new(".")).unwrap();
//! let report = metadata::sync(&config, false).unwrap();
//! assert_eq!(report.consistent, Some(true));
//! ```
//!
//! ## Reading a dependency version
//!
//! ```
//! use pkgtask::metadata::extract_dependency_version;
//!
//! let deps = vec!["Django>=4.2".to_string(), "pytest>=7.0".to_string()];
//! assert_eq!(extract_dependency_version(&deps, "Django").as_deref(), Some("4.2"));
//! assert_eq!(extract_dependency_version(&deps, "Flask"), None);
//! ```

pub mod commands;
pub mod metadata;
pub mod types;
pub mod utils;

pub use commands::bump_version;
pub use commands::publish;

pub use semver::Version;

pub type Result<T> = anyhow::Result<T>;

use {std::path::PathBuf, thiserror::Error};

/// Failures of the version model and the metadata synchronizer.
///
/// Anything that comes from the filesystem or an external tool is reported
/// through `anyhow` with context instead.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("invalid version '{0}': expected MAJOR.MINOR.PATCH")]
    Format(String),

    #[error("invalid bump level '{0}': expected patch, minor, or major")]
    InvalidPolicy(String),

    #[error("bumping {level} of {version} would overflow")]
    VersionOverflow { level: String, version: String },

    #[error("missing `{0}` in pyproject.toml")]
    MissingField(String),

    #[error("{field} not found in {}", path.display())]
    FieldNotFound { path: PathBuf, field: String },

    #[error("{field} appears {count} times in {}, expected exactly once", path.display())]
    AmbiguousField {
        path: PathBuf,
        field: String,
        count: usize,
    },
}

impl Error {
    pub fn field_not_found(path: impl Into<PathBuf>, field: impl Into<String>) -> Self {
        Error::FieldNotFound {
            path: path.into(),
            field: field.into(),
        }
    }
}

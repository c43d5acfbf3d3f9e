use {semver::Version, serde::Serialize};

/// The `[project]` fields every dependent artifact mirrors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub version: Version,
    pub requires_python: String,
    pub dependencies: Vec<String>,
}

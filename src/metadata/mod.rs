//! The authoritative `[project]` record and the files kept in sync with it.

pub mod artifacts;
pub mod sync;

pub use sync::{apply, plan_bump, plan_sync, sync, validate_consistency, SyncPlan, SyncReport};

use {
    crate::{
        commands::bump_version::parse_version,
        types::{Error, MetadataRecord},
    },
    anyhow::{anyhow, Context, Result},
    std::{fs, path::Path},
    toml_edit::DocumentMut,
};

/// Comparator tokens dropped when a requirement is shown as a plain version.
const COMPARATORS: [&str; 3] = [">=", "~=", "^"];

pub fn load(path: &Path) -> Result<MetadataRecord> {
    let content =
        fs::read_to_string(path).context(format!("failed to read {}", path.display()))?;
    parse_record(&content).context(format!("failed to load metadata from {}", path.display()))
}

pub fn parse_record(content: &str) -> Result<MetadataRecord> {
    let doc = content.parse::<DocumentMut>()?;
    let project = doc.get("project");
    let field = |key: &str| project.and_then(|project| project.get(key));
    let missing = |key: &str| Error::MissingField(format!("project.{key}"));

    let version = field("version")
        .and_then(|version| version.as_str())
        .ok_or_else(|| missing("version"))?;
    let version = parse_version(version)?;

    let requires_python = field("requires-python")
        .and_then(|requires| requires.as_str())
        .ok_or_else(|| missing("requires-python"))?
        .to_string();

    let dependencies = field("dependencies")
        .and_then(|deps| deps.as_array())
        .ok_or_else(|| missing("dependencies"))?
        .iter()
        .map(|dep| {
            dep.as_str()
                .map(str::to_string)
                .ok_or_else(|| anyhow!("project.dependencies must be strings, found {dep}"))
        })
        .collect::<Result<Vec<_>>>()?;

    let name = field("name")
        .and_then(|name| name.as_str())
        .map(str::to_string);

    Ok(MetadataRecord {
        name,
        version,
        requires_python,
        dependencies,
    })
}

/// Version of the first dependency starting with `prefix`, with the prefix
/// and comparator tokens removed. `None` when no dependency matches.
pub fn extract_dependency_version(dependencies: &[String], prefix: &str) -> Option<String> {
    dependencies
        .iter()
        .find_map(|dep| dep.strip_prefix(prefix))
        .map(strip_comparators)
}

pub fn strip_comparators(requirement: &str) -> String {
    COMPARATORS
        .iter()
        .fold(requirement.to_string(), |acc, token| acc.replace(token, ""))
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use {super::*, pretty_assertions::assert_eq, semver::Version};

    fn deps(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_dependency_version() {
        assert_eq!(
            extract_dependency_version(&deps(&["Django>=4.2", "pytest>=7.0"]), "Django"),
            Some("4.2".to_string())
        );
        assert_eq!(
            extract_dependency_version(&deps(&["pytest>=7.0"]), "Django"),
            None
        );
        assert_eq!(
            extract_dependency_version(&deps(&["pytest>=7.0", "Django~=5.0", "Django>=4.2"]), "Django"),
            Some("5.0".to_string())
        );
        assert_eq!(
            extract_dependency_version(&deps(&["Django^3.2"]), "Django"),
            Some("3.2".to_string())
        );
    }

    #[test]
    fn test_strip_comparators() {
        assert_eq!(strip_comparators(">=3.8"), "3.8");
        assert_eq!(strip_comparators("~=3.10"), "3.10");
        assert_eq!(strip_comparators("3.9"), "3.9");
    }

    #[test]
    fn test_parse_record() {
        let record = parse_record(
            r#"
[project]
name = "django-metachoices"
version = "0.1.3"
requires-python = ">=3.8"
dependencies = [
    "Django>=3.2",
]

[tool.ruff]
target-version = "py38"
"#,
        )
        .unwrap();

        assert_eq!(
            record,
            MetadataRecord {
                name: Some("django-metachoices".to_string()),
                version: Version::new(0, 1, 3),
                requires_python: ">=3.8".to_string(),
                dependencies: deps(&["Django>=3.2"]),
            }
        );
    }

    #[test]
    fn test_parse_record_missing_fields() {
        let cases = [
            ("[project]\nrequires-python = \">=3.8\"\ndependencies = []\n", "project.version"),
            ("[project]\nversion = \"1.0.0\"\ndependencies = []\n", "project.requires-python"),
            ("[project]\nversion = \"1.0.0\"\nrequires-python = \">=3.8\"\n", "project.dependencies"),
            ("[tool.poetry]\nversion = \"1.0.0\"\n", "project.version"),
        ];
        for (content, key) in cases {
            let err = parse_record(content).unwrap_err();
            assert_eq!(
                err.downcast_ref::<Error>(),
                Some(&Error::MissingField(key.to_string())),
                "{content}"
            );
        }
    }

    #[test]
    fn test_parse_record_bad_version() {
        let err = parse_record(
            "[project]\nversion = \"1.2\"\nrequires-python = \">=3.8\"\ndependencies = []\n",
        )
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::Format("1.2".to_string()))
        );
    }
}

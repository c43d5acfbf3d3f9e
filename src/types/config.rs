//! Per-project settings.
//!
//! Everything is read from the optional `[tool.pkgtask]` table of
//! `pyproject.toml`; every key has a default so most projects need no table:
//!
//! ```toml
//! [tool.pkgtask]
//! package = "metachoices"
//! framework = "Django"
//! readme = "README.md"
//! bumpversion = ".bumpversion.cfg"
//! sources = ["metachoices", "tests"]
//! style = "ruff"          # or "black-flake8"
//! python = "python"
//! ```

use {
    anyhow::{anyhow, Context, Result},
    serde::Deserialize,
    std::{
        fs,
        path::{Path, PathBuf},
    },
};

pub const PYPROJECT: &str = "pyproject.toml";

/// Which formatter/linter pair drives `format`, `format-check` and `lint`.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    #[default]
    Ruff,
    BlackFlake8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    pub root: PathBuf,
    pub package: String,
    pub framework: String,
    pub readme: PathBuf,
    pub bumpversion: PathBuf,
    pub sources: Vec<String>,
    pub style: Style,
    pub python: String,
}

#[derive(Deserialize, Default)]
struct PyprojectFile {
    #[serde(default)]
    project: RawProject,
    #[serde(default)]
    tool: RawTools,
}

#[derive(Deserialize, Default)]
struct RawProject {
    name: Option<String>,
}

#[derive(Deserialize, Default)]
struct RawTools {
    pkgtask: Option<ToolConfig>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ToolConfig {
    package: Option<String>,
    framework: Option<String>,
    readme: Option<PathBuf>,
    bumpversion: Option<PathBuf>,
    sources: Option<Vec<String>>,
    style: Option<Style>,
    python: Option<String>,
}

impl ProjectConfig {
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(PYPROJECT);
        let content =
            fs::read_to_string(&path).context(format!("failed to read {}", path.display()))?;
        Self::from_pyproject_str(root, &content)
            .context(format!("failed to load project config from {}", path.display()))
    }

    pub fn from_pyproject_str(root: &Path, content: &str) -> Result<Self> {
        let file: PyprojectFile = toml_edit::de::from_str(content)?;
        let tool = file.tool.pkgtask.unwrap_or_default();

        let package = match (tool.package, file.project.name) {
            (Some(package), _) => package,
            (None, Some(name)) => name.replace('-', "_"),
            (None, None) => {
                return Err(anyhow!(
                    "cannot determine the package directory: set `project.name` or \
                     `tool.pkgtask.package`"
                ))
            }
        };
        let sources = tool
            .sources
            .unwrap_or_else(|| vec![package.clone(), "tests".to_string()]);

        Ok(Self {
            root: root.to_path_buf(),
            framework: tool.framework.unwrap_or_else(|| "Django".to_string()),
            readme: tool.readme.unwrap_or_else(|| PathBuf::from("README.md")),
            bumpversion: tool
                .bumpversion
                .unwrap_or_else(|| PathBuf::from(".bumpversion.cfg")),
            sources,
            style: tool.style.unwrap_or_default(),
            python: tool.python.unwrap_or_else(|| "python".to_string()),
            package,
        })
    }

    pub fn pyproject_path(&self) -> PathBuf {
        self.root.join(PYPROJECT)
    }

    pub fn init_module_path(&self) -> PathBuf {
        self.root.join(&self.package).join("__init__.py")
    }

    pub fn readme_path(&self) -> PathBuf {
        self.root.join(&self.readme)
    }

    pub fn bumpversion_path(&self) -> PathBuf {
        self.root.join(&self.bumpversion)
    }

    pub fn dist_dir(&self) -> PathBuf {
        self.root.join("dist")
    }
}

#[cfg(test)]
mod tests {
    use {super::*, pretty_assertions::assert_eq};

    #[test]
    fn test_defaults_from_project_name() {
        let config = ProjectConfig::from_pyproject_str(
            Path::new("/repo"),
            "[project]\nname = \"django-metachoices\"\nversion = \"0.1.0\"\n",
        )
        .unwrap();

        assert_eq!(config.package, "django_metachoices");
        assert_eq!(config.framework, "Django");
        assert_eq!(config.sources, vec!["django_metachoices", "tests"]);
        assert_eq!(config.style, Style::Ruff);
        assert_eq!(config.python, "python");
        assert_eq!(
            config.init_module_path(),
            PathBuf::from("/repo/django_metachoices/__init__.py")
        );
        assert_eq!(
            config.bumpversion_path(),
            PathBuf::from("/repo/.bumpversion.cfg")
        );
    }

    #[test]
    fn test_tool_table_overrides() {
        let config = ProjectConfig::from_pyproject_str(
            Path::new("/repo"),
            r#"
[project]
name = "django-metachoices"

[tool.pkgtask]
package = "metachoices"
framework = "Flask"
readme = "docs/README.md"
style = "black-flake8"
python = "python3"

[tool.ruff]
target-version = "py310"
"#,
        )
        .unwrap();

        assert_eq!(config.package, "metachoices");
        assert_eq!(config.framework, "Flask");
        assert_eq!(config.sources, vec!["metachoices", "tests"]);
        assert_eq!(config.style, Style::BlackFlake8);
        assert_eq!(config.python, "python3");
        assert_eq!(config.readme_path(), PathBuf::from("/repo/docs/README.md"));
    }

    #[test]
    fn test_unknown_tool_key_is_rejected() {
        assert!(ProjectConfig::from_pyproject_str(
            Path::new("/repo"),
            "[project]\nname = \"x\"\n\n[tool.pkgtask]\npackge = \"typo\"\n",
        )
        .is_err());
    }

    #[test]
    fn test_load_reports_syntax_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PYPROJECT), "[project\nname = \"x\"\n").unwrap();

        let err = ProjectConfig::load(dir.path()).unwrap_err();

        assert!(
            err.to_string().starts_with("failed to load project config from"),
            "{err:#}"
        );
        assert!(!format!("{err:#}").contains("[tool.pkgtask]"), "{err:#}");
    }

    #[test]
    fn test_package_required() {
        let err = ProjectConfig::from_pyproject_str(Path::new("/repo"), "[project]\n")
            .unwrap_err()
            .to_string();
        assert!(err.contains("cannot determine the package directory"), "{err}");
    }
}

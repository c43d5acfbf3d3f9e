//! Minimal schemas for the files that mirror `pyproject.toml`.
//!
//! Each artifact is parsed into the spans of the fields it mirrors; rendering
//! replaces only those spans, so a field that cannot be located is an error
//! instead of a silent no-op.

use {
    crate::types::Error,
    regex::Regex,
    semver::Version,
    std::{
        ops::Range,
        path::{Path, PathBuf},
        sync::LazyLock,
    },
    toml_edit::{value, DocumentMut},
};

static INIT_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^__version__ = "([^"\r\n]*)""#).unwrap());

static CURRENT_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^current_version[ \t]*=[ \t]*([^\s]*)").unwrap());

const REQUIREMENTS_HEADING: &str = "## Requirements";

/// `<package>/__init__.py`: exactly one `__version__ = "<value>"` line.
#[derive(Debug)]
pub struct InitModule {
    text: String,
    value: Range<usize>,
}

impl InitModule {
    pub fn parse(path: &Path, text: String) -> Result<Self, Error> {
        let values: Vec<Range<usize>> = INIT_VERSION
            .captures_iter(&text)
            .filter_map(|caps| caps.get(1).map(|m| m.range()))
            .collect();
        match values.as_slice() {
            [] => Err(Error::field_not_found(path, "__version__")),
            [value] => Ok(Self {
                value: value.clone(),
                text,
            }),
            many => Err(Error::AmbiguousField {
                path: path.to_path_buf(),
                field: "__version__".to_string(),
                count: many.len(),
            }),
        }
    }

    pub fn version(&self) -> &str {
        &self.text[self.value.clone()]
    }

    pub fn render(&self, version: &Version) -> String {
        splice(&self.text, vec![(self.value.clone(), version.to_string())])
    }
}

/// The `## Requirements` section of the README, holding
/// `- **Python**: <v>+` and `- **<Framework>**: <v>+`.
#[derive(Debug)]
pub struct ReadmeRequirements {
    path: PathBuf,
    text: String,
    framework: String,
    python_value: Range<usize>,
    framework_value: Option<Range<usize>>,
}

impl ReadmeRequirements {
    pub fn parse(path: &Path, text: String, framework: &str) -> Result<Self, Error> {
        let mut lines = lines_with_offsets(&text);
        if !lines
            .by_ref()
            .any(|(_, line)| line.trim_end() == REQUIREMENTS_HEADING)
        {
            return Err(Error::field_not_found(path, REQUIREMENTS_HEADING));
        }

        let mut python_value = None;
        let mut framework_value = None;
        for (start, line) in lines {
            if line.starts_with('#') {
                break;
            }
            if python_value.is_none() {
                python_value = labeled_value(start, line, "Python");
            }
            if framework_value.is_none() {
                framework_value = labeled_value(start, line, framework);
            }
        }

        let python_value =
            python_value.ok_or_else(|| Error::field_not_found(path, "- **Python**: line"))?;
        Ok(Self {
            path: path.to_path_buf(),
            framework: framework.to_string(),
            python_value,
            framework_value,
            text,
        })
    }

    pub fn python(&self) -> &str {
        self.text[self.python_value.clone()].trim()
    }

    pub fn framework(&self) -> Option<&str> {
        self.framework_value
            .clone()
            .map(|range| self.text[range].trim())
    }

    /// Rewrites both labeled lines. With no framework version the framework
    /// line is kept as it is.
    pub fn render(&self, python: &str, framework: Option<&str>) -> Result<String, Error> {
        let mut edits = vec![(self.python_value.clone(), format!(" {python}+"))];
        if let Some(framework_version) = framework {
            let range = self.framework_value.clone().ok_or_else(|| {
                Error::field_not_found(&self.path, format!("- **{}**: line", self.framework))
            })?;
            edits.push((range, format!(" {framework_version}+")));
        }
        Ok(splice(&self.text, edits))
    }
}

/// `.bumpversion.cfg`: the first `current_version = <value>` line.
#[derive(Debug)]
pub struct BumpversionConfig {
    text: String,
    value: Range<usize>,
}

impl BumpversionConfig {
    pub fn parse(path: &Path, text: String) -> Result<Self, Error> {
        let value = CURRENT_VERSION
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.range())
            .ok_or_else(|| Error::field_not_found(path, "current_version"))?;
        Ok(Self { text, value })
    }

    pub fn version(&self) -> &str {
        &self.text[self.value.clone()]
    }

    pub fn render(&self, version: &Version) -> String {
        splice(&self.text, vec![(self.value.clone(), version.to_string())])
    }
}

/// Sets `project.version` in `pyproject.toml`, keeping the rest of the
/// document (comments, ordering, other `version` keys) untouched.
pub fn set_pyproject_version(path: &Path, text: &str, version: &Version) -> anyhow::Result<String> {
    let mut doc = text.parse::<DocumentMut>()?;
    let Some(item) = doc
        .get_mut("project")
        .and_then(|project| project.get_mut("version"))
    else {
        return Err(Error::field_not_found(path, "project.version").into());
    };

    let decor = item.as_value().map(|v| v.decor().clone());
    *item = value(version.to_string());
    if let (Some(decor), Some(new_value)) = (decor, item.as_value_mut()) {
        *new_value.decor_mut() = decor;
    }
    Ok(doc.to_string())
}

fn labeled_value(start: usize, line: &str, label: &str) -> Option<Range<usize>> {
    let prefix = format!("- **{label}**:");
    line.starts_with(&prefix)
        .then(|| start + prefix.len()..start + line.len())
}

fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();
        (start, raw.trim_end_matches(['\n', '\r']))
    })
}

fn splice(text: &str, mut edits: Vec<(Range<usize>, String)>) -> String {
    edits.sort_by_key(|(range, _)| std::cmp::Reverse(range.start));
    let mut out = text.to_string();
    for (range, replacement) in edits {
        out.replace_range(range, &replacement);
    }
    out
}

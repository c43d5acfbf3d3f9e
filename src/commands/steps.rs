//! The external tool invocations the commands are assembled from.

use {
    crate::{
        types::{ProjectConfig, Style},
        utils::Invocation,
    },
    std::path::PathBuf,
};

pub fn install_dev(config: &ProjectConfig) -> Invocation {
    Invocation::new(
        "Installing development dependencies",
        &config.root,
        &config.python,
    )
    .args(["-m", "pip", "install", "-e", ".[dev]"])
}

pub fn format(config: &ProjectConfig) -> Invocation {
    match config.style {
        Style::Ruff => Invocation::new("Formatting code with ruff", &config.root, "ruff")
            .arg("format")
            .args(&config.sources),
        Style::BlackFlake8 => {
            Invocation::new("Formatting code with black", &config.root, "black")
                .args(&config.sources)
        }
    }
}

pub fn format_check(config: &ProjectConfig) -> Invocation {
    match config.style {
        Style::Ruff => Invocation::new("Checking formatting with ruff", &config.root, "ruff")
            .args(["format", "--check"])
            .args(&config.sources),
        Style::BlackFlake8 => {
            Invocation::new("Checking formatting with black", &config.root, "black")
                .arg("--check")
                .args(&config.sources)
        }
    }
}

/// `fix` asks the linter to apply safe fixes; flake8 has none.
pub fn lint(config: &ProjectConfig, fix: bool) -> Invocation {
    match config.style {
        Style::Ruff if fix => Invocation::new("Linting and fixing with ruff", &config.root, "ruff")
            .args(["check", "--fix"])
            .args(&config.sources),
        Style::Ruff => Invocation::new("Linting with ruff", &config.root, "ruff")
            .arg("check")
            .args(&config.sources),
        Style::BlackFlake8 => {
            Invocation::new("Linting with flake8", &config.root, "flake8").args(&config.sources)
        }
    }
}

pub fn typecheck(config: &ProjectConfig) -> Invocation {
    Invocation::new("Type checking with mypy", &config.root, "mypy").arg(&config.package)
}

pub fn test(config: &ProjectConfig) -> Invocation {
    Invocation::new("Running tests", &config.root, "pytest").args([
        format!("--cov={}", config.package),
        "--cov-report=term-missing".to_string(),
    ])
}

pub fn build(config: &ProjectConfig) -> Invocation {
    Invocation::new("Building package", &config.root, &config.python).args(["-m", "build"])
}

pub fn twine_check(config: &ProjectConfig, dists: &[PathBuf]) -> Invocation {
    Invocation::new("Checking package", &config.root, "twine")
        .arg("check")
        .args(dist_args(dists))
}

/// `test_pypi` targets the `testpypi` repository from `.pypirc`.
pub fn upload(config: &ProjectConfig, dists: &[PathBuf], test_pypi: bool) -> Invocation {
    let invocation = if test_pypi {
        Invocation::new("Uploading to TestPyPI", &config.root, "twine")
            .args(["upload", "--repository", "testpypi"])
    } else {
        Invocation::new("Uploading to PyPI", &config.root, "twine").arg("upload")
    };
    invocation.args(dist_args(dists))
}

fn dist_args(dists: &[PathBuf]) -> impl Iterator<Item = String> + '_ {
    dists.iter().map(|path| path.display().to_string())
}

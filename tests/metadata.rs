mod common;

use {
    common::{dummy_project, read},
    pkgtask::{
        bump_version::{bump_and_sync, bump_version, BumpLevel},
        metadata,
        types::ProjectConfig,
        Version,
    },
    pretty_assertions::assert_eq,
    std::fs,
};

#[test]
fn test_load_fixture_record() {
    let project = dummy_project();
    let config = ProjectConfig::load(project.path()).unwrap();
    let record = metadata::load(&config.pyproject_path()).unwrap();

    assert_eq!(config.package, "metachoices");
    assert_eq!(record.version, Version::new(0, 1, 3));
    assert_eq!(record.requires_python, ">=3.10");
    assert_eq!(
        metadata::extract_dependency_version(&record.dependencies, &config.framework),
        Some("4.2".to_string())
    );
}

#[test]
fn test_sync_fixture() {
    let project = dummy_project();
    let root = project.path();
    let config = ProjectConfig::load(root).unwrap();
    let record = metadata::load(&config.pyproject_path()).unwrap();
    assert!(!metadata::validate_consistency(&config, &record).unwrap());

    let report = metadata::sync(&config, false).unwrap();

    assert_eq!(report.consistent, Some(true));
    assert_eq!(report.changed.len(), 3);
    assert!(read(root, "metachoices/__init__.py").contains("__version__ = \"0.1.3\"\n"));
    assert!(read(root, "README.md").contains("- **Python**: 3.10+\n- **Django**: 4.2+\n"));
    assert!(read(root, ".bumpversion.cfg").contains("current_version = 0.1.3\n"));
    assert!(read(root, "README.md").contains("## Installation"));

    let pyproject_before = read(root, "pyproject.toml");
    let again = metadata::sync(&config, false).unwrap();
    assert!(again.changed.is_empty());
    assert_eq!(read(root, "pyproject.toml"), pyproject_before);
}

#[test]
fn test_bump_fixture() {
    let project = dummy_project();
    let root = project.path();
    let config = ProjectConfig::load(root).unwrap();
    let record = metadata::load(&config.pyproject_path()).unwrap();

    let new_version = bump_version(&BumpLevel::Major, &record.version).unwrap();
    let report = bump_and_sync(&config, &new_version, false).unwrap();

    assert_eq!(report.version, Version::new(1, 0, 0));
    assert_eq!(report.consistent, Some(true));
    let pyproject = read(root, "pyproject.toml");
    assert!(pyproject.contains("version = \"1.0.0\"\n"));
    // other keys named like version are left alone
    assert!(pyproject.contains("target-version = \"py310\"\n"));
    assert!(read(root, "metachoices/__init__.py").contains("__version__ = \"1.0.0\"\n"));
    assert!(read(root, ".bumpversion.cfg").contains("current_version = 1.0.0\n"));
}

#[test]
fn test_bump_without_bumpversion_config() {
    let project = dummy_project();
    let root = project.path();
    fs::remove_file(root.join(".bumpversion.cfg")).unwrap();
    let config = ProjectConfig::load(root).unwrap();

    let report = bump_and_sync(&config, &Version::new(0, 1, 4), false).unwrap();

    assert_eq!(report.consistent, Some(true));
    assert!(!root.join(".bumpversion.cfg").exists());
}

#[test]
fn test_broken_artifact_aborts_whole_bump() {
    let project = dummy_project();
    let root = project.path();
    fs::write(root.join(".bumpversion.cfg"), "[bumpversion]\ncommit = True\n").unwrap();
    let config = ProjectConfig::load(root).unwrap();
    let before = [
        read(root, "pyproject.toml"),
        read(root, "metachoices/__init__.py"),
        read(root, "README.md"),
    ];

    let err = bump_and_sync(&config, &Version::new(0, 2, 0), false).unwrap_err();

    assert!(format!("{err:#}").contains("current_version not found"), "{err:#}");
    assert_eq!(
        [
            read(root, "pyproject.toml"),
            read(root, "metachoices/__init__.py"),
            read(root, "README.md"),
        ],
        before
    );
}

use {
    crate::{metadata, types::ProjectConfig},
    anyhow::Result,
    clap::Args,
    std::io::Write,
};

#[derive(Args)]
pub struct CommandArgs {
    #[arg(long, help = "Print the record as JSON")]
    pub json: bool,
}

/// Prints the `[project]` record the other artifacts are synced from.
pub fn run(config: &ProjectConfig, args: CommandArgs, out: &mut dyn Write) -> Result<()> {
    let record = metadata::load(&config.pyproject_path())?;

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &record)?;
        writeln!(out)?;
        return Ok(());
    }

    if let Some(name) = &record.name {
        writeln!(out, "name: {name}")?;
    }
    writeln!(out, "version: {}", record.version)?;
    writeln!(out, "requires-python: {}", record.requires_python)?;
    let framework = metadata::extract_dependency_version(&record.dependencies, &config.framework);
    writeln!(
        out,
        "{}: {}",
        config.framework,
        framework.as_deref().unwrap_or("not a dependency")
    )?;
    writeln!(out, "dependencies:")?;
    for dependency in &record.dependencies {
        writeln!(out, "  {dependency}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use {super::*, pretty_assertions::assert_eq, std::fs};

    fn project() -> (tempfile::TempDir, ProjectConfig) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("pyproject.toml"),
            "[project]\nname = \"django-metachoices\"\nversion = \"1.0.0\"\nrequires-python = \
             \">=3.10\"\ndependencies = [\"Django>=4.2\", \"pytest>=7.0\"]\n",
        )
        .unwrap();
        let config = ProjectConfig::load(dir.path()).unwrap();
        (dir, config)
    }

    #[test]
    fn test_show_text() {
        let (_dir, config) = project();
        let mut out: Vec<u8> = Vec::new();
        run(&config, CommandArgs { json: false }, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "name: django-metachoices\nversion: 1.0.0\nrequires-python: >=3.10\nDjango: \
             4.2\ndependencies:\n  Django>=4.2\n  pytest>=7.0\n"
        );
    }

    #[test]
    fn test_show_json() {
        let (_dir, config) = project();
        let mut out: Vec<u8> = Vec::new();
        run(&config, CommandArgs { json: true }, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "django-metachoices",
                "version": "1.0.0",
                "requires_python": ">=3.10",
                "dependencies": ["Django>=4.2", "pytest>=7.0"],
            })
        );
    }
}

use {
    crate::{metadata, types::ProjectConfig},
    anyhow::{anyhow, Result},
};

/// Fails when any dependent artifact disagrees with `pyproject.toml`.
pub fn run(config: &ProjectConfig) -> Result<()> {
    let record = metadata::load(&config.pyproject_path())?;
    if metadata::validate_consistency(config, &record)? {
        Ok(())
    } else {
        Err(anyhow!(
            "metadata is out of sync with version {}, run `pkgtask sync`",
            record.version
        ))
    }
}

use {
    super::{
        bump_version::{bump_and_sync, bump_version, BumpLevel},
        steps, tasks,
    },
    crate::{
        metadata,
        types::ProjectConfig,
        utils::{self, run_all, Runner},
    },
    anyhow::{Context, Result},
    clap::Args,
    log::info,
    std::io::{BufRead, Write},
};

#[derive(Args)]
pub struct CommandArgs {
    #[arg(value_enum)]
    pub level: BumpLevel,

    #[arg(long, help = "Upload to TestPyPI instead of PyPI")]
    pub test: bool,

    #[arg(short, long, help = "Skip the confirmation prompt")]
    pub yes: bool,
}

/// Bumps the version, syncs metadata, rebuilds, checks and uploads.
///
/// `input`/`output` carry the confirmation prompt.
pub fn run(
    config: &ProjectConfig,
    args: CommandArgs,
    runner: &mut dyn Runner,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<()> {
    let record = metadata::load(&config.pyproject_path())?;
    let new_version = bump_version(&args.level, &record.version)?;

    info!("current version: {}", record.version);
    info!("new version: {new_version}");

    if !args.yes && !confirm(input, output, "Continue? (y/N): ")? {
        info!("aborted");
        return Ok(());
    }

    let report = bump_and_sync(config, &new_version, false)?;
    report.log_summary();

    tasks::clean(config)?;
    runner.run(&steps::build(config))?;
    let dists = utils::dist_files(&config.dist_dir())?;
    run_all(
        runner,
        &[
            steps::twine_check(config, &dists),
            steps::upload(config, &dists, args.test),
        ],
    )?;

    let name = record.name.as_deref().unwrap_or(&config.package);
    let index = if args.test {
        "https://test.pypi.org"
    } else {
        "https://pypi.org"
    };
    info!("successfully published version {new_version}");
    info!("view at: {index}/project/{name}/{new_version}/");
    Ok(())
}

/// Only an explicit `y` (any case) confirms.
pub fn confirm(input: &mut dyn BufRead, output: &mut dyn Write, prompt: &str) -> Result<bool> {
    write!(output, "{prompt}")?;
    output.flush()?;
    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("failed to read the confirmation")?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

use {
    super::{steps, tasks},
    crate::{
        types::ProjectConfig,
        utils::{self, run_all, Runner},
    },
    anyhow::Result,
    log::info,
};

/// Clean, install, format, lint, type check, test, build and verify the
/// distributions, stopping at the first failing step.
pub fn run(config: &ProjectConfig, runner: &mut dyn Runner) -> Result<()> {
    info!("building and testing {}", config.root.display());

    tasks::clean(config)?;
    run_all(
        runner,
        &[
            steps::install_dev(config),
            steps::format(config),
            steps::lint(config, true),
            steps::typecheck(config),
            steps::test(config),
            steps::build(config),
        ],
    )?;

    let dists = utils::dist_files(&config.dist_dir())?;
    runner.run(&steps::twine_check(config, &dists))?;

    info!("all checks passed, the package is ready for publication");
    info!("publish to TestPyPI with `pkgtask publish <level> --test`, to PyPI without `--test`");
    Ok(())
}

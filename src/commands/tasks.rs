//! Single-purpose development tasks: test, lint, format, build, clean, check.

use {
    super::steps,
    crate::{
        types::ProjectConfig,
        utils::{self, run_each, Runner},
    },
    anyhow::{anyhow, Result},
    log::info,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    Test,
    Lint,
    Format,
    FormatCheck,
    Build,
    Clean,
    Check,
}

pub fn run(config: &ProjectConfig, task: Task, runner: &mut dyn Runner) -> Result<()> {
    match task {
        Task::Test => runner.run(&steps::test(config)),
        Task::Lint => runner.run(&steps::lint(config, false)),
        Task::Format => runner.run(&steps::format(config)),
        Task::FormatCheck => runner.run(&steps::format_check(config)),
        Task::Build => runner.run(&steps::build(config)),
        Task::Clean => clean(config),
        Task::Check => check(config, runner),
    }
}

pub fn clean(config: &ProjectConfig) -> Result<()> {
    info!("cleaning build artifacts");
    let removed = utils::remove_build_artifacts(&config.root)?;
    if removed.is_empty() {
        info!("nothing to clean");
    }
    Ok(())
}

/// Lint, format check and tests; all three run even if one fails.
pub fn check(config: &ProjectConfig, runner: &mut dyn Runner) -> Result<()> {
    let checks = [
        steps::lint(config, false),
        steps::format_check(config),
        steps::test(config),
    ];
    if run_each(runner, &checks) {
        info!("all checks passed");
        Ok(())
    } else {
        Err(anyhow!("some checks failed"))
    }
}

use {
    anyhow::Result,
    clap::{Args, Parser, Subcommand},
    log::error,
    pkgtask::{
        commands::tasks::Task,
        types::ProjectConfig,
        utils::{current_project_root, SystemRunner},
    },
    std::{io, path::PathBuf},
};

#[derive(Parser)]
#[command(name = "pkgtask", about = "Package development tasks", version)]
struct Pkgtask {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Bump the version and sync every artifact")]
    BumpVersion(pkgtask::commands::bump_version::CommandArgs),
    #[command(about = "Sync metadata from pyproject.toml")]
    Sync(pkgtask::commands::sync::CommandArgs),
    #[command(about = "Check that versions are consistent across files")]
    Validate,
    #[command(about = "Show the project metadata")]
    Show(pkgtask::commands::show::CommandArgs),
    #[command(about = "Bump, build, check and upload to PyPI")]
    Publish(pkgtask::commands::publish::CommandArgs),
    #[command(about = "Clean, install, format, lint, type check, test, build and check")]
    Ci,
    #[command(about = "Run tests with coverage")]
    Test,
    #[command(about = "Run linting checks")]
    Lint,
    #[command(about = "Format code")]
    Format,
    #[command(about = "Check code formatting")]
    FormatCheck,
    #[command(about = "Build the package")]
    Build,
    #[command(about = "Clean build artifacts")]
    Clean,
    #[command(about = "Run all checks (lint, format-check, test)")]
    Check,
}

#[derive(Args, Debug)]
pub struct GlobalOptions {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, help = "Project root (default: nearest pyproject.toml)")]
    pub root: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = try_main().await {
        error!("Error: {err}");
        for (i, cause) in err.chain().skip(1).enumerate() {
            error!("  {}: {}", i.saturating_add(1), cause);
        }
        std::process::exit(1);
    }
}

async fn try_main() -> Result<()> {
    let pkgtask = Pkgtask::parse();

    if pkgtask.global.verbose {
        std::env::set_var("RUST_LOG", "debug");
    } else {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let root = match pkgtask.global.root {
        Some(root) => root,
        None => current_project_root()?,
    };
    let config = ProjectConfig::load(&root)?;
    let mut runner = SystemRunner;

    match pkgtask.command {
        Commands::BumpVersion(args) => pkgtask::commands::bump_version::run(&config, args)?,
        Commands::Sync(args) => pkgtask::commands::sync::run(&config, args)?,
        Commands::Validate => pkgtask::commands::validate::run(&config)?,
        Commands::Show(args) => {
            pkgtask::commands::show::run(&config, args, &mut io::stdout().lock())?;
        }
        Commands::Publish(args) => {
            pkgtask::commands::publish::run(
                &config,
                args,
                &mut runner,
                &mut io::stdin().lock(),
                &mut io::stdout(),
            )?;
        }
        Commands::Ci => pkgtask::commands::ci::run(&config, &mut runner)?,
        Commands::Test => pkgtask::commands::tasks::run(&config, Task::Test, &mut runner)?,
        Commands::Lint => pkgtask::commands::tasks::run(&config, Task::Lint, &mut runner)?,
        Commands::Format => pkgtask::commands::tasks::run(&config, Task::Format, &mut runner)?,
        Commands::FormatCheck => {
            pkgtask::commands::tasks::run(&config, Task::FormatCheck, &mut runner)?;
        }
        Commands::Build => pkgtask::commands::tasks::run(&config, Task::Build, &mut runner)?,
        Commands::Clean => pkgtask::commands::tasks::run(&config, Task::Clean, &mut runner)?,
        Commands::Check => pkgtask::commands::tasks::run(&config, Task::Check, &mut runner)?,
    }

    Ok(())
}

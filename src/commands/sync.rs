use {
    crate::{metadata, types::ProjectConfig},
    anyhow::Result,
    clap::Args,
};

#[derive(Args)]
pub struct CommandArgs {
    #[arg(long, help = "Show what would change without writing any file")]
    pub dry_run: bool,
}

pub fn run(config: &ProjectConfig, args: CommandArgs) -> Result<()> {
    let report = metadata::sync(config, args.dry_run)?;
    report.log_summary();
    Ok(())
}

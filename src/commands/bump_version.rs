use {
    crate::{
        metadata::{self, SyncReport},
        types::{Error, ProjectConfig},
    },
    anyhow::{Context, Result},
    clap::{Args, ValueEnum},
    log::info,
    semver::Version,
    std::{fmt, str::FromStr},
};

#[derive(Args)]
pub struct CommandArgs {
    #[arg(value_enum)]
    pub level: BumpLevel,

    #[arg(long, help = "Show what would change without writing any file")]
    pub dry_run: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BumpLevel {
    #[value(help = "Bump major: x.y.z -> x+1.0.0")]
    Major,
    #[value(help = "Bump minor: x.y.z -> x.y+1.0")]
    Minor,
    #[value(help = "Bump patch: x.y.z -> x.y.z+1")]
    Patch,
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BumpLevel::Major => "major",
            BumpLevel::Minor => "minor",
            BumpLevel::Patch => "patch",
        })
    }
}

impl FromStr for BumpLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(BumpLevel::Major),
            "minor" => Ok(BumpLevel::Minor),
            "patch" => Ok(BumpLevel::Patch),
            other => Err(Error::InvalidPolicy(other.to_string())),
        }
    }
}

pub fn run(config: &ProjectConfig, args: CommandArgs) -> Result<()> {
    let record = metadata::load(&config.pyproject_path())?;
    let new_version = bump_version(&args.level, &record.version)?;
    info!("bumping {} from {} to {new_version}", args.level, record.version);

    let report = bump_and_sync(config, &new_version, args.dry_run)?;
    report.log_summary();
    Ok(())
}

/// Writes `new_version` into `pyproject.toml` and every dependent artifact in
/// one all-or-none commit.
pub fn bump_and_sync(
    config: &ProjectConfig,
    new_version: &Version,
    dry_run: bool,
) -> Result<SyncReport> {
    let plan = metadata::plan_bump(config, new_version)
        .context(format!("failed to plan the bump to {new_version}"))?;
    metadata::apply(config, plan, dry_run)
}

/// Parses a plain `MAJOR.MINOR.PATCH` version.
///
/// Pre-release and build suffixes are rejected, as are leading zeros, so that
/// formatting a parsed version always gives back the input string.
pub fn parse_version(s: &str) -> Result<Version, Error> {
    let version = Version::parse(s).map_err(|_| Error::Format(s.to_string()))?;
    if !version.pre.is_empty() || !version.build.is_empty() {
        return Err(Error::Format(s.to_string()));
    }
    Ok(version)
}

pub fn bump_version(level: &BumpLevel, current: &Version) -> Result<Version, Error> {
    let overflow = || Error::VersionOverflow {
        level: level.to_string(),
        version: current.to_string(),
    };

    let mut new_version = current.clone();
    match level {
        BumpLevel::Major => {
            new_version.major = new_version.major.checked_add(1).ok_or_else(overflow)?;
            new_version.minor = 0;
            new_version.patch = 0;
        }
        BumpLevel::Minor => {
            new_version.minor = new_version.minor.checked_add(1).ok_or_else(overflow)?;
            new_version.patch = 0;
        }
        BumpLevel::Patch => {
            new_version.patch = new_version.patch.checked_add(1).ok_or_else(overflow)?;
        }
    }

    Ok(new_version)
}

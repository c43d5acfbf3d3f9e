use {
    super::{
        artifacts::{set_pyproject_version, BumpversionConfig, InitModule, ReadmeRequirements},
        extract_dependency_version, load, parse_record, strip_comparators,
    },
    crate::{
        types::{config::PYPROJECT, MetadataRecord, ProjectConfig},
        utils::fs::{commit_all, PendingWrite},
    },
    anyhow::{Context, Result},
    log::{debug, info, warn},
    semver::Version,
    std::{
        fs,
        path::{Path, PathBuf},
    },
};

/// Target contents for every artifact, computed before anything is written.
#[derive(Debug)]
pub struct SyncPlan {
    pub record: MetadataRecord,
    pub writes: Vec<PendingWrite>,
}

impl SyncPlan {
    pub fn changed(&self) -> impl Iterator<Item = &PendingWrite> {
        self.writes.iter().filter(|write| !write.is_noop())
    }
}

#[derive(Debug)]
pub struct SyncReport {
    pub version: Version,
    pub changed: Vec<PathBuf>,
    pub dry_run: bool,
    /// `None` for dry runs, where nothing was written to validate.
    pub consistent: Option<bool>,
}

impl SyncReport {
    pub fn log_summary(&self) {
        if self.dry_run {
            info!(
                "dry run: {} file(s) would change for version {}",
                self.changed.len(),
                self.version
            );
            return;
        }
        match self.consistent {
            Some(true) => info!("all metadata synchronized at version {}", self.version),
            _ => warn!("some inconsistencies remain after syncing {}", self.version),
        }
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).context(format!("failed to read {}", path.display()))
}

pub fn plan_sync(config: &ProjectConfig, record: &MetadataRecord) -> Result<SyncPlan> {
    let mut writes = vec![];

    let init_path = config.init_module_path();
    let init_text = read(&init_path)?;
    let init = InitModule::parse(&init_path, init_text.clone())?;
    writes.push(PendingWrite::new(
        &init_path,
        init_text,
        init.render(&record.version),
    ));

    let readme_path = config.readme_path();
    let python = strip_comparators(&record.requires_python);
    let framework = extract_dependency_version(&record.dependencies, &config.framework);
    if framework.is_none() {
        warn!(
            "no {} dependency in {PYPROJECT}, leaving its README line unchanged",
            config.framework
        );
    }
    let readme_text = read(&readme_path)?;
    let readme = ReadmeRequirements::parse(&readme_path, readme_text.clone(), &config.framework)?;
    writes.push(PendingWrite::new(
        &readme_path,
        readme_text,
        readme.render(&python, framework.as_deref())?,
    ));

    let bumpversion_path = config.bumpversion_path();
    if bumpversion_path.exists() {
        let text = read(&bumpversion_path)?;
        let bumpversion = BumpversionConfig::parse(&bumpversion_path, text.clone())?;
        writes.push(PendingWrite::new(
            &bumpversion_path,
            text,
            bumpversion.render(&record.version),
        ));
    } else {
        debug!("{} not found, skipping", bumpversion_path.display());
    }

    Ok(SyncPlan {
        record: record.clone(),
        writes,
    })
}

/// Plans `project.version = new_version` plus the matching artifact updates.
pub fn plan_bump(config: &ProjectConfig, new_version: &Version) -> Result<SyncPlan> {
    let pyproject_path = config.pyproject_path();
    let original = read(&pyproject_path)?;
    let updated = set_pyproject_version(&pyproject_path, &original, new_version)?;
    let record = parse_record(&updated)
        .context(format!("failed to load metadata from {}", pyproject_path.display()))?;

    let mut plan = plan_sync(config, &record)?;
    plan.writes
        .insert(0, PendingWrite::new(&pyproject_path, original, updated));
    Ok(plan)
}

/// Commits `plan` (unless `dry_run`) and validates the result.
pub fn apply(config: &ProjectConfig, plan: SyncPlan, dry_run: bool) -> Result<SyncReport> {
    let changed: Vec<PathBuf> = plan.changed().map(|write| write.path.clone()).collect();
    for write in &plan.writes {
        if write.is_noop() {
            debug!("{} is up to date", write.path.display());
        } else if dry_run {
            info!("would update {}", write.path.display());
        }
    }

    if dry_run {
        return Ok(SyncReport {
            version: plan.record.version,
            changed,
            dry_run,
            consistent: None,
        });
    }

    commit_all(&plan.writes)?;
    let consistent = validate_consistency(config, &plan.record)?;
    Ok(SyncReport {
        version: plan.record.version,
        changed,
        dry_run,
        consistent: Some(consistent),
    })
}

/// Load → plan → commit → validate.
pub fn sync(config: &ProjectConfig, dry_run: bool) -> Result<SyncReport> {
    info!("syncing metadata from {PYPROJECT}");
    let record = load(&config.pyproject_path())?;
    let plan = plan_sync(config, &record)?;
    apply(config, plan, dry_run)
}

/// Compares the version fields of the dependent artifacts with `record`.
///
/// Mismatches (including fields that cannot be found) are logged and make the
/// result `false`; only I/O failures are errors.
pub fn validate_consistency(config: &ProjectConfig, record: &MetadataRecord) -> Result<bool> {
    let expected = record.version.to_string();
    let mut consistent = true;
    let mut check = |path: &Path, found: Result<String, crate::types::Error>| match found {
        Ok(found) if found == expected => debug!("{} is at {found}", path.display()),
        Ok(found) => {
            warn!(
                "version mismatch: {PYPROJECT} ({expected}) vs {} ({found})",
                path.display()
            );
            consistent = false;
        }
        Err(err) => {
            warn!("{err}");
            consistent = false;
        }
    };

    let init_path = config.init_module_path();
    let found = InitModule::parse(&init_path, read(&init_path)?).map(|m| m.version().to_string());
    check(&init_path, found);

    let bumpversion_path = config.bumpversion_path();
    if bumpversion_path.exists() {
        let found = BumpversionConfig::parse(&bumpversion_path, read(&bumpversion_path)?)
            .map(|c| c.version().to_string());
        check(&bumpversion_path, found);
    }

    if consistent {
        info!("all versions are consistent");
    }
    Ok(consistent)
}

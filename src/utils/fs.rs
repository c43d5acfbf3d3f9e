use {
    crate::types::config::PYPROJECT,
    anyhow::{anyhow, Context, Result},
    ignore::overrides::OverrideBuilder,
    log::{debug, error, info, warn},
    std::{
        fs,
        path::{Path, PathBuf},
    },
};

/// Top-level build outputs removed by `clean`, as gitignore-style globs.
pub const BUILD_ARTIFACTS: [&str; 3] = ["build/", "dist/", "*.egg-info/"];

/// A file rewrite that has been computed but not yet committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    pub path: PathBuf,
    pub original: String,
    pub updated: String,
}

impl PendingWrite {
    pub fn new(path: impl Into<PathBuf>, original: String, updated: String) -> Self {
        Self {
            path: path.into(),
            original,
            updated,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.original == self.updated
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.pkgtask-tmp"))
}

/// Writes every changed file or none of them.
///
/// New contents are first staged next to their targets, then renamed into
/// place. A symlinked target is resolved first so the file it points at is
/// replaced and the link survives. The staged file takes over the target's
/// permissions. On any failure the staged files are removed and targets that
/// were already replaced get their original contents back.
pub fn commit_all(writes: &[PendingWrite]) -> Result<usize> {
    let changed: Vec<&PendingWrite> = writes.iter().filter(|w| !w.is_noop()).collect();

    let mut staged = scopeguard::guard(Vec::<PathBuf>::new(), |staged| {
        for path in staged {
            if path.exists() {
                let _ = fs::remove_file(&path);
            }
        }
    });
    let mut targets = Vec::with_capacity(changed.len());
    for write in &changed {
        let target = fs::canonicalize(&write.path)
            .context(format!("failed to resolve {}", write.path.display()))?;
        let permissions = fs::metadata(&target)
            .context(format!("failed to read metadata of {}", target.display()))?
            .permissions();
        let tmp = staging_path(&target);
        debug!("staging {}", tmp.display());
        fs::write(&tmp, &write.updated).context(format!("failed to write {}", tmp.display()))?;
        staged.push(tmp.clone());
        fs::set_permissions(&tmp, permissions)
            .context(format!("failed to set permissions on {}", tmp.display()))?;
        targets.push(target);
    }

    let mut replaced = scopeguard::guard(Vec::<&PendingWrite>::new(), |replaced| {
        for write in replaced.iter().rev() {
            match fs::write(&write.path, &write.original) {
                Ok(()) => warn!("restored {}", write.path.display()),
                Err(err) => error!("failed to restore {}: {err}", write.path.display()),
            }
        }
    });
    for ((write, target), tmp) in changed.iter().zip(&targets).zip(staged.iter()) {
        fs::rename(tmp, target).context(format!(
            "failed to replace {} with {}",
            target.display(),
            tmp.display()
        ))?;
        replaced.push(*write);
        info!("updated {}", write.path.display());
    }

    let _ = scopeguard::ScopeGuard::into_inner(replaced);
    let _ = scopeguard::ScopeGuard::into_inner(staged);
    Ok(changed.len())
}

/// Nearest ancestor of `start` (inclusive) that holds a `pyproject.toml`.
pub fn find_project_root(start: &Path) -> Result<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(PYPROJECT).is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("no {PYPROJECT} found in {} or its parents", start.display()))
}

pub fn current_project_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("failed to get the current directory")?;
    find_project_root(&cwd)
}

/// Removes the top-level entries of `root` matching [`BUILD_ARTIFACTS`].
pub fn remove_build_artifacts(root: &Path) -> Result<Vec<PathBuf>> {
    let mut builder = OverrideBuilder::new(root);
    for glob in BUILD_ARTIFACTS {
        builder.add(glob)?;
    }
    let overrides = builder.build()?;

    let mut entries = fs::read_dir(root)
        .context(format!("failed to read {}", root.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut removed = vec![];
    for entry in entries {
        let path = entry.path();
        let is_dir = entry.file_type()?.is_dir();
        if !overrides.matched(&path, is_dir).is_whitelist() {
            continue;
        }
        fs::remove_dir_all(&path).context(format!("failed to remove {}", path.display()))?;
        info!("removed {}", path.display());
        removed.push(path);
    }
    Ok(removed)
}

/// Files in `dist/`, sorted, as `dist/*` would expand.
pub fn dist_files(dist: &Path) -> Result<Vec<PathBuf>> {
    let mut files = vec![];
    if dist.is_dir() {
        for entry in fs::read_dir(dist).context(format!("failed to read {}", dist.display()))? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
    }
    if files.is_empty() {
        return Err(anyhow!("no distributions found in {}", dist.display()));
    }
    files.sort();
    Ok(files)
}

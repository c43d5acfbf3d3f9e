use {
    anyhow::{anyhow, Context, Result},
    log::{error, info},
    std::{
        fmt,
        path::{Path, PathBuf},
        process::Command,
    },
};

/// One external tool call, run in `cwd` without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub description: String,
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(description: impl Into<String>, cwd: &Path, program: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            program: program.into(),
            args: vec![],
            cwd: cwd.to_path_buf(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

pub trait Runner {
    fn run(&mut self, invocation: &Invocation) -> Result<()>;
}

/// Runs tools for real, with inherited stdio and no timeout.
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        info!("{}: `{invocation}`", invocation.description);
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .status()
            .context(format!("failed to run `{}`", invocation.program))?;
        if !status.success() {
            return Err(anyhow!(
                "{} failed: `{invocation}` exited with {status}",
                invocation.description
            ));
        }
        Ok(())
    }
}

/// Records invocations instead of running them; fails any invocation whose
/// command line contains `fail_on`.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    pub invocations: Vec<Invocation>,
    pub fail_on: Option<String>,
}

impl RecordingRunner {
    pub fn failing_on(pattern: &str) -> Self {
        Self {
            invocations: vec![],
            fail_on: Some(pattern.to_string()),
        }
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.invocations.iter().map(ToString::to_string).collect()
    }
}

impl Runner for RecordingRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        self.invocations.push(invocation.clone());
        match &self.fail_on {
            Some(pattern) if invocation.to_string().contains(pattern.as_str()) => {
                Err(anyhow!("{} failed: `{invocation}`", invocation.description))
            }
            _ => Ok(()),
        }
    }
}

/// Runs `steps` in order and stops at the first failure.
pub fn run_all(runner: &mut dyn Runner, steps: &[Invocation]) -> Result<()> {
    for step in steps {
        runner.run(step)?;
    }
    Ok(())
}

/// Runs every step even after a failure; `true` when all succeeded.
pub fn run_each(runner: &mut dyn Runner, steps: &[Invocation]) -> bool {
    let mut success = true;
    for step in steps {
        if let Err(err) = runner.run(step) {
            error!("{err:#}");
            success = false;
        }
    }
    success
}

//! The process boundary: run `<tool> <subcommand> <args...>` and capture output.
//!
//! [`Invoker`] is the only I/O seam of the crate. [`ProcessInvoker`] spawns real
//! processes; `crate::mock::MockInvoker` replays scripted results in tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Mutex;
use std::time::Instant;

use crate::error::LaunchError;
use crate::util::tools;

/// Outcome of running one subcommand. A non-zero `exit_code` is a normal result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub exit_code: i32,
    pub stderr: String,
    pub stdout: String,
}

impl Invocation {
    pub fn new(exit_code: i32, stderr: impl Into<String>, stdout: impl Into<String>) -> Self {
        Self {
            exit_code,
            stderr: stderr.into(),
            stdout: stdout.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs a subcommand of a collection (`samtools`, `bcftools`, ...).
///
/// Implementations must return `Ok` for any exit status and reserve `Err` for
/// failures to launch. With `capture_stdout == false` the returned stdout is
/// empty; stderr is always captured.
pub trait Invoker: Send + Sync {
    fn invoke(
        &self,
        collection: &str,
        subcommand: &str,
        args: &[String],
        capture_stdout: bool,
    ) -> Result<Invocation, LaunchError>;
}

/// Spawns the collection's executable as a child process.
///
/// Executables are resolved once per collection and cached.
#[derive(Debug, Default)]
pub struct ProcessInvoker {
    overrides: HashMap<String, PathBuf>,
    resolved: Mutex<HashMap<String, PathBuf>>,
}

impl ProcessInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin a collection to an explicit executable.
    pub fn with_path(mut self, collection: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.overrides.insert(collection.into(), path.into());
        self
    }

    /// Like [`with_path`](Self::with_path) but a no-op for `None`; handy for CLI flags.
    pub fn with_path_opt(self, collection: &str, path: Option<&Path>) -> Self {
        match path {
            Some(p) => self.with_path(collection, p),
            None => self,
        }
    }

    /// Executable that will be run for `collection`.
    pub fn resolve(&self, collection: &str) -> Result<PathBuf, LaunchError> {
        let mut cache = self.resolved.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(p) = cache.get(collection) {
            return Ok(p.clone());
        }
        let bin = tools::resolve_bin(
            collection,
            self.overrides.get(collection).map(PathBuf::as_path),
        )?;
        log::debug!("resolved {collection} to {}", bin.display());
        cache.insert(collection.to_string(), bin.clone());
        Ok(bin)
    }

    /// First non-empty line of `<tool> --version`, stdout preferred over stderr.
    pub fn version(&self, collection: &str) -> Result<String, LaunchError> {
        let bin = self.resolve(collection)?;
        let out = Command::new(&bin)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .map_err(|source| LaunchError::Spawn {
                program: bin.clone(),
                source,
            })?;

        let first_line = |bytes: &[u8]| {
            String::from_utf8_lossy(bytes)
                .lines()
                .map(str::trim)
                .find(|l| !l.is_empty())
                .map(str::to_string)
        };
        first_line(&out.stdout)
            .or_else(|| first_line(&out.stderr))
            .ok_or(LaunchError::NoVersion { program: bin })
    }
}

impl Invoker for ProcessInvoker {
    fn invoke(
        &self,
        collection: &str,
        subcommand: &str,
        args: &[String],
        capture_stdout: bool,
    ) -> Result<Invocation, LaunchError> {
        let bin = self.resolve(collection)?;
        let started = Instant::now();

        let child = Command::new(&bin)
            .arg(subcommand)
            .args(args)
            .stdin(Stdio::null())
            .stdout(if capture_stdout {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: bin.clone(),
                source,
            })?;
        let out = child
            .wait_with_output()
            .map_err(|source| LaunchError::Wait {
                program: bin.clone(),
                source,
            })?;

        let exit_code = tools::exit_code(out.status);
        log::debug!(
            "{} {subcommand} {:?} -> {exit_code} in {}",
            bin.display(),
            args,
            humantime::format_duration(started.elapsed())
        );

        Ok(Invocation {
            exit_code,
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
        })
    }
}

#[cfg(all(test, unix))]
pub(crate) mod test_support {
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// Write an executable `sh` script named `name` into `dir`.
    pub fn fake_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }
}

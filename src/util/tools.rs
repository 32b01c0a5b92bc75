use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use crate::error::LaunchError;

/// Environment variable consulted for a collection's binary,
/// e.g. `samtools` -> `HTS_DISPATCH_SAMTOOLS`.
pub fn env_var_for(collection: &str) -> String {
    let suffix: String = collection
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("HTS_DISPATCH_{suffix}")
}

/// Resolve the executable behind a collection.
/// Priority: explicit path > environment variable > PATH search
pub fn resolve_bin(collection: &str, explicit: Option<&Path>) -> Result<PathBuf, LaunchError> {
    if let Some(p) = explicit {
        if p.exists() {
            return Ok(p.to_path_buf());
        }
        return Err(LaunchError::MissingPath {
            collection: collection.to_string(),
            path: p.to_path_buf(),
        });
    }

    let env_var = env_var_for(collection);
    if let Some(envp) = std::env::var_os(&env_var).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(envp));
    }

    which::which(collection).map_err(|_| LaunchError::NotFound {
        collection: collection.to_string(),
        env_var,
    })
}

/// Numeric exit code; signals map to 128 + signo as a shell reports them.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return 128 + sig;
        }
    }
    -1
}

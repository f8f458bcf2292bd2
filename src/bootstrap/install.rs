//! Dependency installation subprocess

use std::fmt;
use std::path::Path;
use std::process::Command;

/// Result of the install step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Succeeded,
    Skipped,
    /// Spawn error or non-zero exit, with a description
    Failed(String),
}

impl InstallOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for InstallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => write!(f, "dependencies installed"),
            Self::Skipped => write!(f, "install skipped"),
            Self::Failed(reason) => write!(f, "install failed: {}", reason),
        }
    }
}

/// Run `command` (program plus arguments) inside `dir`
///
/// Never returns an error: failures are logged and reported in the outcome.
pub fn run_install(command: &[String], dir: &Path) -> InstallOutcome {
    let Some((program, args)) = command.split_first() else {
        tracing::warn!("no install command configured");
        return InstallOutcome::Skipped;
    };

    tracing::info!(command = %command.join(" "), dir = %dir.display(), "installing dependencies");

    match Command::new(program).args(args).current_dir(dir).status() {
        Ok(status) if status.success() => InstallOutcome::Succeeded,
        Ok(status) => {
            let reason = match status.code() {
                Some(code) => format!("`{}` exited with status {}", command.join(" "), code),
                None => format!("`{}` was terminated by a signal", command.join(" ")),
            };
            tracing::error!("{}", reason);
            InstallOutcome::Failed(reason)
        }
        Err(e) => {
            let reason = format!("could not start `{}`: {}", program, e);
            tracing::error!("{}", reason);
            InstallOutcome::Failed(reason)
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cmd(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_success_and_failure() {
        let dir = TempDir::new().unwrap();
        assert_eq!(run_install(&cmd(&["true"]), dir.path()), InstallOutcome::Succeeded);

        let failed = run_install(&cmd(&["false"]), dir.path());
        assert!(failed.is_failure());
        assert!(failed.to_string().contains("exited with status 1"));
    }

    #[test]
    fn test_missing_program_is_a_failure() {
        let dir = TempDir::new().unwrap();
        let outcome = run_install(&cmd(&["servicehub-no-such-installer"]), dir.path());
        assert!(matches!(outcome, InstallOutcome::Failed(ref r) if r.starts_with("could not start")));
    }

    #[test]
    fn test_empty_command_is_skipped() {
        let dir = TempDir::new().unwrap();
        assert_eq!(run_install(&[], dir.path()), InstallOutcome::Skipped);
    }
}

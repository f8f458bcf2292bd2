//! Backend environment bootstrap
//!
//! Prepares a backend checkout for first run, in order:
//!
//! 1. write `.env` from a template with a fresh secret, only if it is absent
//! 2. create the `uploads/` directory tree
//! 3. run the dependency install command
//!
//! Steps run sequentially with no rollback. An install failure is reported
//! in the returned `BootstrapReport` rather than as an error, so the
//! earlier steps always complete.

pub mod env_template;
pub mod install;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{HubError, HubResult};

pub use install::InstallOutcome;

/// Upload directories created under the target directory
pub const UPLOAD_DIRS: [&str; 4] = [
    "uploads/avatars",
    "uploads/services",
    "uploads/documents",
    "uploads/reviews",
];

pub const ENV_FILE: &str = ".env";

#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    pub dir: PathBuf,
    pub install_command: Vec<String>,
    pub skip_install: bool,
}

/// What a bootstrap run did
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    pub env_file: PathBuf,
    /// False when an existing `.env` was left alone
    pub env_created: bool,
    /// Upload directories that did not exist before
    pub created_dirs: Vec<PathBuf>,
    pub install: InstallOutcome,
}

impl BootstrapReport {
    /// Process exit status: 1 when the install step failed
    pub fn exit_code(&self) -> i32 {
        if self.install.is_failure() {
            1
        } else {
            0
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.env_created {
            lines.push(format!("Created {} with a new secret", self.env_file.display()));
        } else {
            lines.push(format!("Kept existing {}", self.env_file.display()));
        }
        if self.created_dirs.is_empty() {
            lines.push("Upload directories already present".to_string());
        } else {
            for dir in &self.created_dirs {
                lines.push(format!("Created {}", dir.display()));
            }
        }
        lines.push(capitalize(&self.install.to_string()));
        lines
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Run all bootstrap steps against `options.dir`
pub fn run(options: &BootstrapOptions) -> HubResult<BootstrapReport> {
    fs::create_dir_all(&options.dir).map_err(|e| {
        HubError::Bootstrap(format!("Cannot create {}: {}", options.dir.display(), e))
    })?;

    let env_file = options.dir.join(ENV_FILE);
    let env_created = write_env_if_absent(&env_file)?;
    let created_dirs = ensure_upload_dirs(&options.dir)?;

    let install = if options.skip_install {
        InstallOutcome::Skipped
    } else {
        install::run_install(&options.install_command, &options.dir)
    };

    Ok(BootstrapReport {
        env_file,
        env_created,
        created_dirs,
        install,
    })
}

/// Returns whether the file was written
fn write_env_if_absent(path: &Path) -> HubResult<bool> {
    if path.exists() {
        tracing::info!(path = %path.display(), "keeping existing environment file");
        return Ok(false);
    }

    let contents = env_template::render(&env_template::generate_secret());

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options
        .open(path)
        .map_err(|e| HubError::Bootstrap(format!("Cannot create {}: {}", path.display(), e)))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| HubError::Bootstrap(format!("Cannot write {}: {}", path.display(), e)))?;

    tracing::info!(path = %path.display(), "wrote environment file");
    Ok(true)
}

fn ensure_upload_dirs(base: &Path) -> HubResult<Vec<PathBuf>> {
    let mut created = Vec::new();
    for rel in UPLOAD_DIRS {
        let dir = base.join(rel);
        if dir.is_dir() {
            continue;
        }
        fs::create_dir_all(&dir)
            .map_err(|e| HubError::Bootstrap(format!("Cannot create {}: {}", dir.display(), e)))?;
        created.push(dir);
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options(dir: &Path) -> BootstrapOptions {
        BootstrapOptions {
            dir: dir.to_path_buf(),
            install_command: Vec::new(),
            skip_install: true,
        }
    }

    #[test]
    fn test_first_run_creates_everything() {
        let temp_dir = TempDir::new().unwrap();
        let report = run(&options(temp_dir.path())).unwrap();

        assert!(report.env_created);
        assert_eq!(report.created_dirs.len(), 4);
        assert_eq!(report.install, InstallOutcome::Skipped);
        assert_eq!(report.exit_code(), 0);
        for rel in UPLOAD_DIRS {
            assert!(temp_dir.path().join(rel).is_dir());
        }
        let env = fs::read_to_string(temp_dir.path().join(ENV_FILE)).unwrap();
        assert!(env.contains("JWT_SECRET="));
    }

    #[test]
    fn test_second_run_keeps_env_file() {
        let temp_dir = TempDir::new().unwrap();
        run(&options(temp_dir.path())).unwrap();
        let env_path = temp_dir.path().join(ENV_FILE);
        fs::write(&env_path, "JWT_SECRET=edited-by-hand\n").unwrap();

        let second = run(&options(temp_dir.path())).unwrap();
        assert!(!second.env_created);
        assert!(second.created_dirs.is_empty());
        assert_eq!(
            fs::read_to_string(&env_path).unwrap(),
            "JWT_SECRET=edited-by-hand\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_install_still_runs_other_steps() {
        let temp_dir = TempDir::new().unwrap();
        let report = run(&BootstrapOptions {
            dir: temp_dir.path().join("backend"),
            install_command: vec!["false".into()],
            skip_install: false,
        })
        .unwrap();

        assert!(report.env_created);
        assert!(temp_dir.path().join("backend/uploads/reviews").is_dir());
        assert_eq!(report.exit_code(), 1);
        assert!(report.lines().last().unwrap().starts_with("Install failed"));
    }
}

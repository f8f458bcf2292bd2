//! Operator commands: environment bootstrap, smoke test, deployment guide
//!
//! The bootstrap and smoke-test handlers return the process exit status
//! instead of failing, so the binary can exit 1 after printing the report.

use std::path::PathBuf;

use crate::bootstrap::{self, BootstrapOptions};
use crate::config::Settings;
use crate::deploy;
use crate::error::HubResult;
use crate::smoke::SmokeTest;

pub fn handle_bootstrap_command(
    settings: &Settings,
    dir: PathBuf,
    skip_install: bool,
) -> HubResult<i32> {
    println!("Bootstrapping backend environment in {}", dir.display());

    let report = bootstrap::run(&BootstrapOptions {
        dir,
        install_command: settings.install_command.clone(),
        skip_install,
    })?;

    for line in report.lines() {
        println!("  {}", line);
    }
    Ok(report.exit_code())
}

pub fn handle_smoke_test(base_url: &str) -> HubResult<i32> {
    println!("Smoke testing {}", base_url);

    let report = SmokeTest::new(base_url)?.run();
    for line in report.lines() {
        println!("{}", line);
    }
    Ok(report.exit_code())
}

pub fn handle_deploy_guide() {
    print!("{}", deploy::render());
}

use std::fs::create_dir_all;

use anyhow::{Result, bail};
use lxgw_jb_core::ExternalTools;

use crate::cli::BuildArgs;

struct CheckResult {
    name: &'static str,
    passed: bool,
    detail: String,
}

/// Check that a build could run here, without touching the network.
pub fn check(args: &BuildArgs) -> Result<()> {
    let config = args.config();
    let tools = ExternalTools::new(&config.fontforge);

    let mut results = Vec::new();

    results.push(match tools.fontforge_version() {
        Some(version) => CheckResult {
            name: "Glyph editor",
            passed: true,
            detail: format!("{} {version}", tools.fontforge().display()),
        },
        None => CheckResult {
            name: "Glyph editor",
            passed: false,
            detail: format!("cannot run {}", tools.fontforge().display()),
        },
    });

    let failed_dirs: Vec<String> = config
        .all_dirs()
        .iter()
        .filter_map(|dir| {
            create_dir_all(dir)
                .err()
                .map(|e| format!("{}: {e}", dir.display()))
        })
        .collect();
    results.push(CheckResult {
        name: "Directory structure",
        passed: failed_dirs.is_empty(),
        detail: if failed_dirs.is_empty() {
            format!(
                "{} and {} are writable",
                config.work_dir.display(),
                config.output_dir.display()
            )
        } else {
            failed_dirs.join(", ")
        },
    });

    for result in &results {
        let (symbol, status) = if result.passed { ("✓", "PASS") } else { ("✗", "FAIL") };
        println!("{symbol} {}: {status} ({})", result.name, result.detail);
    }

    let passed = results.iter().filter(|r| r.passed).count();
    println!("\nTotal: {passed}/{} checks passed", results.len());

    if passed != results.len() {
        bail!("{} environment checks failed", results.len() - passed);
    }
    Ok(())
}

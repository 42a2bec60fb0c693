use std::fmt::Write;

use anyhow::Result;
use lxgw_jb_core::{BuildReport, ExternalTools, GitHubReleases, Pipeline};

use crate::cli::BuildArgs;

const RULE: &str = "============================================================";

/// Run the whole build against GitHub and the installed tools.
pub fn build(args: &BuildArgs) -> Result<()> {
    println!("{RULE}");
    println!("LXGW + JetBrains Mono + Nerd Font Merger");
    println!("{RULE}");

    let config = args.config();
    let host = GitHubReleases::new()?;
    let tools = ExternalTools::new(&config.fontforge);

    let report = Pipeline::new(&config, &host, &tools).run()?;
    print!("{}", report_text(&report));
    Ok(())
}

/// Success summary: where the font went and which releases it was built from.
fn report_text(report: &BuildReport) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "\n{RULE}");
    let _ = writeln!(text, "SUCCESS!");
    let _ = writeln!(text, "{RULE}");
    let _ = writeln!(text, "Final font available at: {}", report.final_font.display());
    let _ = writeln!(text, "\nVersions used:");
    let _ = writeln!(text, "  LXGW WenKai: {}", report.versions.cjk);
    let _ = writeln!(text, "  JetBrains Mono: {}", report.versions.latin);
    let _ = writeln!(text, "  Nerd Fonts: {}", report.versions.patcher);
    text
}

use super::Workspace;
use crate::output::print_json;
use anyhow::Context;
use shipboard_core::plan::Plan;
use std::path::Path;

pub fn run(root: &Path, app: Option<&str>, file: &Path, json: bool) -> anyhow::Result<()> {
    let plan = Plan::from_path(file)
        .with_context(|| format!("failed to read plan {}", file.display()))?;

    let mut ws = Workspace::open(root, app)?;
    let summary = ws
        .board()?
        .import_plan(&plan)
        .context("failed to import plan")?;

    if json {
        print_json(&summary)?;
    } else {
        println!(
            "Imported {} release(s) and {} feature(s).",
            summary.releases, summary.features
        );
    }
    Ok(())
}

use super::Workspace;
use crate::output::{print_json, print_table, rank};
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum ReleaseSubcommand {
    /// Create a release after the last one
    Create { name: String },
    /// List releases in board order
    List,
    /// Rename a release
    Rename { id: String, name: String },
    /// Move a release before another one, or to the end
    Move {
        id: String,
        /// Release to insert before; appends if omitted
        #[arg(long, value_name = "ID")]
        before: Option<String>,
    },
    /// Delete a release; its features become unassigned
    Delete { id: String },
}

pub fn run(
    root: &Path,
    app: Option<&str>,
    subcmd: ReleaseSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    let mut ws = Workspace::open(root, app)?;
    match subcmd {
        ReleaseSubcommand::Create { name } => create(&mut ws, &name, json),
        ReleaseSubcommand::List => list(&mut ws, json),
        ReleaseSubcommand::Rename { id, name } => rename(&mut ws, &id, &name, json),
        ReleaseSubcommand::Move { id, before } => move_release(&mut ws, &id, before.as_deref(), json),
        ReleaseSubcommand::Delete { id } => delete(&mut ws, &id, json),
    }
}

fn create(ws: &mut Workspace, name: &str, json: bool) -> anyhow::Result<()> {
    let release = ws
        .board()?
        .create_release(name)
        .with_context(|| format!("failed to create release '{name}'"))?;

    if json {
        print_json(&release)?;
    } else {
        println!("Created release '{}' [{}]", release.name, release.id);
    }
    Ok(())
}

fn list(ws: &mut Workspace, json: bool) -> anyhow::Result<()> {
    let board = ws.board()?;
    let releases = board.releases()?;
    let features = board.features()?;

    if json {
        return print_json(&releases);
    }

    if releases.is_empty() {
        println!("No releases.");
        return Ok(());
    }

    let rows = releases
        .iter()
        .map(|r| {
            let count = features
                .iter()
                .filter(|f| f.release_id.as_deref() == Some(r.id.as_str()))
                .count();
            vec![
                r.id.clone(),
                r.name.clone(),
                rank(r.order),
                count.to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "RANK", "FEATURES"], rows);
    Ok(())
}

fn rename(ws: &mut Workspace, id: &str, name: &str, json: bool) -> anyhow::Result<()> {
    let release = ws.board()?.rename_release(id, name)?;

    if json {
        print_json(&release)?;
    } else {
        println!("Renamed release {} to '{}'.", release.id, release.name);
    }
    Ok(())
}

fn move_release(
    ws: &mut Workspace,
    id: &str,
    before: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let release = ws
        .board()?
        .move_release(id, before)
        .with_context(|| format!("failed to move release '{id}'"))?;

    if json {
        print_json(&release)?;
    } else {
        println!("Moved release '{}' to rank {}.", release.name, rank(release.order));
    }
    Ok(())
}

fn delete(ws: &mut Workspace, id: &str, json: bool) -> anyhow::Result<()> {
    let unassigned = ws
        .board()?
        .delete_release(id)
        .with_context(|| format!("failed to delete release '{id}'"))?;

    if json {
        print_json(&serde_json::json!({
            "deleted": id,
            "unassigned": unassigned.iter().map(|f| &f.id).collect::<Vec<_>>(),
        }))?;
    } else {
        println!(
            "Deleted release {id}; {} feature(s) moved to unassigned.",
            unassigned.len()
        );
    }
    Ok(())
}

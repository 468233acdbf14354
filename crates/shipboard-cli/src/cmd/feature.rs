use super::Workspace;
use crate::output::{print_json, print_table, rank};
use anyhow::Context;
use clap::Subcommand;
use shipboard_core::{
    feature::{Feature, FeatureEdit, NewFeature},
    grouping::GroupKey,
    release::Release,
    types::{BoardView, FeatureStatus},
};
use std::path::Path;

#[derive(Subcommand)]
pub enum FeatureSubcommand {
    /// Add a feature at the end of its group
    Add {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Initial status (default: board.default_status)
        #[arg(long)]
        status: Option<FeatureStatus>,
        /// Release to place the feature in
        #[arg(long, value_name = "ID")]
        release: Option<String>,
        /// View whose group the new rank is computed in (default: board.default_view)
        #[arg(long)]
        view: Option<BoardView>,
    },
    /// List features in release board order
    List,
    /// Show feature details
    Show { id: String },
    /// Delete a feature
    Delete { id: String },
    /// Edit feature details; the rank is left unchanged
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<FeatureStatus>,
        #[arg(long, value_name = "ID", conflicts_with = "unassign")]
        release: Option<String>,
        /// Remove the feature from its release
        #[arg(long)]
        unassign: bool,
    },
    /// Drop a feature onto a card or group, as a board drag would
    Move {
        id: String,
        /// Feature, release, status or "unassigned" the feature was dropped on
        #[arg(long, value_name = "ID")]
        over: String,
        /// release | status (default: board.default_view)
        #[arg(long)]
        view: Option<BoardView>,
    },
}

pub fn run(
    root: &Path,
    app: Option<&str>,
    subcmd: FeatureSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    let mut ws = Workspace::open(root, app)?;
    match subcmd {
        FeatureSubcommand::Add {
            name,
            description,
            status,
            release,
            view,
        } => add(&mut ws, name, description, status, release, view, json),
        FeatureSubcommand::List => list(&mut ws, json),
        FeatureSubcommand::Show { id } => show(&mut ws, &id, json),
        FeatureSubcommand::Delete { id } => delete(&mut ws, &id, json),
        FeatureSubcommand::Update {
            id,
            name,
            description,
            status,
            release,
            unassign,
        } => {
            let release_id = if unassign { Some(None) } else { release.map(Some) };
            let edit = FeatureEdit {
                name,
                description,
                status,
                release_id,
            };
            update(&mut ws, &id, edit, json)
        }
        FeatureSubcommand::Move { id, over, view } => move_feature(&mut ws, &id, &over, view, json),
    }
}

fn release_name(releases: &[Release], release_id: Option<&str>) -> String {
    match release_id {
        Some(id) => releases
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.name.clone())
            .unwrap_or_else(|| format!("{id} (missing)")),
        None => "-".to_string(),
    }
}

fn add(
    ws: &mut Workspace,
    name: String,
    description: String,
    status: Option<FeatureStatus>,
    release: Option<String>,
    view: Option<BoardView>,
    json: bool,
) -> anyhow::Result<()> {
    let draft = NewFeature {
        name,
        description,
        status: status.unwrap_or(ws.config.board.default_status),
        release_id: release,
    };
    let view = view.unwrap_or(ws.config.board.default_view);
    let feature = ws
        .board()?
        .create_feature(draft, view)
        .context("failed to add feature")?;

    if json {
        print_json(&feature)?;
    } else {
        println!(
            "Added feature '{}' [{}] at rank {}.",
            feature.name,
            feature.id,
            rank(feature.order)
        );
    }
    Ok(())
}

fn list(ws: &mut Workspace, json: bool) -> anyhow::Result<()> {
    let board = ws.board()?;
    let groups = board.grouped(BoardView::Release)?;
    let features: Vec<&Feature> = groups.iter().flat_map(|g| &g.features).collect();

    if json {
        return print_json(&features);
    }

    if features.is_empty() {
        println!("No features.");
        return Ok(());
    }

    let rows = groups
        .iter()
        .flat_map(|g| {
            g.features.iter().map(move |f| {
                vec![
                    f.id.clone(),
                    f.name.clone(),
                    f.status.to_string(),
                    g.title.clone(),
                    rank(f.order),
                ]
            })
        })
        .collect();
    print_table(&["ID", "NAME", "STATUS", "RELEASE", "RANK"], rows);
    Ok(())
}

fn show(ws: &mut Workspace, id: &str, json: bool) -> anyhow::Result<()> {
    let board = ws.board()?;
    let feature = board.feature(id)?;

    if json {
        return print_json(&feature);
    }

    let releases = board.releases()?;
    println!("Feature:  {}", feature.name);
    println!("ID:       {}", feature.id);
    println!("Status:   {}", feature.status.label());
    println!(
        "Release:  {}",
        release_name(&releases, feature.release_id.as_deref())
    );
    println!("Rank:     {}", rank(feature.order));
    println!("Created:  {}", feature.created_at.format("%Y-%m-%d %H:%M UTC"));
    println!("Updated:  {}", feature.updated_at.format("%Y-%m-%d %H:%M UTC"));
    if !feature.description.is_empty() {
        println!("\n{}", feature.description);
    }
    Ok(())
}

fn delete(ws: &mut Workspace, id: &str, json: bool) -> anyhow::Result<()> {
    ws.board()?
        .delete_feature(id)
        .with_context(|| format!("failed to delete feature '{id}'"))?;

    if json {
        print_json(&serde_json::json!({ "deleted": id }))?;
    } else {
        println!("Deleted feature {id}.");
    }
    Ok(())
}

fn update(ws: &mut Workspace, id: &str, edit: FeatureEdit, json: bool) -> anyhow::Result<()> {
    let feature = ws
        .board()?
        .edit_feature(id, edit)
        .with_context(|| format!("failed to update feature '{id}'"))?;

    if json {
        print_json(&feature)?;
    } else {
        println!("Updated feature '{}'.", feature.name);
    }
    Ok(())
}

fn move_feature(
    ws: &mut Workspace,
    id: &str,
    over: &str,
    view: Option<BoardView>,
    json: bool,
) -> anyhow::Result<()> {
    let view = view.unwrap_or(ws.config.board.default_view);
    let moved = ws
        .board()?
        .move_feature(id, over, view)
        .with_context(|| format!("failed to move feature '{id}'"))?;

    match moved {
        Some(feature) => {
            if json {
                print_json(&serde_json::json!({
                    "moved": true,
                    "feature": feature,
                }))?;
            } else {
                let group = match view {
                    BoardView::Release => GroupKey::Release(feature.release_id.clone()),
                    BoardView::Status => GroupKey::Status(feature.status),
                };
                println!(
                    "Moved '{}' to {} at rank {}.",
                    feature.name,
                    group,
                    rank(feature.order)
                );
            }
        }
        None => {
            if json {
                print_json(&serde_json::json!({ "moved": false }))?;
            } else {
                println!("Nothing to drop on '{over}' in the {view} view; no change.");
            }
        }
    }
    Ok(())
}

use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use shipboard_core::{
    app::App,
    state::State,
    store::{FileStore, Store},
    types::AppKind,
};
use std::path::Path;

#[derive(Subcommand)]
pub enum AppSubcommand {
    /// Create an app and make it active
    Create {
        name: String,
        /// web | mobile | desktop
        #[arg(long, default_value = "web")]
        kind: AppKind,
    },
    /// List apps (the active one is marked with *)
    List,
    /// Make an app the active one
    Use { id: String },
    /// Rename an app
    Rename { id: String, name: String },
}

pub fn run(root: &Path, subcmd: AppSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        AppSubcommand::Create { name, kind } => create(root, &name, kind, json),
        AppSubcommand::List => list(root, json),
        AppSubcommand::Use { id } => use_app(root, &id, json),
        AppSubcommand::Rename { id, name } => rename(root, &id, &name, json),
    }
}

fn create(root: &Path, name: &str, kind: AppKind, json: bool) -> anyhow::Result<()> {
    let mut state = State::load(root).context("failed to load state")?;
    let mut store = FileStore::new(root);

    let app = App::new(name, kind)?;
    store
        .save_app(&app)
        .with_context(|| format!("failed to save app '{}'", app.name))?;

    state.set_active_app(&app.id);
    state.save(root).context("failed to save state")?;

    if json {
        print_json(&app)?;
    } else {
        println!("Created app '{}' ({}) [{}]", app.name, app.kind, app.id);
        println!("Active app is now '{}'.", app.name);
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let state = State::load(root).context("failed to load state")?;
    let apps = FileStore::new(root).list_apps().context("failed to list apps")?;

    if json {
        let value: Vec<_> = apps
            .iter()
            .map(|a| {
                serde_json::json!({
                    "id": a.id,
                    "name": a.name,
                    "kind": a.kind,
                    "active": state.active_app.as_deref() == Some(a.id.as_str()),
                })
            })
            .collect();
        return print_json(&value);
    }

    if apps.is_empty() {
        println!("No apps.");
        return Ok(());
    }

    let rows = apps
        .iter()
        .map(|a| {
            let marker = if state.active_app.as_deref() == Some(a.id.as_str()) {
                "*"
            } else {
                ""
            };
            vec![
                marker.to_string(),
                a.id.clone(),
                a.name.clone(),
                a.kind.to_string(),
            ]
        })
        .collect();
    print_table(&["", "ID", "NAME", "KIND"], rows);
    Ok(())
}

fn use_app(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let mut state = State::load(root).context("failed to load state")?;
    let app = FileStore::new(root).load_app(id)?;

    state.set_active_app(&app.id);
    state.save(root).context("failed to save state")?;

    if json {
        print_json(&app)?;
    } else {
        println!("Active app is now '{}'.", app.name);
    }
    Ok(())
}

fn rename(root: &Path, id: &str, name: &str, json: bool) -> anyhow::Result<()> {
    State::load(root).context("failed to load state")?;
    let mut store = FileStore::new(root);
    let mut app = store.load_app(id)?;
    app.rename(name)?;
    store
        .save_app(&app)
        .with_context(|| format!("failed to save app '{id}'"))?;

    if json {
        print_json(&app)?;
    } else {
        println!("Renamed app {} to '{}'.", app.id, app.name);
    }
    Ok(())
}

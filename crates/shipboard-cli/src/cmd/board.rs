use super::Workspace;
use crate::output::{print_json, rank};
use shipboard_core::types::BoardView;
use std::path::Path;

pub fn run(
    root: &Path,
    app: Option<&str>,
    view: Option<BoardView>,
    json: bool,
) -> anyhow::Result<()> {
    let mut ws = Workspace::open(root, app)?;
    let view = view.unwrap_or(ws.config.board.default_view);
    let groups = ws.board()?.grouped(view)?;

    if json {
        return print_json(&serde_json::json!({
            "view": view,
            "groups": groups,
        }));
    }

    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!(
            "{} [{}] ({})",
            group.title,
            group.key.container_id(),
            group.features.len()
        );
        if group.features.is_empty() {
            println!("  (empty)");
        }
        for feature in &group.features {
            let detail = match view {
                BoardView::Release => feature.status.label().to_string(),
                BoardView::Status => feature
                    .release_id
                    .clone()
                    .unwrap_or_else(|| "unassigned".to_string()),
            };
            println!(
                "  {:>6}  {}  {}  ({})",
                rank(feature.order),
                feature.id,
                feature.name,
                detail
            );
        }
    }
    Ok(())
}

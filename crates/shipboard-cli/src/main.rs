mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    app::AppSubcommand, config::ConfigSubcommand, feature::FeatureSubcommand,
    release::ReleaseSubcommand,
};
use shipboard_core::types::BoardView;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "shipboard",
    about = "Plan releases and order features on a release board and a status board",
    version,
    propagate_version = true
)]
struct Cli {
    /// Workspace root (default: auto-detect from .shipboard/ or .git/)
    #[arg(long, global = true, env = "SHIPBOARD_ROOT")]
    root: Option<PathBuf>,

    /// App to act on (default: the active app)
    #[arg(long, global = true, env = "SHIPBOARD_APP")]
    app: Option<String>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a shipboard workspace
    Init,

    /// Manage apps
    App {
        #[command(subcommand)]
        subcommand: AppSubcommand,
    },

    /// Manage releases
    Release {
        #[command(subcommand)]
        subcommand: ReleaseSubcommand,
    },

    /// Manage features
    Feature {
        #[command(subcommand)]
        subcommand: FeatureSubcommand,
    },

    /// Show the board grouped by release or by status
    Board {
        /// release | status (default: board.default_view)
        #[arg(long)]
        view: Option<BoardView>,
    },

    /// Create releases and features from a JSON or YAML plan
    Import { file: PathBuf },

    /// Inspect and validate the workspace configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let app = cli.app.as_deref();

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::App { subcommand } => cmd::app::run(&root, subcommand, cli.json),
        Commands::Release { subcommand } => cmd::release::run(&root, app, subcommand, cli.json),
        Commands::Feature { subcommand } => cmd::feature::run(&root, app, subcommand, cli.json),
        Commands::Board { view } => cmd::board::run(&root, app, view, cli.json),
        Commands::Import { file } => cmd::import::run(&root, app, &file, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

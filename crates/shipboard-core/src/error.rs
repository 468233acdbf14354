use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShipboardError {
    #[error("not initialized: run 'shipboard init'")]
    NotInitialized,

    #[error("no active app: pass --app or run 'shipboard app use <id>'")]
    NoActiveApp,

    #[error("app not found: {0}")]
    AppNotFound(String),

    #[error("feature not found: {0}")]
    FeatureNotFound(String),

    #[error("release not found: {0}")]
    ReleaseNotFound(String),

    #[error("invalid id '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidId(String),

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("invalid app kind: {0}")]
    InvalidAppKind(String),

    #[error("invalid view: {0}")]
    InvalidView(String),

    #[error("name must not be empty")]
    EmptyName,

    #[error("invalid plan: {0}")]
    InvalidPlan(String),

    #[error("persistence failure: {0}")]
    Persistence(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShipboardError>;

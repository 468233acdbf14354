pub mod app;
pub mod board;
pub mod config;
pub mod error;
pub mod feature;
pub mod grouping;
pub mod io;
pub mod moves;
pub mod paths;
pub mod plan;
pub mod rank;
pub mod release;
pub mod state;
pub mod store;
pub mod types;

pub use error::{Result, ShipboardError};

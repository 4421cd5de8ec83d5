pub mod app;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod progress;
pub mod repo;
pub mod sessions;
pub mod spend;
pub mod state;
pub mod ui;

pub use app::router;
pub use db::{connect, resolve_db_path};
pub use state::AppState;

mod app;
pub mod config;
mod effects;
mod notifier;
mod ui;

pub use app::run_app;

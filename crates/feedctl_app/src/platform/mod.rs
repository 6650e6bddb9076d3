mod app;
mod effects;
mod guard;
mod input;
mod logging;
mod settings;
mod ui;

pub use app::run_app;

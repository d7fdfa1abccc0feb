pub mod app;
pub mod cli;
pub mod config;
pub mod flow;
pub mod render;
pub mod store;
pub mod tui;

pub use app::*;
pub use cli::*;
pub use config::*;
pub use flow::*;
pub use render::*;
pub use store::*;

pub mod app;
pub mod config;
pub mod error;
pub mod format;
pub mod input;
pub mod predictor;
pub mod provider;
pub mod schema;
pub mod server;
pub mod view;

pub use app::App;
pub use error::{AppErr, Result};

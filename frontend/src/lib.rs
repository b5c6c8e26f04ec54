//! Students UI: server-rendered table and form over the student records API.

pub mod client;
pub mod config;
pub mod driver;
pub mod render;
pub mod routes;
pub mod view;

pub use client::{ClientError, StudentsClient};
pub use config::UiConfig;
pub use routes::{ui_routes, UiState};
pub use view::{Effect, FormFields, FormMode, Phase, StudentsView};

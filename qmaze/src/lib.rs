pub mod app;
pub mod helpers;
pub mod loader;
pub mod logging;
pub mod render;
pub mod settings;

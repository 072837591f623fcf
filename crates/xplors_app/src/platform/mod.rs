pub mod app;
pub mod artifact;
pub mod cli;
pub mod effects;
pub mod logging;
pub mod render;

pub mod config;
pub mod fit;
pub mod measure;
pub mod render;
pub mod series;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::run;

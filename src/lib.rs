pub mod app;
pub mod cli;
pub mod config;
pub mod selection;
pub mod timeline;
pub mod ui;
pub mod views;

pub use config::{AppConfig, ConfigLoader, ConfigPaths};
pub use selection::{classify, Granularity, Selection};
pub use timeline::{TimelineItem, TimelineStore};

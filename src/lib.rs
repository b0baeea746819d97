pub mod config;
pub mod core;
pub mod domain;
pub mod tools;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{LocalStorage, SitemapConfig};

pub use core::{
    etl::SitemapEngine, generator::ToolsSitemapPipeline, splitter::SitemapSplitPipeline,
};
pub use utils::error::{Result, ToolError};

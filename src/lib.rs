pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::{FunctionResponse, GrantFunction};
pub use config::FunctionConfig;
pub use core::matcher::GrantMatcher;
pub use domain::model::{Grant, KeywordSet, MatchResponse};
pub use utils::error::{MatchError, Result};

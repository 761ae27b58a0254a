use crate::config::toml_config::TomlConfig;
use crate::config::FunctionConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "grant-match")]
#[command(about = "Match free-text queries to grants with AI keyword extraction")]
pub struct CliConfig {
    /// TOML 設定檔；未指定時讀取環境變數
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve the matching function over HTTP
    Serve {
        #[arg(long)]
        bind: Option<String>,
    },
    /// Run a single query and print the result
    Query {
        text: String,

        #[arg(long, help = "Print the full JSON response")]
        json: bool,
    },
}

impl CliConfig {
    /// 回傳函式設定與伺服器綁定位址
    pub fn load(&self) -> Result<(FunctionConfig, String)> {
        let file_config = match &self.config {
            Some(path) => Some(TomlConfig::from_file(path)?),
            None => None,
        };

        let function_config = match &file_config {
            Some(file) => file.to_function_config(),
            None => FunctionConfig::from_env()?,
        };

        let bind = match &self.command {
            Command::Serve { bind: Some(bind) } => bind.clone(),
            _ => file_config
                .as_ref()
                .map(|f| f.bind_address().to_string())
                .unwrap_or_else(|| crate::config::toml_config::DEFAULT_BIND.to_string()),
        };

        Ok((function_config, bind))
    }
}

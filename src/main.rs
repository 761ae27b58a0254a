use clap::Parser;
use grant_match::app::server;
use grant_match::config::Command;
use grant_match::utils::{logger, validation::Validate};
use grant_match::{CliConfig, GrantFunction, MatchError};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    let (config, bind) = match cli.load() {
        Ok(loaded) => loaded,
        Err(e) => exit_with(&e),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let function = match GrantFunction::new(config) {
        Ok(function) => function,
        Err(e) => exit_with(&e),
    };

    match cli.command {
        Command::Serve { .. } => {
            server::run_server(&bind, Arc::new(function)).await?;
        }
        Command::Query { text, json } => match function.run_query(&text).await {
            Ok(response) if json => {
                println!("{}", serde_json::to_string_pretty(&response)?);
            }
            Ok(response) => println!("{}", response.message),
            Err(e) => {
                tracing::error!("❌ Query failed: {} (Category: {:?})", e, e.category());
                exit_with(&e);
            }
        },
    }

    Ok(())
}

fn exit_with(err: &MatchError) -> ! {
    eprintln!("❌ {}", err.user_friendly_message());
    std::process::exit(1);
}

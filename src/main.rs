use clap::Parser;
use reddit_tools::adapters::{McpServer, RedditHttpClient};
use reddit_tools::config::{LogFormat, RedditSettings};
use reddit_tools::core::{RedditToolkit, ToolRegistry};
use reddit_tools::utils::error::{ErrorCategory, RedditError};
use reddit_tools::utils::{logger, validation::Validate};
use reddit_tools::CliConfig;
use std::sync::Arc;

fn load_settings(cli: &CliConfig) -> reddit_tools::Result<RedditSettings> {
    let file = cli.load_file()?;
    let settings = RedditSettings::resolve(file, cli.overrides())?;
    settings.validate()?;
    Ok(settings)
}

fn exit_code(e: &RedditError) -> i32 {
    match e.category() {
        ErrorCategory::Configuration => 2,
        ErrorCategory::Authentication => 3,
        ErrorCategory::Network | ErrorCategory::Remote => 4,
        ErrorCategory::Data | ErrorCategory::System => 1,
    }
}

fn fail(e: RedditError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 設定錯誤時檔案中的日誌設定不可用，先以命令列旗標初始化
    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            tracing::error!("❌ Configuration validation failed");
            fail(e);
        }
    };

    match settings.log_format {
        LogFormat::Compact => logger::init_cli_logger(settings.verbose),
        LogFormat::Json => logger::init_json_logger(settings.verbose),
    }

    tracing::info!("Starting {}", settings.server_name);
    tracing::debug!(
        "API base: {}, auth base: {}, timeout: {}s",
        settings.api_base_url,
        settings.auth_base_url,
        settings.timeout_seconds
    );

    let client = match RedditHttpClient::new(settings.api_config()) {
        Ok(client) => client,
        Err(e) => fail(e),
    };
    let registry = ToolRegistry::new(RedditToolkit::new(Arc::new(client)));
    let server = McpServer::new(registry, settings.server_identity());

    if let Err(e) = server.serve_stdio().await {
        fail(e);
    }

    tracing::info!("✅ Server stopped");
    Ok(())
}

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use titan_chat::core::config::{self, CliOverrides, ResolvedConfig};
use titan_chat::inference::TitanProvider;
use titan_chat::tui;

#[derive(Parser)]
#[command(name = "titan-chat", version, about = "Terminal chat with Amazon Titan on Bedrock")]
struct Args {
    /// Config file (default: ~/.titan-chat/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file (default: titan-chat.log in the current directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Logging needs the resolved config, so a load failure is reported after init
    let (file_config, load_error) = match config::load_config(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (Default::default(), Some(e)),
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            log_file: args.log_file,
        },
    );
    init_logging(&resolved);

    if let Some(e) = load_error {
        return fatal(&format!("Failed to load config: {e}"));
    }

    info!(
        "Titan Chat starting up (model: {}, region: {})",
        resolved.bedrock.model_id, resolved.bedrock.region
    );

    let provider = match TitanProvider::connect(resolved.bedrock, resolved.generation).await {
        Ok(provider) => provider,
        Err(e) => return fatal(&format!("Failed to set up Bedrock client: {e}")),
    };

    match tui::run(Arc::new(provider)).await {
        Ok(text) => {
            info!("Exiting normally");
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => fatal(&format!("Terminal error: {e}")),
    }
}

/// Initialize the file logger. Logging is best effort: failures are ignored.
fn init_logging(config: &ResolvedConfig) {
    let level = LevelFilter::from_str(&config.log_level).unwrap_or(LevelFilter::Debug);
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}

fn fatal(message: &str) -> ExitCode {
    error!("{}", message);
    eprintln!("titan-chat: {message}");
    ExitCode::FAILURE
}

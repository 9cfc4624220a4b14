use anyhow::Result;
use clap::Parser;
use fitlog::ConfigBuilder;
use fitlog::config::{DEFAULT_DATA_FILE, DEFAULT_HOST, DEFAULT_PORT};
use log::{error, info};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fitlog-server", version, about = "Personal fitness log with a model-backed coach")]
struct Args {
    /// json file holding the entries
    #[arg(short, long, env = "FITLOG_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    #[arg(long, env = "FITLOG_HOST", default_value = DEFAULT_HOST)]
    host: String,

    #[arg(short, long, env = "FITLOG_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    #[arg(short, long, env = "FITLOG_MODEL", default_value = fitlog::chat::DEFAULT_MODEL)]
    model: String,

    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let config = match ConfigBuilder::new()
        .with_data_file(args.data_file)
        .with_host(args.host)
        .with_port(args.port)
        .with_model(args.model)
        .with_api_key(args.api_key)
        .build()
    {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {e}");
            return Err(e.into());
        }
    };

    info!("fitlog v{} starting", env!("CARGO_PKG_VERSION"));
    fitlog::start_server(config).await
}

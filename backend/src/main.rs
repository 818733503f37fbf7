//! verstamp server.

use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use verstamp::{
    config::{CliOverrides, Config},
    create_app_with_config, version,
};

/// verstamp - serve build and version information over HTTP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "VERSTAMP_PORT")]
    port: Option<u16>,

    /// Address to bind to
    #[arg(long, env = "VERSTAMP_HOST")]
    host: Option<String>,

    /// Additional TOML config file
    #[arg(long)]
    config_path: Option<PathBuf>,

    /// Pretty-print JSON responses
    #[arg(long)]
    pretty: bool,

    /// Add version headers to version endpoint responses
    #[arg(long)]
    include_headers: bool,

    /// Prefix for version headers (default "X-")
    #[arg(long)]
    header_prefix: Option<String>,

    /// Print the version information and exit instead of serving it
    #[arg(long, value_enum)]
    print: Option<PrintFormat>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PrintFormat {
    /// `1.2.3 (abc1234)`
    Simple,
    /// Multi-line report
    Full,
    Json,
    JsonPretty,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::from_figment(CliOverrides {
        config_path: args.config_path,
        port: args.port,
        host: args.host,
        pretty: args.pretty.then_some(true),
        include_headers: args.include_headers.then_some(true),
        header_prefix: args.header_prefix,
    })?;

    if let Some(format) = args.print {
        let version = version::resolve(&config.build);
        let output = match format {
            PrintFormat::Simple => version.to_string(),
            PrintFormat::Full => version.full_report().trim_end().to_string(),
            PrintFormat::Json => version.to_json(),
            PrintFormat::JsonPretty => version.to_json_pretty(),
        };
        println!("{}", output);
        return Ok(());
    }

    let _guard = init_logging(&config)?;
    info!("Starting verstamp server...");
    info!("Configuration loaded");

    let version = Arc::new(version::resolve(&config.build));
    let app = create_app_with_config(&config.endpoint, version);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!(
        "Server listening on {} (version endpoint at {})",
        addr,
        config.endpoint.normalized_path()
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Set up graceful shutdown handler
    let shutdown_signal = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down gracefully...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shut down");
    Ok(())
}

/// Initialize logging to stdout and, if configured, a log file.
///
/// Level priority: config `log_level` > `RUST_LOG` > `info`. The returned
/// guard flushes the file writer and must be kept alive.
fn init_logging(config: &Config) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = || match config.log_level.as_deref() {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let stdout_layer = fmt::layer()
        .with_target(false)
        .compact()
        .with_filter(filter());

    let (file_layer, guard) = match config.log_file.as_ref() {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("Invalid log file path: {}", path.display()))?;
            std::fs::create_dir_all(&directory)?;

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .init();

    if let Some(path) = config.log_file.as_ref() {
        info!("Logging to file: {}", path.display());
    }

    Ok(guard)
}

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use nur_relay::connector::api::Router;
use nur_relay::{serve, Commands, Container, ContainerConfig};

#[derive(Parser)]
#[command(name = "nur-relay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Answer from an offline echo client instead of calling Groq
    #[arg(long, global = true)]
    mock_upstream: bool,

    /// Upstream request timeout in seconds
    #[arg(long, global = true, default_value = "60")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ContainerConfig::from_env()
        .with_timeout(Duration::from_secs(cli.timeout_secs))
        .with_mock_upstream(cli.mock_upstream);
    let container = Arc::new(Container::new(config));

    match cli.command {
        Commands::Serve { port, public } => {
            let ip = if public {
                IpAddr::V4(Ipv4Addr::UNSPECIFIED)
            } else {
                IpAddr::V4(Ipv4Addr::LOCALHOST)
            };
            serve(container, SocketAddr::new(ip, port)).await?;
        }
        command => {
            let output = Router::new(&container).route(command).await?;
            println!("{}", output);
        }
    }

    Ok(())
}

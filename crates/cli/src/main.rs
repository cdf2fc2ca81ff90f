use clap::{Parser, Subcommand};
use rootwalk_domain::{CliOverrides, Message, QueryType};
use std::path::PathBuf;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "rootwalk")]
#[command(version)]
#[command(about = "Rootwalk - iterative DNS resolver walking down from the root")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Root nameserver to start from, as IP:PORT
    #[arg(long, value_name = "ADDR", global = true)]
    root_hint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer DNS queries over UDP by resolving them from the root
    Serve {
        /// Bind address
        #[arg(short = 'b', long)]
        bind: Option<String>,

        /// DNS server port
        #[arg(short = 'p', long)]
        port: Option<u16>,
    },

    /// Resolve one name and print the final reply
    Lookup {
        name: String,

        /// Query type (A, NS, CNAME, AAAA, MX, ANY, ...)
        #[arg(default_value = "A")]
        record_type: String,
    },

    /// Decode a raw DNS message from a file and print it
    Inspect { file: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (dns_port, bind_address) = match &cli.command {
        Command::Serve { bind, port } => (*port, bind.clone()),
        _ => (None, None),
    };
    let cli_overrides = CliOverrides {
        dns_port,
        bind_address,
        root_hint: cli.root_hint.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config, cli.log_level.is_some());

    match cli.command {
        Command::Serve { .. } => {
            info!("Starting Rootwalk v{}", env!("CARGO_PKG_VERSION"));

            let dns_services = di::DnsServices::new(&config)?;
            let dns_addr = config.server.listen_addr();

            tokio::select! {
                result = server::start_dns_server(dns_addr, dns_services.server_handler()) => {
                    if let Err(e) = &result {
                        error!(error = %e, "DNS server error");
                    }
                    result?;
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                }
            }

            info!("Server shutdown complete");
        }
        Command::Lookup { name, record_type } => {
            let query_type: QueryType = record_type.parse()?;
            let dns_services = di::DnsServices::new(&config)?;

            let resolution = dns_services.lookup.execute(&name, query_type).await?;

            println!("{}", resolution.message);
            let path = resolution
                .nameservers_queried
                .iter()
                .map(|ns| ns.to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            println!(";; PATH: {}", path);
            if !resolution.answered {
                println!(";; no answer: the last nameserver returned neither records nor a delegation");
            }
        }
        Command::Inspect { file } => {
            let bytes = tokio::fs::read(&file).await?;
            let message = Message::from_bytes(bytes)?;
            println!("{}", message);
        }
    }

    Ok(())
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use policy_client::{ClientConfig, HttpPolicyClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "policyctl", version)]
#[command(about = "Manage insurance policies through the policy REST API")]
struct Cli {
    /// Base URL of the policy REST collection
    #[arg(long, env = "POLICY_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "POLICY_API_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    timeout_secs: u64,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all policies
    List(commands::query::ListArgs),
    /// Show one policy
    Get(commands::query::GetArgs),
    /// Create a policy
    Create(commands::mutate::CreateArgs),
    /// Replace an existing policy
    Update(commands::mutate::UpdateArgs),
    /// Delete a policy
    Delete(commands::mutate::DeleteArgs),
    /// Print version and exit
    Version,
}

fn init_tracing() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if let Commands::Version = cli.cmd {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config =
        ClientConfig::new(cli.base_url).with_timeout(Duration::from_secs(cli.timeout_secs));
    let client = HttpPolicyClient::new(&config).context("Failed to create policy API client")?;

    match cli.cmd {
        Commands::List(args) => commands::query::list(&client, args).await,
        Commands::Get(args) => commands::query::get(&client, args).await,
        Commands::Create(args) => commands::mutate::create(&client, args).await,
        Commands::Update(args) => commands::mutate::update(&client, args).await,
        Commands::Delete(args) => commands::mutate::delete(&client, args).await,
        Commands::Version => Ok(()),
    }
}

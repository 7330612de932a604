use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payment_gateway::config::Settings;
use payment_gateway::infrastructure::{Stores, build_accounts};
use payment_gateway::interfaces::cli::{self, Command};
use payment_gateway::interfaces::rest;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Payment gateway accounts service", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Command,
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.settings.debug);

    let stores = Stores::open(cli.settings.db_path.as_deref())?;
    let accounts = build_accounts(&cli.settings, stores)?;

    let output = match &cli.command {
        Command::Serve(args) => {
            tracing::info!(app = %cli.settings.app_name, "starting");
            let listener = tokio::net::TcpListener::bind(args.bind)
                .await
                .into_diagnostic()?;
            rest::serve(listener, accounts).await?;
            return Ok(());
        }
        Command::CreateOrganization(args) => cli::create_organization(&accounts, args).await?,
        Command::ActivateOrganization(args) => cli::activate_organization(&accounts, args).await?,
        Command::CreateUser(args) => cli::create_user(&accounts, args).await?,
    };
    println!("{output}");

    Ok(())
}

use clap::{Parser, Subcommand};
use dashboard::Dashboard;
use env::Env;
use eyre::Context;
use log::{info, warn};

#[derive(Parser)]
#[command(name = "dashboard", about = "Product transaction dashboard backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Serve the HTTP API (default).
    Serve,
    /// Replace the stored transactions with the remote dataset and exit.
    Load,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    let dotenv = env::load_dotenv();
    pretty_env_logger::init();
    color_eyre::install()?;
    if let Err(err) = dotenv {
        info!("{:#}", err);
    }
    let env = Env::load().context("Failed to load configuration")?;

    info!("connecting to mongo");
    let storage = storage::Storage::new(env.mongo_url(), env.mongo_db())
        .await
        .context("Failed to create storage")?;
    info!("creating dashboard for year {}", env.year());
    let dashboard = Dashboard::new(storage.source(), env.year(), env.dataset_url().to_owned());

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!("Starting server...");
            api::serve(dashboard, &env.bind_addr(), shutdown_signal()).await
        }
        Command::Load => {
            info!("loading dataset from {}", dashboard.loader.url());
            dashboard
                .loader
                .load()
                .await
                .map(|inserted| info!("loaded {} transactions", inserted))
                .context("Failed to load dataset")
        }
    };

    storage.shutdown().await;
    result
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

use clap::{Args, Parser, Subcommand};
use gbp_server::config::ServerConfig;

mod chat;
mod prices;
mod setup;

#[derive(Parser, Debug)]
#[command(version = "0.1.0", about = "Tools for running a Global Business Pay storefront")]
pub struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the database if it does not exist, and run the database migrations.
    #[clap(name = "migrate")]
    Migrate(MigrateParams),
    /// Fill empty card and cryptocurrency tables with the standard catalogue.
    #[clap(name = "seed")]
    Seed,
    /// Fetch market prices once and store them, then print what happened to each currency.
    #[clap(name = "refresh-prices")]
    RefreshPrices,
    /// Ask the support desk a question. Without a message, an interactive chat is started.
    #[clap(name = "chat")]
    Chat {
        /// The message to answer
        message: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct MigrateParams {
    /// The path to the migrations directory. The migrations are embedded in the binary by default, and so this
    /// parameter is optional. If provided, the migrations at <path> will be executed instead.
    #[arg(short, long)]
    pub path: Option<String>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();
    let cli = Arguments::parse();
    // The tools use the same settings as the server
    let config = ServerConfig::from_env_or_default();
    match cli.command {
        Command::Migrate(params) => setup::migrate_db(&config, params).await,
        Command::Seed => setup::seed_db(&config).await,
        Command::RefreshPrices => prices::refresh_prices(&config).await,
        Command::Chat { message } => chat::chat(message),
    }
}

use crate::commands::{print_template, run_function, RunArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use vip_shipping_discount::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "VIP Shipping Discount",
    about = "Evaluate and serve the first-order VIP shipping discount function",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate one checkout payload and print the discount result as JSON
    Run(RunArgs),
    /// Print the metafield a merchant's new rule starts from
    Template,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Run(args) => run_function(args),
        Command::Template => print_template(),
    }
}

mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use vip_shipping_discount::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

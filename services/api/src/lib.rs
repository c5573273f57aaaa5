mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use precon_synergy::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

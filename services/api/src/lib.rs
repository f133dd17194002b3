mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use taller_itv::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

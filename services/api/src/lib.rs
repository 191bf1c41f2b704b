mod analyze;
mod cli;
mod infra;
mod routes;
mod server;

use homelord::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

mod cli;
mod commands;

use bill_headlines::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

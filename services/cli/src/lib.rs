mod cli;
mod commands;
mod infra;

use vaxkeeper::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}

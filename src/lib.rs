mod cli;
pub mod config;
pub mod error;
mod report;
pub mod roster;
pub mod telemetry;

use error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}

//! CatBreeds gateway binary
//!
//! Caching reverse proxy guarding the CatBreeds API.

use std::process::ExitCode;

use catbreeds_gateway::server;
use catbreeds_gateway::utils::logging;

#[tokio::main]
async fn main() -> ExitCode {
    // .env is a dev convenience; absence is fine
    dotenvy::dotenv().ok();
    logging::init();

    match server::run_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

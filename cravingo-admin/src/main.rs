use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use cravingo_admin::cli::Cli;
use cravingo_admin::{ApiResponse, AppError, AppState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Filter from the command line
    let filter = match Cli::parse().into_filter() {
        Ok(filter) => filter,
        Err(e) => Cli::command().error(ErrorKind::ArgumentConflict, e.message).exit(),
    };

    // 2. Environment (dotenv, config, logging)
    let config = setup_environment()?;

    tracing::info!(
        environment = %config.environment,
        filter = %filter.describe(),
        "Cravingo admin starting"
    );

    // 3. Services
    let state = AppState::initialize(&config)?;

    // 4. One refresh, printed as the response envelope
    let output = match state.dashboard.refresh(&filter).await {
        Ok(Some(snapshot)) => serde_json::to_string_pretty(&ApiResponse::success(snapshot.as_ref()))?,
        Ok(None) => {
            // only one refresh is ever in flight here
            let err = AppError::internal("Dashboard refresh was superseded");
            serde_json::to_string_pretty(&ApiResponse::<()>::error(&err))?
        }
        Err(e) => {
            tracing::error!(code = %e.code, error = %e, "Dashboard refresh failed");
            println!("{}", serde_json::to_string_pretty(&ApiResponse::<()>::error(&e))?);
            std::process::exit(1);
        }
    };
    println!("{}", output);

    Ok(())
}

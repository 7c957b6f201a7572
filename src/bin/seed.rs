use std::process::ExitCode;

use tracing::{error, info};

use b7store::{
    config::Config,
    db::{self, PgStore},
    seed::{self, SeedOutcome},
    telemetry,
};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    telemetry::init();

    let pool = match Config::from_env() {
        Ok(config) => db::connect(&config).await,
        Err(e) => Err(e),
    };
    let pool = match pool {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = ?e, "Error during seeding");
            return ExitCode::FAILURE;
        }
    };

    let store = PgStore::new(pool);
    match seed::run_and_close(&store).await {
        Ok(SeedOutcome::Seeded(counts)) => {
            info!(?counts, "Seed finished");
            ExitCode::SUCCESS
        }
        Ok(SeedOutcome::AlreadySeeded { .. }) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "Error during seeding");
            ExitCode::FAILURE
        }
    }
}

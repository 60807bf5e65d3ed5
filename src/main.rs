//! Seat-reservation isolation bench.
//!
//! Connects to `PostgreSQL`, bootstraps the schema and seat pool, runs the
//! configured trial matrix, and writes the report to console and CSV.

use seatbench::{
    Config, ConsoleReporter, ExperimentDriver, SeatStore,
    error::ExperimentError,
    report::write_csv,
    schema,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seatbench=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        url = %config.postgres.url,
        event_id = config.experiment.event_id,
        total_seats = config.experiment.total_seats,
        trials = config.experiment.trials.len(),
        "configuration loaded"
    );

    let store = SeatStore::connect(&config.postgres).await?;
    info!("store connected");

    schema::apply(store.pool())
        .await
        .map_err(ExperimentError::Setup)?;
    schema::seed_seats(
        store.pool(),
        config.experiment.event_id,
        config.experiment.total_seats,
    )
    .await
    .map_err(ExperimentError::Setup)?;
    info!("schema applied and seat pool seeded");

    let driver = ExperimentDriver::new(store, config.experiment.clone());
    let mut reporter = ConsoleReporter::new();
    let summaries = driver.run(&mut reporter).await?;

    write_csv(&config.experiment.csv_path, &summaries)?;
    info!(
        path = %config.experiment.csv_path,
        trials = summaries.len(),
        "experiment complete"
    );

    Ok(())
}

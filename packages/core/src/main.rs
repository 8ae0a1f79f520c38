use clap::Parser;
use dotenvy::dotenv;

use car_maintenance::cli::Cli;
use car_maintenance::commands::run;
use car_maintenance::config::Config;
use car_maintenance::error::AppError;
use car_maintenance::logging::init_logging;

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::from_env(cli.database_url.clone())
        .map_err(AppError::Config)
        .unwrap_or_else(|err| {
            tracing::error!("{}", err);
            std::process::exit(1);
        });

    if let Err(err) = run(cli.command, config).await {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}

//! Command dispatch for the CLI. Results go to stdout, diagnostics to
//! the tracing subscriber.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;

use crate::cli::Command;
use crate::config::Config;
use crate::db::create_pool;
use crate::error::{AppError, AppResult};
use crate::models::VehicleDetails;
use crate::presentation::{AlertPresenter, ContributorsViewModel, OdometerViewModel};
use crate::repository::{DocumentRepository, Snapshot};
use crate::services::GitHubClient;

async fn open_repository(config: &Config) -> AppResult<Arc<DocumentRepository>> {
    let pool = create_pool(&config.database_url).await?;
    Ok(Arc::new(DocumentRepository::new(pool)))
}

pub async fn run(command: Command, config: Config) -> AppResult<()> {
    match command {
        Command::Contributors => {
            let client = GitHubClient::new(config.github_api_url, config.github_repository);
            let mut vm = ContributorsViewModel::new(Arc::new(client));
            vm.load().await;
            if let Some(message) = vm.error_message.take() {
                return Err(AppError::Network(message));
            }
            for contributor in vm.sorted_contributors() {
                println!(
                    "{:<24} {:>18}  {}",
                    contributor.login,
                    contributor.contributions_label(),
                    contributor.profile_url()
                );
            }
        }

        Command::Import { file } => {
            let repository = open_repository(&config).await?;
            let raw = std::fs::read_to_string(&file)?;
            let snapshot: Snapshot =
                serde_json::from_str(&raw).map_err(|err| AppError::Parse(err.to_string()))?;
            let summary = repository.import_snapshot(&snapshot).await?;
            println!(
                "Imported {} alerts, {} vehicles, {} readings from {}",
                summary.alerts,
                summary.vehicles,
                summary.readings,
                file.display()
            );
        }

        Command::Alert { acknowledged } => {
            let repository = open_repository(&config).await?;
            let acknowledged: HashSet<String> = acknowledged.into_iter().collect();
            let presenter = AlertPresenter::new(config.alert_fetch_limit);
            match presenter.fetch_newest_alert(repository.as_ref(), &acknowledged).await {
                Some(alert) => {
                    println!("[{}] {}", alert.id, alert.title);
                    println!("{}", alert.message);
                    if let Some(action) = alert.action_text {
                        println!("> {}", action);
                    }
                }
                None => println!("No new alerts"),
            }
        }

        Command::Readings { user, range, now } => {
            let repository = open_repository(&config).await?;
            let now = now.unwrap_or_else(Utc::now);
            let mut vm = OdometerViewModel::new(Some(user), repository.clone(), repository);
            vm.selected_range = range;
            vm.load_readings().await;
            vm.load_vehicles().await;
            if let Some(message) = vm.error_message.take() {
                return Err(AppError::Network(message));
            }

            if let Some(placeholder) = vm.placeholder() {
                println!("{}", placeholder);
                return Ok(());
            }

            println!("{}", range);
            for series in vm.chart_series(now) {
                println!("  {}", series.vehicle_name);
                for reading in &series.readings {
                    println!("    {}  {}", reading.date.format("%Y-%m-%d"), reading.distance);
                }
            }

            println!();
            for row in vm.rows() {
                let unit = if row.reading.is_metric { "km" } else { "mi" };
                println!(
                    "{}  {:>8} {}  {}",
                    row.reading.date.format("%Y-%m-%d"),
                    row.reading.distance,
                    unit,
                    row.vehicle_name.unwrap_or("-")
                );
            }
        }

        Command::Vehicle { user, id } => {
            let repository = open_repository(&config).await?;
            let mut vm = OdometerViewModel::new(Some(user), repository.clone(), repository);
            vm.load_vehicles().await;
            if let Some(message) = vm.error_message.take() {
                return Err(AppError::Network(message));
            }
            let vehicle = vm
                .vehicles
                .iter()
                .find(|v| v.id == id)
                .ok_or_else(|| AppError::NotFound(format!("vehicle {}", id)))?;

            for (header, value) in VehicleDetails::from(vehicle).sections() {
                println!("{:<22}{}", header, value);
            }
        }
    }

    Ok(())
}

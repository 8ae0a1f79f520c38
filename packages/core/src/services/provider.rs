//! Data source interfaces.
//!
//! The presenters only talk to these traits, so the document store and
//! GitHub can be swapped for in-memory fakes in tests.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{AlertItem, Contributor, OdometerReading, Vehicle};

/// Source of active alerts.
#[async_trait]
pub trait AlertSource: Send + Sync {
    /// Active alerts whose id is not in `excluding`, newest first, at most
    /// `limit` of them. Undecodable records are already dropped.
    async fn fetch_active_alerts(
        &self,
        excluding: &HashSet<String>,
        limit: usize,
    ) -> AppResult<Vec<AlertItem>>;
}

#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// All readings owned by `user_id`, oldest first.
    async fn list_readings(&self, user_id: &str) -> AppResult<Vec<OdometerReading>>;

    /// Persist a new reading and return its id. An empty id is replaced
    /// with a generated one.
    async fn create_reading(&self, reading: &OdometerReading) -> AppResult<String>;

    /// Overwrite an existing reading. Returns `false` if no reading with
    /// that id exists.
    async fn update_reading(&self, reading: &OdometerReading) -> AppResult<bool>;

    /// Returns `false` if no reading with that id exists.
    async fn delete_reading(&self, id: &str) -> AppResult<bool>;
}

#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// All vehicles owned by `user_id`, ordered by name.
    async fn list_vehicles(&self, user_id: &str) -> AppResult<Vec<Vehicle>>;

    /// Insert or replace a vehicle.
    async fn save_vehicle(&self, vehicle: &Vehicle) -> AppResult<()>;
}

#[async_trait]
pub trait ContributorSource: Send + Sync {
    async fn fetch_contributors(&self) -> AppResult<Vec<Contributor>>;

    /// Name of this source for logging.
    fn source_name(&self) -> &str;
}

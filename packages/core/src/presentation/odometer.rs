//! State behind the odometer screen: the reading list, the chart, and
//! the add/edit/delete flows.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::{OdometerReading, TimeRange, Vehicle};
use crate::readings::{chart_series, filter_readings, vehicle_name_for, VehicleSeries};
use crate::services::{ReadingStore, VehicleStore};

/// Shown instead of the list when there are no readings.
pub const EMPTY_PLACEHOLDER: &str = "Add your first odometer";

/// A list row: the reading and the name of its vehicle, if known.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingRow<'a> {
    pub reading: &'a OdometerReading,
    pub vehicle_name: Option<&'a str>,
}

pub struct OdometerViewModel {
    user_id: Option<String>,
    reading_store: Arc<dyn ReadingStore>,
    vehicle_store: Arc<dyn VehicleStore>,
    pub readings: Vec<OdometerReading>,
    pub vehicles: Vec<Vehicle>,
    pub selected_range: TimeRange,
    /// Last failure, for a dismissible error notice.
    pub error_message: Option<String>,
}

impl OdometerViewModel {
    pub fn new(
        user_id: Option<String>,
        reading_store: Arc<dyn ReadingStore>,
        vehicle_store: Arc<dyn VehicleStore>,
    ) -> Self {
        Self {
            user_id,
            reading_store,
            vehicle_store,
            readings: Vec::new(),
            vehicles: Vec::new(),
            selected_range: TimeRange::default(),
            error_message: None,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    // ---- Loading ----

    pub async fn load_readings(&mut self) {
        let Some(user_id) = self.user_id.as_deref() else {
            tracing::debug!("No signed-in user; not loading readings");
            return;
        };

        let result = self.reading_store.list_readings(user_id).await;
        match result {
            Ok(readings) => self.readings = readings,
            Err(err) => self.record_error("load readings", err),
        }
    }

    pub async fn load_vehicles(&mut self) {
        let Some(user_id) = self.user_id.as_deref() else {
            tracing::debug!("No signed-in user; not loading vehicles");
            return;
        };

        let result = self.vehicle_store.list_vehicles(user_id).await;
        match result {
            Ok(vehicles) => self.vehicles = vehicles,
            Err(err) => self.record_error("load vehicles", err),
        }
    }

    // ---- Mutations ----

    /// Store a new reading for the signed-in user and reload the list.
    pub async fn add_reading(&mut self, mut reading: OdometerReading) -> bool {
        let Some(user_id) = self.user_id.clone() else {
            self.record_error("add reading", AppError::Config("no signed-in user".into()));
            return false;
        };
        reading.user_id = user_id;

        let result = self.reading_store.create_reading(&reading).await;
        match result {
            Ok(_) => {
                self.load_readings().await;
                true
            }
            Err(err) => {
                self.record_error("add reading", err);
                false
            }
        }
    }

    /// Save an edited reading. Ownership always stays with the signed-in
    /// user, whatever `user_id` the edited copy carries.
    pub async fn update_reading(&mut self, mut reading: OdometerReading) -> bool {
        let Some(user_id) = self.user_id.clone() else {
            self.record_error("update reading", AppError::Config("no signed-in user".into()));
            return false;
        };
        reading.user_id = user_id;

        let result = self.reading_store.update_reading(&reading).await;
        match result {
            Ok(true) => {
                if let Some(slot) = self.readings.iter_mut().find(|r| r.id == reading.id) {
                    *slot = reading;
                }
                true
            }
            Ok(false) => {
                self.record_error("update reading", AppError::NotFound(format!("reading {}", reading.id)));
                false
            }
            Err(err) => {
                self.record_error("update reading", err);
                false
            }
        }
    }

    pub async fn delete_reading(&mut self, reading: &OdometerReading) -> bool {
        let result = self.reading_store.delete_reading(&reading.id).await;
        match result {
            Ok(true) => {
                self.readings.retain(|r| r.id != reading.id);
                true
            }
            Ok(false) => {
                self.record_error("delete reading", AppError::NotFound(format!("reading {}", reading.id)));
                false
            }
            Err(err) => {
                self.record_error("delete reading", err);
                false
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    // ---- Derived view state ----

    pub fn filtered_readings(&self, vehicle: &Vehicle, now: DateTime<Utc>) -> Vec<OdometerReading> {
        filter_readings(&self.readings, vehicle, self.selected_range, now)
    }

    /// Chart lines for the selected range. Empty when there are no readings.
    pub fn chart_series(&self, now: DateTime<Utc>) -> Vec<VehicleSeries> {
        chart_series(&self.readings, &self.vehicles, self.selected_range, now)
    }

    /// Every reading, unfiltered, joined to its vehicle name.
    pub fn rows(&self) -> Vec<ReadingRow<'_>> {
        self.readings
            .iter()
            .map(|reading| ReadingRow {
                reading,
                vehicle_name: vehicle_name_for(reading, &self.vehicles),
            })
            .collect()
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        self.readings.is_empty().then_some(EMPTY_PLACEHOLDER)
    }

    fn record_error(&mut self, action: &str, err: AppError) {
        tracing::error!("Failed to {}: {}", action, err);
        self.error_message = Some(err.to_string());
    }
}
